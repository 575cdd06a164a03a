use serde::{Deserialize, Serialize};
use std::fmt;

/// Style class applied to the status element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Success,
    Error,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "success",
            StatusClass::Error => "error",
        }
    }
}

/// The one human-readable line reported at the end of a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub message: String,
    pub class: StatusClass,
}

impl StatusReport {
    /// Success line carrying the number of accepted records
    pub fn success(count: usize) -> Self {
        Self {
            message: format!("Successfully loaded {} data points", count),
            class: StatusClass::Success,
        }
    }

    /// Error line carrying the triggering error's description
    pub fn error(err: impl fmt::Display) -> Self {
        Self {
            message: format!("Error: {}", err),
            class: StatusClass::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.class == StatusClass::Error
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
