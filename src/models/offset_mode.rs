//! How explicit UTC offsets in the time column are treated
//!
//! `Legacy` keeps the behavior existing `data.csv` exports were charted
//! with: a trailing `-05:00` is rewritten to `Z`, so `18:10:00-05:00`
//! becomes `18:10:00Z`. Every other offset is applied as written. `Honor`
//! applies all offsets, `-05:00` included.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetMode {
    #[default]
    #[serde(alias = "compat")]
    Legacy,

    #[serde(alias = "respect", alias = "strict")]
    Honor,
}

impl OffsetMode {
    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "compat" => Ok(OffsetMode::Legacy),
            "honor" | "respect" | "strict" => Ok(OffsetMode::Honor),
            _ => Err(format!(
                "Invalid offset mode: '{}'. Valid values: legacy, honor",
                s
            )),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetMode::Legacy => "legacy",
            OffsetMode::Honor => "honor",
        }
    }
}
