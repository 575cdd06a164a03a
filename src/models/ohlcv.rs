use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trading period (Open, High, Low, Close, Volume)
///
/// Built once while parsing a load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Start of the period, serialized as epoch seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume, 0 when the source had none
    pub volume: u64,
}

impl Ohlcv {
    /// Create a new OHLCV data point
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Close strictly above open
    pub fn is_up(&self) -> bool {
        self.close > self.open
    }

    /// Epoch seconds, the time format the chart consumes
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_up() {
        let t = Utc.with_ymd_and_hms(2026, 2, 1, 18, 10, 0).unwrap();
        assert!(Ohlcv::new(t, 100.0, 105.0, 95.0, 102.0, 1000).is_up());
        assert!(!Ohlcv::new(t, 100.0, 105.0, 95.0, 100.0, 1000).is_up());
        assert!(!Ohlcv::new(t, 100.0, 105.0, 95.0, 98.0, 1000).is_up());
    }

    #[test]
    fn test_serialize_time_as_seconds() {
        let t = Utc.with_ymd_and_hms(2026, 2, 1, 18, 10, 0).unwrap();
        let json = serde_json::to_value(Ohlcv::new(t, 1.0, 2.0, 0.5, 1.5, 7)).unwrap();
        assert_eq!(json["time"], t.timestamp());
        assert_eq!(json["volume"], 7);
    }
}
