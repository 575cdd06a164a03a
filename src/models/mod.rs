mod ohlcv;
mod offset_mode;
mod status;
pub mod chart;

pub use chart::{ChartSpec, VolumeBar};
pub use offset_mode::OffsetMode;
pub use ohlcv::Ohlcv;
pub use status::{StatusClass, StatusReport};

/// Ordered records produced by one load
pub type TimeSeries = Vec<Ohlcv>;
