//! CSV Format and Chart Constants
//!
//! ## Input CSV layout
//!
//! ```text
//! Datetime,Open,High,Low,Close,Volume[,...]
//! 2026-02-01 18:10:00-05:00,100,105,95,102,1000
//! ```
//!
//! The header row is always skipped. Extra trailing columns are ignored.

/// Minimum columns for the comma-split reader (time, open, high, low, close, volume)
pub const CSV_MIN_COLUMNS: usize = 6;

/// Minimum columns for the tokenized reader, where volume is optional
pub const CSV_MIN_COLUMNS_TOKENIZED: usize = 5;

/// Column indices for the positional CSV layout (0-indexed)
pub mod csv_column {
    pub const TIME: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
}

/// Header names accepted for the time column (compared case-insensitively)
pub const TIME_HEADER_ALIASES: &[&str] = &["datetime", "time", "date", "timestamp"];

/// Offset suffix that the legacy parser rewrites to `Z`
pub const LEGACY_OFFSET_SUFFIX: &str = "-05:00";

/// Default CSV resource fetched on page load
pub const DEFAULT_DATA_FILE: &str = "data.csv";

/// Upload limits
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024; // 10MB
pub const ALLOWED_UPLOAD_EXTS: &[&str] = &["csv", "txt"];

/// Chart colours
pub const UP_COLOR: &str = "#26a69a";
pub const DOWN_COLOR: &str = "#ef5350";
pub const BACKGROUND_COLOR: &str = "white";
pub const TEXT_COLOR: &str = "black";
pub const GRID_COLOR: &str = "rgba(197, 203, 206, 0.5)";

/// Chart height in pixels. Width follows the container.
pub const CHART_HEIGHT: u32 = 500;

/// Fallback width used before the container has been measured
pub const CHART_DEFAULT_WIDTH: u32 = 900;

/// Volume histogram sits in the bottom 20% of the pane
pub const VOLUME_MARGIN_TOP: f64 = 0.8;
pub const VOLUME_MARGIN_BOTTOM: f64 = 0.0;

/// Price scale leaves room for the volume histogram
pub const PRICE_MARGIN_TOP: f64 = 0.1;
pub const PRICE_MARGIN_BOTTOM: f64 = 0.2;

/// Charting library loaded by the generated pages
pub const LIGHTWEIGHT_CHARTS_CDN: &str =
    "https://unpkg.com/lightweight-charts@4.2.0/dist/lightweight-charts.standalone.production.js";
