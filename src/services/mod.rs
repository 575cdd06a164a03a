pub mod acquisition;
pub mod chart_builder;
pub mod csv_parser;
pub mod loader;
pub mod page;
pub mod time_parser;

pub use acquisition::DataSource;
pub use chart_builder::{build_chart, volume_color, ChartOptions};
pub use csv_parser::{
    normalize, parse_rows, ParseOptions, ParseReport, SkipReason, SkippedRow, Splitter,
};
pub use loader::{load, load_text, LoadFailure, LoadOptions, LoadOutcome};
