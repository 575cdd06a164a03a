pub mod check;
pub mod render;
pub mod serve;

use crate::error::AppError;
use crate::models::OffsetMode;
use crate::services::{LoadOptions, Splitter};
use crate::utils::get_offset_mode;

/// Resolve the offset mode from a flag or `CANDLEVIEW_OFFSET_MODE`, exiting on a bad value
fn resolve_offset_mode(flag: Option<String>) -> OffsetMode {
    let value = flag.unwrap_or_else(get_offset_mode);
    match OffsetMode::from_str(&value) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("❌ {}", AppError::Config(e));
            std::process::exit(1);
        }
    }
}

/// Load options shared by the commands
fn load_options(offset_mode: Option<String>, tokenized: bool, no_volume: bool) -> LoadOptions {
    let mut options = LoadOptions::default();
    options.parse.offset_mode = resolve_offset_mode(offset_mode);
    options.parse.splitter = if tokenized {
        Splitter::Tokenized
    } else {
        Splitter::Comma
    };
    options.chart.volume = !no_volume;
    options
}
