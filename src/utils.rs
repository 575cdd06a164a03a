use crate::constants::DEFAULT_DATA_FILE;
use std::path::PathBuf;

/// Get CSV data file from environment variable or use default
pub fn get_data_file() -> PathBuf {
    std::env::var("CANDLEVIEW_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Get remote CSV URL from environment variable, if any
pub fn get_data_url() -> Option<String> {
    std::env::var("CANDLEVIEW_DATA_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Get public directory for static files from environment variable or use default
pub fn get_public_dir() -> PathBuf {
    std::env::var("CANDLEVIEW_PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public"))
}

/// Get server port from environment variable or use default
pub fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}

/// Get offset handling mode name from environment variable or use default
pub fn get_offset_mode() -> String {
    std::env::var("CANDLEVIEW_OFFSET_MODE").unwrap_or_else(|_| "legacy".to_string())
}
