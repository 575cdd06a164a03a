//! Input acquisition
//!
//! Raw CSV text comes from a local file, a single HTTP GET, or bytes posted
//! through the upload form. There is exactly one attempt per load.

use crate::constants::{ALLOWED_UPLOAD_EXTS, MAX_UPLOAD_SIZE};
use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Where the CSV text for one load comes from
#[derive(Debug, Clone)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
    Bytes { name: String, data: Vec<u8> },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "file {}", path.display()),
            DataSource::Url(url) => write!(f, "url {}", url),
            DataSource::Bytes { name, data } => write!(f, "upload {} ({} bytes)", name, data.len()),
        }
    }
}

/// Obtain the raw text for `source`
pub async fn acquire(source: &DataSource) -> Result<String> {
    match source {
        DataSource::File(path) => read_file(path).await,
        DataSource::Url(url) => fetch_text(url).await,
        DataSource::Bytes { name, data } => decode_upload(name, data),
    }
}

/// Read a local CSV file
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn read_file(path: &std::path::Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    debug!(size = bytes.len(), "Read CSV file");

    String::from_utf8(bytes)
        .map_err(|_| Error::InvalidInput(format!("{} is not valid UTF-8 text", path.display())))
}

/// Fetch a CSV resource with a single GET
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        warn!(status = %response.status(), "Fetch returned error status");
        return Err(Error::Network(format!(
            "HTTP error! status: {}",
            response.status().as_u16()
        )));
    }

    let text = response.text().await?;
    info!(size = text.len(), "Fetched CSV resource");
    Ok(text)
}

/// Validate an uploaded file and decode it as text
pub fn decode_upload(name: &str, data: &[u8]) -> Result<String> {
    validate_upload_extension(name)?;

    if data.len() > MAX_UPLOAD_SIZE {
        return Err(Error::InvalidInput(format!(
            "File size exceeds {}MB limit",
            MAX_UPLOAD_SIZE / (1024 * 1024)
        )));
    }

    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|_| Error::InvalidInput("Invalid file type. Expected CSV text".to_string()))
}

fn validate_upload_extension(name: &str) -> Result<()> {
    let extension = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return Err(Error::InvalidInput("File must have an extension".to_string())),
    };

    if !ALLOWED_UPLOAD_EXTS.contains(&extension.as_str()) {
        return Err(Error::InvalidInput(format!(
            "Invalid file extension. Expected: {}",
            ALLOWED_UPLOAD_EXTS.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Datetime,Open,High,Low,Close,Volume").unwrap();

        let text = acquire(&DataSource::File(file.path().to_path_buf())).await.unwrap();
        assert!(text.starts_with("Datetime"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = read_file(std::path::Path::new("does/not/exist.csv")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let result = fetch_text("http://127.0.0.1:9/data.csv").await;
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[test]
    fn test_decode_upload() {
        assert_eq!(decode_upload("prices.CSV", b"a,b").unwrap(), "a,b");
        assert!(matches!(decode_upload("prices", b"a,b"), Err(Error::InvalidInput(_))));
        assert!(matches!(decode_upload("prices.xlsx", b"a,b"), Err(Error::InvalidInput(_))));
        assert!(matches!(decode_upload("prices.csv", &[0xff, 0xfe]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_upload_size_limit() {
        let data = vec![b'a'; MAX_UPLOAD_SIZE + 1];
        assert!(matches!(decode_upload("big.csv", &data), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_display() {
        let source = DataSource::Url("http://localhost/data.csv".to_string());
        assert_eq!(source.to_string(), "url http://localhost/data.csv");
    }
}
