//! Load pipeline: acquisition → parser → chart builder → status
//!
//! Every fatal error is caught here and turned into the error status, so
//! callers always get exactly one [`StatusReport`] per load.

use crate::error::{Error, Result};
use crate::models::{ChartSpec, StatusReport};
use crate::services::acquisition::{acquire, DataSource};
use crate::services::chart_builder::{build_chart, ChartOptions};
use crate::services::csv_parser::{normalize, ParseOptions, SkippedRow};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub parse: ParseOptions,
    pub chart: ChartOptions,
}

/// Result of one load, successful or not
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub status: StatusReport,
    pub chart: Option<ChartSpec>,
    pub skipped: Vec<SkippedRow>,
    /// Set when the load failed
    pub error: Option<LoadFailure>,
}

/// Kind of fatal error that ended a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailure {
    Acquisition,
    InvalidInput,
    NoValidData,
    Other,
}

impl LoadFailure {
    fn classify(err: &Error) -> Self {
        match err {
            Error::Network(_) | Error::Io(_) => LoadFailure::Acquisition,
            Error::InvalidInput(_) => LoadFailure::InvalidInput,
            Error::NoValidData => LoadFailure::NoValidData,
            _ => LoadFailure::Other,
        }
    }
}

impl LoadOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Number of records plotted
    pub fn record_count(&self) -> usize {
        self.chart.as_ref().map_or(0, |c| c.candles.data.len())
    }
}

/// Run one full load from `source`
#[instrument(skip_all, fields(source = %source))]
pub async fn load(source: &DataSource, options: &LoadOptions) -> LoadOutcome {
    let outcome = match acquire(source).await {
        Ok(text) => load_text(&text, options),
        Err(e) => finish(Err(e), Vec::new()),
    };

    if outcome.is_success() {
        info!(
            count = outcome.record_count(),
            skipped = outcome.skipped.len(),
            "Load complete"
        );
    }
    outcome
}

/// Load from text that is already in memory
pub fn load_text(text: &str, options: &LoadOptions) -> LoadOutcome {
    let mut skipped = Vec::new();
    let result = build_from_text(text, options, &mut skipped);
    finish(result, skipped)
}

fn finish(result: Result<ChartSpec>, skipped: Vec<SkippedRow>) -> LoadOutcome {
    match result {
        Ok(chart) => LoadOutcome {
            status: StatusReport::success(chart.candles.data.len()),
            chart: Some(chart),
            skipped,
            error: None,
        },
        Err(e) => {
            error!(error = %e, "Load failed");
            LoadOutcome {
                status: StatusReport::error(&e),
                chart: None,
                skipped,
                error: Some(LoadFailure::classify(&e)),
            }
        }
    }
}

fn build_from_text(
    text: &str,
    options: &LoadOptions,
    skipped: &mut Vec<SkippedRow>,
) -> Result<ChartSpec> {
    let report = normalize(text, &options.parse)?;
    let checked = report.ensure_records();
    *skipped = report.skipped;
    checked?;

    Ok(build_chart(&report.records, &options.chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UP_COLOR;
    use crate::models::StatusClass;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_success() {
        let file = csv_file(
            "Datetime,Open,High,Low,Close,Volume\n2026-02-01 18:10:00-05:00,100,105,95,102,1000\nshort,row\n",
        );
        let source = DataSource::File(file.path().to_path_buf());
        let outcome = load(&source, &LoadOptions::default()).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.status.message, "Successfully loaded 1 data points");
        assert_eq!(outcome.status.class, StatusClass::Success);
        assert_eq!(outcome.record_count(), 1);
        assert_eq!(outcome.skipped.len(), 1);

        let chart = outcome.chart.unwrap();
        assert_eq!(chart.volume.unwrap().data[0].color, UP_COLOR);
    }

    #[tokio::test]
    async fn test_header_only_reports_no_valid_data() {
        let file = csv_file("Datetime,Open,High,Low,Close,Volume\n");
        let source = DataSource::File(file.path().to_path_buf());
        let outcome = load(&source, &LoadOptions::default()).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.error, Some(LoadFailure::NoValidData));
        assert_eq!(outcome.status.message, "Error: No valid data found in the CSV file");
        assert_eq!(outcome.status.class, StatusClass::Error);
        assert!(outcome.chart.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_acquisition_failure() {
        let outcome = load(
            &DataSource::File("no/such/data.csv".into()),
            &LoadOptions::default(),
        )
        .await;
        assert_eq!(outcome.error, Some(LoadFailure::Acquisition));
        assert!(outcome.status.is_error());
    }

    #[tokio::test]
    async fn test_bad_upload_is_invalid_input() {
        let source = DataSource::Bytes {
            name: "prices.exe".to_string(),
            data: b"Datetime,Open\n".to_vec(),
        };
        let outcome = load(&source, &LoadOptions::default()).await;
        assert_eq!(outcome.error, Some(LoadFailure::InvalidInput));
    }

    #[test]
    fn test_load_text_keeps_skipped_rows_on_failure() {
        let outcome = load_text(
            "Datetime,Open,High,Low,Close,Volume\nbad,1,2,3,4,5\n",
            &LoadOptions::default(),
        );
        assert_eq!(outcome.error, Some(LoadFailure::NoValidData));
        assert_eq!(outcome.skipped.len(), 1);
    }
}
