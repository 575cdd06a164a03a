//! CSV → time series normalization
//!
//! One linear pass over the rows. The header row is skipped, blank rows are
//! ignored, and every data row either becomes an [`Ohlcv`] or is dropped with
//! a logged reason. Input order is kept; nothing is sorted or deduplicated.

use crate::constants::{
    csv_column, CSV_MIN_COLUMNS, CSV_MIN_COLUMNS_TOKENIZED, TIME_HEADER_ALIASES,
};
use crate::error::{Error, Result};
use crate::models::{OffsetMode, Ohlcv, TimeSeries};
use crate::services::time_parser::{parse_time, uses_legacy_offset};
use std::fmt;
use tracing::{debug, warn};

/// How a row is split into columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Splitter {
    /// `split('\n')` then `split(',')`, positional columns, volume required
    #[default]
    Comma,
    /// Full CSV tokenizer (quotes, CRLF), columns resolved by header name
    Tokenized,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub splitter: Splitter,
    pub offset_mode: OffsetMode,
}

/// Why a data row was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    TooFewColumns { found: usize, required: usize },
    InvalidTime(String),
    InvalidPrice { column: &'static str, value: String },
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewColumns { found, required } => {
                write!(f, "expected at least {} columns, found {}", required, found)
            }
            SkipReason::InvalidTime(value) => write!(f, "invalid time '{}'", value),
            SkipReason::InvalidPrice { column, value } => {
                write!(f, "invalid {} '{}'", column, value)
            }
            SkipReason::Malformed(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the input (the header is line 1)
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of one normalization pass
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: TimeSeries,
    pub skipped: Vec<SkippedRow>,
    /// Non-header, non-blank rows seen
    pub data_rows: usize,
    /// Rows whose `-05:00` suffix was read as UTC
    pub legacy_offsets: usize,
}

impl ParseReport {
    /// Fail with [`Error::NoValidData`] when no row survived
    pub fn ensure_records(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(Error::NoValidData);
        }
        Ok(())
    }
}

/// Column positions for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    time: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl ColumnMap {
    fn positional() -> Self {
        Self {
            time: csv_column::TIME,
            open: csv_column::OPEN,
            high: csv_column::HIGH,
            low: csv_column::LOW,
            close: csv_column::CLOSE,
            volume: Some(csv_column::VOLUME),
        }
    }

    /// Resolve columns by header name, falling back to positions for missing names
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let default = Self::positional();

        Self {
            time: find(TIME_HEADER_ALIASES).unwrap_or(default.time),
            open: find(&["open"]).unwrap_or(default.open),
            high: find(&["high"]).unwrap_or(default.high),
            low: find(&["low"]).unwrap_or(default.low),
            close: find(&["close"]).unwrap_or(default.close),
            volume: find(&["volume", "vol"]).or(default.volume),
        }
    }

    fn required_len(&self) -> usize {
        [self.time, self.open, self.high, self.low, self.close]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Parse CSV text into records, failing when no row survives
pub fn parse_rows(text: &str, options: &ParseOptions) -> Result<TimeSeries> {
    let report = normalize(text, options)?;
    report.ensure_records()?;
    Ok(report.records)
}

/// Parse CSV text into a [`ParseReport`]; an empty result is not an error here
pub fn normalize(text: &str, options: &ParseOptions) -> Result<ParseReport> {
    let report = match options.splitter {
        Splitter::Comma => normalize_comma(text, options.offset_mode),
        Splitter::Tokenized => normalize_tokenized(text, options.offset_mode)?,
    };

    if report.legacy_offsets > 0 {
        warn!(
            rows = report.legacy_offsets,
            "Treated -05:00 offsets as UTC (legacy offset mode); use offset mode 'honor' to apply them"
        );
    }

    debug!(
        data_rows = report.data_rows,
        accepted = report.records.len(),
        skipped = report.skipped.len(),
        "Normalized CSV input"
    );

    Ok(report)
}

fn normalize_comma(text: &str, mode: OffsetMode) -> ParseReport {
    let mut report = ParseReport::default();
    let columns = ColumnMap::positional();

    // Line 1 is the header
    for (idx, raw) in text.split('\n').enumerate().skip(1) {
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }
        report.data_rows += 1;

        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() < CSV_MIN_COLUMNS {
            skip(&mut report, idx + 1, SkipReason::TooFewColumns {
                found: fields.len(),
                required: CSV_MIN_COLUMNS,
            });
            continue;
        }

        accept_row(&mut report, idx + 1, &fields, &columns, mode);
    }

    report
}

fn normalize_tokenized(text: &str, mode: OffsetMode) -> Result<ParseReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?);
    let required = columns.required_len().max(CSV_MIN_COLUMNS_TOKENIZED);
    let mut report = ParseReport::default();

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                report.data_rows += 1;
                let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
                skip(&mut report, line, SkipReason::Malformed(e.to_string()));
                continue;
            }
        };

        // Whitespace-only line; rows of empty fields still count
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        report.data_rows += 1;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
        if record.len() < required {
            skip(&mut report, line, SkipReason::TooFewColumns {
                found: record.len(),
                required,
            });
            continue;
        }

        let fields: Vec<&str> = record.iter().collect();
        accept_row(&mut report, line, &fields, &columns, mode);
    }

    Ok(report)
}

fn accept_row(
    report: &mut ParseReport,
    line: usize,
    fields: &[&str],
    columns: &ColumnMap,
    mode: OffsetMode,
) {
    match build_record(fields, columns, mode) {
        Ok(record) => {
            if uses_legacy_offset(fields[columns.time], mode) {
                report.legacy_offsets += 1;
            }
            report.records.push(record);
        }
        Err(reason) => skip(report, line, reason),
    }
}

fn skip(report: &mut ParseReport, line: usize, reason: SkipReason) {
    warn!(line, reason = %reason, "Skipping row");
    report.skipped.push(SkippedRow { line, reason });
}

/// Build one record from a row that already has enough columns
fn build_record(
    fields: &[&str],
    columns: &ColumnMap,
    mode: OffsetMode,
) -> std::result::Result<Ohlcv, SkipReason> {
    let time_str = fields[columns.time];
    let time = parse_time(time_str, mode)
        .map_err(|_| SkipReason::InvalidTime(time_str.trim().to_string()))?;

    let open = parse_price(fields[columns.open], "open")?;
    let high = parse_price(fields[columns.high], "high")?;
    let low = parse_price(fields[columns.low], "low")?;
    let close = parse_price(fields[columns.close], "close")?;
    let volume = parse_volume(columns.volume.and_then(|idx| fields.get(idx).copied()));

    Ok(Ohlcv::new(time, open, high, low, close, volume))
}

fn parse_price(value: &str, column: &'static str) -> std::result::Result<f64, SkipReason> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SkipReason::InvalidPrice {
            column,
            value: value.trim().to_string(),
        })
}

/// Volume never drops a row: unparsable or negative values become 0
fn parse_volume(value: Option<&str>) -> u64 {
    let Some(value) = value.map(str::trim) else {
        return 0;
    };

    if let Ok(v) = value.parse::<u64>() {
        return v;
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => 0,
    }
}
