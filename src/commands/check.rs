use crate::error::Error;
use crate::models::StatusReport;
use crate::services::{normalize, ParseOptions, ParseReport};
use std::path::{Path, PathBuf};

/// Rows listed before the report is truncated
const MAX_LISTED_SKIPS: usize = 20;

pub fn run(path: PathBuf, tokenized: bool, offset_mode: Option<String>) {
    println!("🔍 Checking {}\n", path.display());

    let options = super::load_options(offset_mode, tokenized, false);
    match check_file(&path, &options.parse) {
        Ok(report) => {
            print_report(&report);
            if report.records.is_empty() {
                eprintln!("\n❌ {}", StatusReport::error(Error::NoValidData));
                std::process::exit(1);
            }
            println!("\n✅ {}", StatusReport::success(report.records.len()));
        }
        Err(e) => {
            eprintln!("❌ {}", StatusReport::error(e));
            std::process::exit(1);
        }
    }
}

fn check_file(path: &Path, options: &ParseOptions) -> Result<ParseReport, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    normalize(&text, options)
}

fn print_report(report: &ParseReport) {
    println!("   Data rows:  {:>8}", report.data_rows);
    println!("   Accepted:   {:>8}", report.records.len());
    println!("   Skipped:    {:>8}", report.skipped.len());

    if let (Some(first), Some(last)) = (report.records.first(), report.records.last()) {
        println!("   Range:      {} → {}", first.time.to_rfc3339(), last.time.to_rfc3339());
        let total_volume: u64 = report.records.iter().map(|r| r.volume).sum();
        println!("   Volume:     {:>8}", total_volume);
    }

    if report.legacy_offsets > 0 {
        println!(
            "\n⚠️  {} rows had a -05:00 offset read as UTC (use --offset-mode honor to apply it)",
            report.legacy_offsets
        );
    }

    if !report.skipped.is_empty() {
        println!("\n⚠️  Skipped rows:");
        for row in report.skipped.iter().take(MAX_LISTED_SKIPS) {
            println!("   line {:>6}: {}", row.line, row.reason);
        }
        if report.skipped.len() > MAX_LISTED_SKIPS {
            println!("   ... and {} more", report.skipped.len() - MAX_LISTED_SKIPS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_check_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Datetime,Open,High,Low,Close,Volume\n2024-01-01,1,2,0.5,1.5,10\n2024-01-02,1,2\n"
        )
        .unwrap();

        let report = check_file(file.path(), &ParseOptions::default()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_check_missing_file() {
        let result = check_file(Path::new("missing.csv"), &ParseOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
