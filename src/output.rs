//! Output formatting and persistence for dashboard payloads and records.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::record::SummaryRecord;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a sampling record using Rust's debug pretty-print format.
pub fn print_pretty(record: &SummaryRecord) {
    debug!("{:#?}", record);
}

/// Logs a payload as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a payload to `path` as pretty-printed JSON, or to stdout when no
/// path is given.
pub fn write_json(path: Option<&str>, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, body)?;
            info!(path, "Payload written");
        }
        None => println!("{body}"),
    }
    Ok(())
}

/// Appends a [`SummaryRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &SummaryRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SummaryRecord;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        let record = SummaryRecord::default();
        print_pretty(&record);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let record = SummaryRecord::default();
        print_json(&record).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("raildash_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let record = SummaryRecord::default();
        append_record(&path, &record).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("raildash_test_header.csv");
        let _ = fs::remove_file(&path);

        let record = SummaryRecord::default();
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_two_rows() {
        let path = temp_path("raildash_test_rows.csv");
        let _ = fs::remove_file(&path);

        let record = SummaryRecord::default();
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows = 3 lines (last may be empty due to trailing newline)
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_to_file() {
        let path = temp_path("raildash_test_payload.json");
        let _ = fs::remove_file(&path);

        write_json(Some(&path), &SummaryRecord::default()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("total_revenue"));

        fs::remove_file(&path).unwrap();
    }
}
