//! Report output: CSV file and console summary

use crate::error::FileError;
use crate::models::search_result::{ResultSet, SearchResult, Status};
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::debug;

/// Flat CSV row, field order is the header order
#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    plate_number: &'a str,
    status: Status,
    message: &'a str,
    timestamp: String,
}

impl<'a> From<&'a SearchResult> for ReportRecord<'a> {
    fn from(result: &'a SearchResult) -> Self {
        Self {
            plate_number: result.plate_number(),
            status: result.status(),
            message: result.message(),
            timestamp: result.timestamp().to_rfc3339(),
        }
    }
}

/// Writes result sets as CSV
pub struct ReportWriter;

impl ReportWriter {
    /// Write the report to a file, replacing it if it exists
    pub fn write(results: &ResultSet, destination: &Path) -> Result<(), FileError> {
        debug!(
            "Writing {} results to {}",
            results.len(),
            destination.display()
        );

        let path = destination.display().to_string();
        let writer = csv::Writer::from_path(destination).map_err(|source| FileError::Write {
            path: path.clone(),
            source,
        })?;

        Self::write_records(writer, results).map_err(|source| FileError::Write { path, source })
    }

    /// Write the report to any sink
    pub fn write_to<W: io::Write>(results: &ResultSet, sink: W) -> Result<(), csv::Error> {
        Self::write_records(csv::Writer::from_writer(sink), results)
    }

    fn write_records<W: io::Write>(
        mut writer: csv::Writer<W>,
        results: &ResultSet,
    ) -> Result<(), csv::Error> {
        // serialize() only emits a header once a row exists
        if results.is_empty() {
            writer.write_record(["plate_number", "status", "message", "timestamp"])?;
        }
        for result in results {
            writer.serialize(ReportRecord::from(result))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Per-status totals and the list of available plates
pub fn summarize(results: &ResultSet) -> String {
    let rule = "=".repeat(60);
    let mut out = format!(
        "{rule}\nSEARCH SUMMARY\n{rule}\nTotal plates searched: {}\n",
        results.len()
    );
    for status in Status::ALL {
        let name = format!("{}:", label(status));
        out.push_str(&format!("{:<12} {}\n", name, results.count(status)));
    }

    let available: Vec<&str> = results.available_plates().collect();
    if !available.is_empty() {
        out.push_str("\n🎉 Available plate numbers:\n");
        for plate in available {
            out.push_str(&format!("  - {plate}\n"));
        }
    }

    out
}

fn label(status: Status) -> &'static str {
    match status {
        Status::Available => "Available",
        Status::Unavailable => "Unavailable",
        Status::Unknown => "Unknown",
        Status::Error => "Error",
        Status::Invalid => "Invalid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        [
            SearchResult::new("ABC123", Status::Available, "Congratulations! ABC123 is available"),
            SearchResult::invalid("TOOLONGPLATE", "Plate number cannot be longer than 7 characters"),
            SearchResult::new("XYZ9", Status::Unavailable, "XYZ9 is not available, sorry"),
            SearchResult::error("EZY", "Timeout waiting for result display (15s)"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn csv_has_fixed_header_and_one_row_per_result() {
        let mut buf = Vec::new();
        ReportWriter::write_to(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "plate_number,status,message,timestamp");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("ABC123,available,Congratulations! ABC123 is available,"));
        // commas in messages are quoted
        assert!(lines[3].starts_with("XYZ9,unavailable,\"XYZ9 is not available, sorry\","));
    }

    #[test]
    fn timestamps_are_iso8601() {
        let mut buf = Vec::new();
        ReportWriter::write_to(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        for record in reader.records() {
            let record = record.unwrap();
            assert!(chrono::DateTime::parse_from_rfc3339(&record[3]).is_ok());
        }
    }

    #[test]
    fn empty_report_still_has_header() {
        let mut buf = Vec::new();
        ReportWriter::write_to(&ResultSet::new(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            "plate_number,status,message,timestamp"
        );
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        ReportWriter::write(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn summary_counts_every_status_and_lists_available() {
        let summary = summarize(&sample());
        assert!(summary.contains("Total plates searched: 4"));
        assert!(summary.contains("Available:   1"));
        assert!(summary.contains("Unavailable: 1"));
        assert!(summary.contains("Unknown:     0"));
        assert!(summary.contains("Error:       1"));
        assert!(summary.contains("Invalid:     1"));
        assert!(summary.contains("  - ABC123"));
        assert!(!summary.contains("  - XYZ9"));
    }

    #[test]
    fn summary_of_an_empty_run() {
        let summary = summarize(&ResultSet::new());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[1], "SEARCH SUMMARY");
        assert_eq!(lines[3], "Total plates searched: 0");
        assert_eq!(lines[4], "Available:   0");
        assert_eq!(lines.len(), 9);
        assert!(!summary.contains("Available plate numbers"));
    }
}
