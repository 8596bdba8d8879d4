//! The `inspect` command: list record files and directory statistics.

use std::error::Error;
use std::fs;
use std::path::Path;

use minnow_db::RECORD_FILE_SUFFIX;
use serde::Serialize;

/// Per-file details for one directory entry.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    index: Option<u64>,
    bytes: u64,
    blank: bool,
}

/// Summary of a whole store directory.
#[derive(Debug, Serialize)]
struct StoreReport {
    directory: String,
    records: usize,
    blanks: usize,
    unrelated: usize,
    files: Vec<FileReport>,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn Error>> {
    let report = build_report(path)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn build_report(path: &Path) -> Result<StoreReport, Box<dyn Error>> {
    let mut report = StoreReport {
        directory: path.display().to_string(),
        records: 0,
        blanks: 0,
        unrelated: 0,
        files: Vec::new(),
    };

    if !path.exists() {
        // A store that never persisted anything has no directory yet.
        return Ok(report);
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file = entry.file_name().to_string_lossy().into_owned();
        let bytes = entry.metadata()?.len();

        let index = file
            .strip_suffix(RECORD_FILE_SUFFIX)
            .and_then(|stem| stem.parse().ok());
        if index.is_none() {
            report.unrelated += 1;
        }

        let blank = fs::read_to_string(entry.path())
            .map(|content| content.trim().is_empty())
            .unwrap_or(false);
        if blank {
            report.blanks += 1;
        } else if index.is_some() {
            report.records += 1;
        }

        report.files.push(FileReport {
            file,
            index,
            bytes,
            blank,
        });
    }
    report.files.sort_by(|a, b| a.file.cmp(&b.file));

    Ok(report)
}

fn print_text(report: &StoreReport) {
    println!("Store directory: {}", report.directory);
    println!(
        "  {} records, {} blank files, {} unrelated files",
        report.records, report.blanks, report.unrelated
    );
    for file in &report.files {
        let marker = if file.blank {
            " (blank)"
        } else if file.index.is_none() {
            " (unrelated)"
        } else {
            ""
        };
        println!("  {:<24} {:>8} bytes{}", file.file, file.bytes, marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn report_counts_records_blanks_and_strays() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.ddps"), "{\"id\":1}").unwrap();
        fs::write(dir.path().join("2.ddps"), "  ").unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        let report = build_report(dir.path()).unwrap();
        assert_eq!(report.records, 1);
        assert_eq!(report.blanks, 1);
        assert_eq!(report.unrelated, 1);
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn missing_directory_is_an_empty_store() {
        let dir = tempdir().unwrap();
        let report = build_report(&dir.path().join("never_created")).unwrap();
        assert_eq!(report.records, 0);
        assert!(report.files.is_empty());
    }
}
