//! The `verify` command: a non-aborting readability check.
//!
//! `DiskStore::load_all` deliberately fails the whole load on one bad
//! file. This command gives operators the opposite view: it walks the
//! directory, reports every problem it finds, and keeps going.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Outcome of verifying a store directory.
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Files that held non-blank text.
    pub records: usize,
    /// Blank files (tombstones or incomplete writes).
    pub blanks: usize,
    /// Files that could not be read as UTF-8 text, with the reason.
    pub failures: Vec<String>,
}

impl VerifyReport {
    /// Returns true if no file failed to read.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the verify command.
pub fn run(path: &Path) -> io::Result<VerifyReport> {
    let mut report = VerifyReport::default();

    if !path.exists() {
        info!(directory = %path.display(), "store directory missing, nothing to verify");
        return Ok(report);
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_path = entry.path();
        match fs::read_to_string(&file_path) {
            Ok(content) if content.trim().is_empty() => {
                warn!(path = %file_path.display(), "blank record file");
                report.blanks += 1;
            }
            Ok(_) => report.records += 1,
            Err(err) => {
                warn!(path = %file_path.display(), error = %err, "unreadable record file");
                report
                    .failures
                    .push(format!("{}: {}", file_path.display(), err));
            }
        }
    }

    println!(
        "{}: {} records, {} blank, {} unreadable",
        path.display(),
        report.records,
        report.blanks,
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  FAILED {failure}");
    }

    Ok(report)
}
