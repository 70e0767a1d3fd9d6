//! @ai:module:intent Scan files and directory trees, collecting findings per file
//! @ai:module:layer application
//! @ai:module:public_api scan_file, scan_directory, FileReport, ScanReport, ScanFailure
//! @ai:module:depends_on scanner, config, category, error
//! @ai:module:stateless true

use crate::category::Severity;
use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::scanner::{Finding, Scanner};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Findings of one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
}

/// @ai:intent A file that could not be scanned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub message: String,
}

/// @ai:intent Result of scanning a file or directory
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScanReport {
    pub files_checked: usize,
    pub files: Vec<FileReport>,
    pub failures: Vec<ScanFailure>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl FileReport {
    /// @ai:intent Count findings of one severity
    /// @ai:effects pure
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}

impl ScanReport {
    /// @ai:intent Check if the scan found no error-severity markers
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// @ai:intent Total number of findings across all files
    pub fn total_findings(&self) -> usize {
        self.errors + self.warnings + self.infos
    }

    /// @ai:intent Record one scanned file and update counts
    pub fn add_file(&mut self, file: FileReport) {
        self.files_checked += 1;
        self.errors += file.count(Severity::Error);
        self.warnings += file.count(Severity::Warning);
        self.infos += file.count(Severity::Info);

        if !file.findings.is_empty() {
            self.files.push(file);
        }
    }

    /// @ai:intent Merge another report into this one
    pub fn merge(&mut self, other: ScanReport) {
        self.files_checked += other.files_checked;
        self.files.extend(other.files);
        self.failures.extend(other.failures);
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
    }
}

/// @ai:intent Scan a single file
/// @ai:pre path is a readable UTF-8 text file
/// @ai:effects fs:read
pub fn scan_file(path: &Path, scanner: &Scanner) -> Result<FileReport> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let findings = scanner.scan_bytes(&bytes).map_err(|e| match e {
        Error::InvalidInput(message) => {
            Error::InvalidInput(format!("{}: {}", path.display(), message))
        }
        other => other,
    })?;

    tracing::debug!("Scanned {}: {} findings", path.display(), findings.len());

    Ok(FileReport {
        path: path.to_path_buf(),
        findings,
    })
}

/// @ai:intent Scan a file as a one-file report, recording failure instead of returning it
/// @ai:effects fs:read
pub fn scan_path(path: &Path, scanner: &Scanner) -> ScanReport {
    let mut report = ScanReport::default();

    match scan_file(path, scanner) {
        Ok(file) => report.add_file(file),
        Err(e) => {
            tracing::warn!("Skipping {}: {}", path.display(), e);
            report.failures.push(ScanFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    }

    report
}

/// @ai:intent Scan every file with a configured extension under a directory
/// @ai:post a failing file is listed in failures and the walk continues
/// @ai:effects fs:read
pub fn scan_directory(path: &Path, config: &ScanConfig, scanner: &Scanner) -> Result<ScanReport> {
    if !path.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", path.display()),
        )));
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();

        if config.matches_extension(file_path) {
            report.merge(scan_path(file_path, scanner));
        }
    }

    Ok(report)
}
