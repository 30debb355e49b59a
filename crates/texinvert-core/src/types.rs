//! Common types used across texinvert
//!
//! Batch options, per-file outcomes and the batch report.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Order in which directory entries are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Whatever order the OS directory enumeration yields
    #[default]
    Listing,
    /// Sorted by file name (byte-wise)
    Name,
}

/// What the batch does when one file fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing file
    #[default]
    Abort,
    /// Record the failure and move on to the next file
    Continue,
}

/// A texture selected from the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Full path of the file
    pub path: PathBuf,
    /// File name as shown in logs
    pub name: String,
}

impl TextureEntry {
    /// Create an entry from a full path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Result of processing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Colour channels inverted and written back
    Inverted,
    /// Not touched (dry run)
    Skipped,
    /// Decode or write failed
    Failed,
}

/// Per-file record in a batch report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    pub width: u32,
    pub height: u32,
    /// Bits per channel after normalization
    pub bit_depth: u8,
    pub bytes_written: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    /// Outcome for a file that was inverted and written back
    pub fn inverted(path: impl Into<PathBuf>, width: u32, height: u32, bit_depth: u8, bytes_written: u64) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Inverted,
            width,
            height,
            bit_depth,
            bytes_written,
            error: None,
        }
    }

    /// Outcome for a file left untouched
    pub fn skipped(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Skipped,
            width: 0,
            height: 0,
            bit_depth: 0,
            bytes_written: 0,
            error: None,
        }
    }

    /// Outcome for a file that failed
    pub fn failed(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Failed,
            width: 0,
            height: 0,
            bit_depth: 0,
            bytes_written: 0,
            error: Some(error.to_string()),
        }
    }
}

/// Summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Empty report for `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of files seen
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn inverted(&self) -> usize {
        self.count(FileStatus::Inverted)
    }

    pub fn skipped(&self) -> usize {
        self.count(FileStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    /// Sum of bytes written across all files
    pub fn bytes_written(&self) -> u64 {
        self.outcomes.iter().map(|o| o.bytes_written).sum()
    }

    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Outcomes that failed
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.status == FileStatus::Failed)
    }

    /// `Err(BatchFailed)` when any file failed, the report otherwise
    pub fn into_result(self) -> crate::Result<Self> {
        match self.failed() {
            0 => Ok(self),
            failed => Err(crate::Error::BatchFailed {
                failed,
                total: self.total(),
            }),
        }
    }

    fn count(&self, status: FileStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
