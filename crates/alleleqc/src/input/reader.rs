//! Line-oriented reading of submission files.
//!
//! Duplicate-line detection is defined over the raw line text, so the reader
//! keeps each data line byte-for-byte as it appeared in the file rather than
//! round-tripping through a field decoder.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AlleleQcError, Result};

/// Metadata about the source submission file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data lines (excluding header).
    pub line_count: usize,
    /// When the QC pass was performed.
    pub analyzed_at: DateTime<Utc>,
}

/// A raw data line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number; the header is line 1, so data starts at 2.
    pub number: usize,
    /// The line text, tab separators intact, without the terminator.
    pub text: String,
}

/// Yields submission lines lazily, in file order, with 1-based numbering.
///
/// The header row is consumed at open time. A source is finite and not
/// restartable; re-reading requires a fresh `open`.
pub struct RecordSource {
    lines: std::vec::IntoIter<RawLine>,
    metadata: SourceMetadata,
}

impl RecordSource {
    /// Open a submission file, hash it, and position past the header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| AlleleQcError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let text = String::from_utf8_lossy(&contents);
        let mut lines: Vec<RawLine> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| RawLine {
                number: idx + 1,
                text: line.to_string(),
            })
            .collect();

        if lines.is_empty() {
            return Err(AlleleQcError::EmptyInput(format!(
                "no lines in {}",
                path.display()
            )));
        }

        // Line 1 is the header.
        lines.remove(0);

        let metadata = SourceMetadata {
            file: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash,
            size_bytes: contents.len() as u64,
            line_count: lines.len(),
            analyzed_at: Utc::now(),
        };

        Ok(Self {
            lines: lines.into_iter(),
            metadata,
        })
    }

    /// Metadata captured at open time.
    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }
}

impl Iterator for RecordSource {
    type Item = RawLine;

    fn next(&mut self) -> Option<RawLine> {
        self.lines.next()
    }
}
