//! The resume ledger.
//!
//! One line per finished document, `path<TAB>STATUS`. A later run over the
//! same inputs skips every path already listed, so an interrupted batch can
//! pick up where it stopped.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::BatchError;

/// Verdict written next to each path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
pub enum LedgerStatus {
    /// Every text and link in the document is visible.
    #[strum(serialize = "TEXT_ALL_VISIBLE")]
    AllVisible,
    /// At least one text or link is hidden.
    #[strum(serialize = "FOUND_INVISIBLE")]
    FoundInvisible,
}

impl LedgerStatus {
    /// The status for a document verdict.
    #[must_use]
    pub const fn from_verdict(all_visible: bool) -> Self {
        if all_visible {
            Self::AllVisible
        } else {
            Self::FoundInvisible
        }
    }
}

/// Paths already processed, backed by an append-only file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    processed: HashSet<String>,
}

impl Ledger {
    /// Open the ledger at `path`, loading the paths it lists. A missing
    /// file is an empty ledger and is created on the first append.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Ledger`] if the file exists but can't be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BatchError> {
        let path = path.as_ref().to_path_buf();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(BatchError::Ledger { path, source }),
        };
        let processed: HashSet<String> = content
            .lines()
            .filter_map(|line| line.split('\t').next())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        log::debug!("ledger {} lists {} documents", path.display(), processed.len());
        Ok(Self { path, processed })
    }

    /// Whether `document` was already processed.
    #[must_use]
    pub fn contains(&self, document: &Path) -> bool {
        self.processed.contains(&key(document))
    }

    /// Append `document` with its status.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Ledger`] if the file can't be opened or written.
    pub fn record(&mut self, document: &Path, status: LedgerStatus) -> Result<(), BatchError> {
        let key = key(document);
        let line = format!("{key}\t{status}\n");
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|source| BatchError::Ledger {
                path: self.path.clone(),
                source,
            })?;
        let _ = self.processed.insert(key);
        Ok(())
    }

    /// Number of processed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    /// True if nothing was processed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

fn key(document: &Path) -> String {
    document.display().to_string()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(LedgerStatus::AllVisible.to_string(), "TEXT_ALL_VISIBLE");
        assert_eq!(
            LedgerStatus::from_str("FOUND_INVISIBLE"),
            Ok(LedgerStatus::FoundInvisible)
        );
        assert_eq!(LedgerStatus::from_verdict(false), LedgerStatus::FoundInvisible);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.txt");

        let mut ledger = Ledger::open(&path).unwrap();
        assert!(ledger.is_empty());
        ledger.record(Path::new("a/one.html"), LedgerStatus::AllVisible).unwrap();
        ledger.record(Path::new("b/two.html"), LedgerStatus::FoundInvisible).unwrap();

        let reopened = Ledger::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(reopened.contains(Path::new("b/two.html")));
        assert!(!reopened.contains(Path::new("c/three.html")));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a/one.html\tTEXT_ALL_VISIBLE\nb/two.html\tFOUND_INVISIBLE\n"
        );
    }
}
