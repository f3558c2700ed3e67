//! Document discovery and per-document processing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sightline_detect::{DocumentAnalyzer, DocumentReport, build_tree};

use crate::error::BatchError;
use crate::ledger::{Ledger, LedgerStatus};

/// File extensions treated as HTML documents.
const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Where results go.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Directory for per-document JSONL files. When unset, records are
    /// written to the runner's output stream.
    pub output_dir: Option<PathBuf>,
    /// Quarantine directory for documents that hide text.
    pub flagged_dir: Option<PathBuf>,
    /// Print the pruned DOM tree before each document's records.
    pub dump_tree: bool,
}

/// What happened to one input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// All text is visible.
    Visible,
    /// At least one text or link is hidden.
    Flagged,
    /// Already listed in the ledger.
    Skipped,
}

/// Counts for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents with every text visible.
    pub visible: usize,
    /// Documents with hidden text.
    pub flagged: usize,
    /// Documents skipped because the ledger lists them.
    pub skipped: usize,
    /// Documents that failed to read or write.
    pub failed: usize,
}

impl BatchSummary {
    /// Total number of documents seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.visible + self.flagged + self.skipped + self.failed
    }

    fn count(&mut self, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Visible => self.visible += 1,
            DocumentOutcome::Flagged => self.flagged += 1,
            DocumentOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// A document to process, with the directory its output path is taken
/// relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    /// The HTML file.
    pub path: PathBuf,
    /// The input directory it was found under, or its own parent.
    pub base: PathBuf,
}

impl DocumentInput {
    /// `path` relative to `base`. Falls back to the bare file name so the
    /// result can always be joined under an output directory.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        self.path
            .strip_prefix(&self.base)
            .ok()
            .or_else(|| self.path.file_name().map(Path::new))
            .unwrap_or(self.path.as_path())
    }

    /// [`relative_path`](Self::relative_path) with a `.json` extension.
    #[must_use]
    pub fn output_name(&self) -> PathBuf {
        self.relative_path().with_extension("json")
    }
}

/// Expand `inputs` into documents. Directories are scanned recursively for
/// `*.html` and `*.htm` files, in sorted order; files are taken as given.
/// Unreadable directories are logged and skipped.
#[must_use]
pub fn collect_documents(inputs: &[PathBuf]) -> Vec<DocumentInput> {
    let mut documents = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            scan_dir(input, &mut found);
            found.sort();
            documents.extend(found.into_iter().map(|path| DocumentInput {
                path,
                base: input.clone(),
            }));
        } else {
            let base = input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            documents.push(DocumentInput {
                path: input.clone(),
                base,
            });
        }
    }
    documents
}

fn scan_dir(dir: &Path, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot read directory {}: {e}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(&path, found);
        } else if is_html_file(&path) {
            found.push(path);
        }
    }
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            HTML_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Runs the analyzer over many documents, one at a time.
#[derive(Debug)]
pub struct BatchRunner {
    analyzer: DocumentAnalyzer,
    options: BatchOptions,
    ledger: Ledger,
}

impl BatchRunner {
    /// A runner writing per `options` and recording into `ledger`.
    #[must_use]
    pub const fn new(analyzer: DocumentAnalyzer, options: BatchOptions, ledger: Ledger) -> Self {
        Self {
            analyzer,
            options,
            ledger,
        }
    }

    /// The ledger, with every path finished so far.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Process every document under `inputs`. A failing document is logged
    /// and counted; the rest of the batch still runs. Records not written
    /// to an output directory go to `out`.
    pub fn run<W: Write>(&mut self, inputs: &[PathBuf], out: &mut W) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for document in collect_documents(inputs) {
            match self.process(&document, out) {
                Ok(outcome) => summary.count(outcome),
                Err(e) => {
                    log::error!("{}: {e}", document.path.display());
                    summary.failed += 1;
                }
            }
        }
        log::info!(
            "processed {} documents: {} visible, {} flagged, {} skipped, {} failed",
            summary.total(),
            summary.visible,
            summary.flagged,
            summary.skipped,
            summary.failed
        );
        summary
    }

    /// Analyze one document, write its records, quarantine it if flagged
    /// and append it to the ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`BatchError`] if the document can't be read or any output
    /// can't be written. The ledger is only updated on success.
    pub fn process<W: Write>(
        &mut self,
        document: &DocumentInput,
        out: &mut W,
    ) -> Result<DocumentOutcome, BatchError> {
        if self.ledger.contains(&document.path) {
            log::debug!("skipping {}, already in ledger", document.path.display());
            return Ok(DocumentOutcome::Skipped);
        }

        let bytes = fs::read(&document.path).map_err(|source| BatchError::Read {
            path: document.path.clone(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);

        if self.options.dump_tree {
            dump_tree(&html, out).map_err(|source| BatchError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        }

        let report = self.analyzer.analyze_html(&html);
        let jsonl = report.to_jsonl()?;
        self.write_records(document, &jsonl, out)?;

        let outcome = if report.all_visible {
            DocumentOutcome::Visible
        } else {
            self.quarantine(document, &jsonl)?;
            log_hidden(&document.path, &report);
            DocumentOutcome::Flagged
        };

        self.ledger.record(
            &document.path,
            LedgerStatus::from_verdict(report.all_visible),
        )?;
        Ok(outcome)
    }

    fn write_records<W: Write>(
        &self,
        document: &DocumentInput,
        jsonl: &str,
        out: &mut W,
    ) -> Result<(), BatchError> {
        match &self.options.output_dir {
            Some(dir) => write_file(&dir.join(document.output_name()), jsonl.as_bytes()),
            None => out
                .write_all(jsonl.as_bytes())
                .map_err(|source| BatchError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                }),
        }
    }

    /// Copy a flagged document to `<flagged>/htmls/` and its records to
    /// `<flagged>/jsons/`, keeping the layout below the input directory.
    fn quarantine(&self, document: &DocumentInput, jsonl: &str) -> Result<(), BatchError> {
        let Some(dir) = &self.options.flagged_dir else {
            return Ok(());
        };

        let html_target = dir.join("htmls").join(document.relative_path());
        create_parent(&html_target)?;
        let _ = fs::copy(&document.path, &html_target).map_err(|source| BatchError::Write {
            path: html_target.clone(),
            source,
        })?;

        let json_target = dir.join("jsons").join(document.output_name());
        write_file(&json_target, jsonl.as_bytes())
    }
}

fn log_hidden(path: &Path, report: &DocumentReport) {
    for record in report.hidden() {
        log::info!("{}: hidden {} {:?}", path.display(), record.kind(), record.text());
    }
}

fn dump_tree<W: Write>(html: &str, out: &mut W) -> std::io::Result<()> {
    let tree = build_tree(html);
    let mut rendered = String::new();
    sightline_html::print_tree(&tree, tree.root(), 0, &mut rendered)
        .map_err(std::io::Error::other)?;
    out.write_all(rendered.as_bytes())
}

fn create_parent(path: &Path) -> Result<(), BatchError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| BatchError::Write {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), BatchError> {
    create_parent(path)?;
    fs::write(path, contents).map_err(|source| BatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_keeps_relative_layout() {
        let document = DocumentInput {
            path: PathBuf::from("in/a/b/mail.html"),
            base: PathBuf::from("in"),
        };
        assert_eq!(document.output_name(), PathBuf::from("a/b/mail.json"));
    }

    #[test]
    fn test_relative_path_falls_back_to_file_name() {
        let document = DocumentInput {
            path: PathBuf::from("/mail/x/mail.htm"),
            base: PathBuf::from("/elsewhere"),
        };
        assert_eq!(document.relative_path(), Path::new("mail.htm"));
        assert_eq!(document.output_name(), PathBuf::from("mail.json"));
    }

    #[test]
    fn test_html_extensions() {
        assert!(is_html_file(Path::new("x.HTML")));
        assert!(is_html_file(Path::new("x.htm")));
        assert!(!is_html_file(Path::new("x.txt")));
        assert!(!is_html_file(Path::new("html")));
    }
}
