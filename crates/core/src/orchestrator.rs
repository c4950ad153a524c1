use crate::cancel::CancellationToken;
use crate::error::{Result, ScanError};
use crate::extractor::PdfExtractor;
use crate::matcher::MatchPolicy;
use crate::models::{ErrorPolicy, ScanOptions, ScanReport, ScanStatus, SkippedPdf};
use crate::reporter::Reporter;
use crate::scanner::{scan_document, DocumentOutcome};
use crate::walker::candidate_files;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Drives one scan: walker, then scanner per candidate, in walk order.
pub struct ScanCoordinator<E>
where
    E: PdfExtractor,
{
    extractor: E,
    options: ScanOptions,
    cancel: CancellationToken,
}

impl<E> ScanCoordinator<E>
where
    E: PdfExtractor,
{
    pub fn new(extractor: E, options: ScanOptions) -> Self {
        Self {
            extractor,
            options,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn run<W: Write>(
        &self,
        root: &Path,
        reporter: &mut Reporter<W>,
    ) -> Result<ScanReport> {
        if self.options.search_text.is_empty() {
            return Err(ScanError::InvalidArgument(
                "search text is empty".to_string(),
            ));
        }

        let root = std::path::absolute(root).map_err(|error| {
            ScanError::InvalidArgument(format!("cannot resolve {}: {error}", root.display()))
        })?;
        let policy = MatchPolicy::new(&self.options);
        let mut report = ScanReport::new();

        for candidate in candidate_files(&root) {
            if self.cancel.is_cancelled() {
                report.status = ScanStatus::Cancelled;
                break;
            }

            let path = match candidate {
                Ok(path) => path,
                Err(error) if self.best_effort() && error.depth() > 0 => {
                    let path = error.path().map(Path::to_path_buf).unwrap_or_default();
                    self.skip(&mut report, path, ScanError::Walk(error));
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            let outcome = scan_document(
                &self.extractor,
                &root,
                &path,
                &policy,
                reporter,
                &self.cancel,
            );

            match outcome {
                Ok(DocumentOutcome::Finished { matched }) => {
                    report.documents_scanned += 1;
                    if matched {
                        report.documents_with_hits += 1;
                    }
                }
                Ok(DocumentOutcome::Cancelled) => {
                    report.status = ScanStatus::Cancelled;
                    break;
                }
                Err(error) if self.best_effort() && error.is_document_local() => {
                    self.skip(&mut report, path, error);
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            root = %root.display(),
            status = ?report.status,
            documents_scanned = report.documents_scanned,
            documents_with_hits = report.documents_with_hits,
            skipped = report.skipped_files.len(),
            "scan finished"
        );

        Ok(report)
    }

    fn best_effort(&self) -> bool {
        self.options.error_policy == ErrorPolicy::BestEffort
    }

    fn skip(&self, report: &mut ScanReport, path: PathBuf, error: ScanError) {
        warn!(path = %path.display(), reason = %error, "skipped pdf");
        report.skipped_files.push(SkippedPdf {
            path,
            reason: error.to_string(),
        });
    }
}
