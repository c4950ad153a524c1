use crate::cancel::CancellationToken;
use crate::error::{Result, ScanError};
use crate::extractor::{PdfDocument, PdfExtractor};
use crate::matcher::{MatchPolicy, PageContext, PageFlow};
use crate::reporter::Reporter;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    Finished { matched: bool },
    Cancelled,
}

/// `path` relative to `root`, `"."` when they are the same. Non-UTF-8 names
/// are rendered lossily and logged.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }

    match relative.to_str() {
        Some(text) => text.to_string(),
        None => {
            let lossy = relative.to_string_lossy().to_string();
            warn!(path = ?relative, rendered = %lossy, "path is not valid UTF-8");
            lossy
        }
    }
}

/// Scans one document page by page. The document handle is dropped before
/// this returns, whatever the outcome.
pub fn scan_document<E, W>(
    extractor: &E,
    root: &Path,
    path: &Path,
    policy: &MatchPolicy<'_>,
    reporter: &mut Reporter<W>,
    cancel: &CancellationToken,
) -> Result<DocumentOutcome>
where
    E: PdfExtractor,
    W: Write,
{
    let mut document = extractor.open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "document open");

    let relative = relative_path(root, path);
    let mut matched = false;

    for page in 1..=document.page_count() {
        if cancel.is_cancelled() {
            return Ok(DocumentOutcome::Cancelled);
        }

        let rows = document
            .page_rows(page)
            .map_err(|source| ScanError::PageExtraction {
                path: path.to_path_buf(),
                page,
                source,
            })?;
        let Some(rows) = rows else {
            continue;
        };

        let context = PageContext {
            path: &relative,
            page,
        };
        let scan = policy.scan_page(context, rows, reporter)?;
        matched |= scan.matched_rows > 0;

        if scan.flow == PageFlow::StopDocument {
            break;
        }
    }

    Ok(DocumentOutcome::Finished { matched })
}
