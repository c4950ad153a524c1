pub mod cancel;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod models;
pub mod orchestrator;
pub mod reporter;
pub mod scanner;
pub mod walker;

#[cfg(test)]
mod testing;

pub use cancel::CancellationToken;
pub use error::{ExtractError, ScanError};
pub use extractor::{LopdfDocument, LopdfExtractor, PdfDocument, PdfExtractor};
pub use matcher::{MatchPolicy, PageContext, PageFlow, PageScan};
pub use models::{
    DetailResult, ErrorPolicy, HitStatus, OutputFormat, ScanOptions, ScanReport, ScanStatus,
    SimpleResult, SkippedPdf, TextRow,
};
pub use orchestrator::ScanCoordinator;
pub use reporter::Reporter;
pub use scanner::{scan_document, DocumentOutcome};
pub use walker::{candidate_files, is_candidate_name};
