use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),
}

impl From<lopdf::Error> for ExtractError {
    fn from(error: lopdf::Error) -> Self {
        ExtractError::PdfParse(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("open failed for {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("page extraction failed for {path} (page {page}): {source}")]
    PageExtraction {
        path: PathBuf,
        page: u32,
        #[source]
        source: ExtractError,
    },

    #[error("json encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("output write failed: {0}")]
    Output(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScanError {
    /// Errors confined to one document. Best-effort runs skip these and keep walking.
    pub fn is_document_local(&self) -> bool {
        matches!(
            self,
            ScanError::Open { .. } | ScanError::PageExtraction { .. }
        )
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
