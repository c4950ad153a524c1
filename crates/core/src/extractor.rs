use crate::error::ExtractError;
use crate::models::TextRow;
use lopdf::{Document, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Opens documents for row-by-row text access.
pub trait PdfExtractor {
    type Document: PdfDocument;

    fn open(&self, path: &Path) -> Result<Self::Document, ExtractError>;
}

/// An open document. Dropping the handle releases it.
pub trait PdfDocument {
    fn page_count(&self) -> u32;

    /// Rows of the 1-based page `number`, or `None` when the page is null or
    /// missing from the page tree.
    fn page_rows(&mut self, number: u32) -> Result<Option<Vec<TextRow>>, ExtractError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

pub struct LopdfDocument {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfExtractor for LopdfExtractor {
    type Document = LopdfDocument;

    fn open(&self, path: &Path) -> Result<Self::Document, ExtractError> {
        let document = Document::load(path)?;
        let pages = document.get_pages();

        Ok(LopdfDocument { document, pages })
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_rows(&mut self, number: u32) -> Result<Option<Vec<TextRow>>, ExtractError> {
        let Some(page_id) = self.pages.get(&number).copied() else {
            return Ok(None);
        };

        if self.document.get_dictionary(page_id).is_err() {
            return Ok(None);
        }

        let text = self.document.extract_text(&[number])?;
        Ok(Some(rows_from_text(&text)))
    }
}

/// lopdf ends every text object with a newline, so each non-blank line is a row.
fn rows_from_text(text: &str) -> Vec<TextRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| TextRow::new([line]))
        .collect()
}
