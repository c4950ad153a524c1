//! In-memory provider and PDF fixtures shared by the unit tests.

use crate::error::ExtractError;
use crate::extractor::{PdfDocument, PdfExtractor};
use crate::models::TextRow;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct ProviderLog {
    pub opened: Vec<String>,
    pub released: Vec<String>,
    pub pages_read: Vec<(String, u32)>,
}

#[derive(Debug, Clone, Default)]
pub struct FakePdf {
    /// `None` entries are null pages.
    pub pages: Vec<Option<Vec<TextRow>>>,
    pub fail_open: bool,
    pub fail_on_page: Option<u32>,
}

impl FakePdf {
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|rows| Some(rows.iter().map(|row| TextRow::new([*row])).collect()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }
}

/// Serves `FakePdf`s keyed by file name and records every provider call.
#[derive(Default)]
pub struct FakeExtractor {
    documents: HashMap<String, FakePdf>,
    pub log: Rc<RefCell<ProviderLog>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, pdf: FakePdf) -> Self {
        self.documents.insert(name.to_string(), pdf);
        self
    }
}

pub struct FakeDocument {
    name: String,
    pdf: FakePdf,
    log: Rc<RefCell<ProviderLog>>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl PdfExtractor for FakeExtractor {
    type Document = FakeDocument;

    fn open(&self, path: &Path) -> Result<Self::Document, ExtractError> {
        let name = file_name(path);
        self.log.borrow_mut().opened.push(name.clone());

        let pdf = self.documents.get(&name).cloned().unwrap_or_default();
        if pdf.fail_open {
            return Err(ExtractError::PdfParse(format!("cannot open {name}")));
        }

        Ok(FakeDocument {
            name,
            pdf,
            log: Rc::clone(&self.log),
        })
    }
}

impl PdfDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pdf.pages.len() as u32
    }

    fn page_rows(&mut self, number: u32) -> Result<Option<Vec<TextRow>>, ExtractError> {
        self.log
            .borrow_mut()
            .pages_read
            .push((self.name.clone(), number));

        if self.pdf.fail_on_page == Some(number) {
            return Err(ExtractError::PdfParse(format!("page {number} is corrupt")));
        }

        Ok(self.pdf.pages[(number - 1) as usize].clone())
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.log.borrow_mut().released.push(self.name.clone());
    }
}

/// Writes a real PDF whose pages hold one text object per line.
pub fn write_pdf(path: &Path, pages: &[&[&str]]) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let y = 760 - (index as i64) * 20;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path)?;
    Ok(())
}
