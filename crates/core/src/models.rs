use serde::Serialize;
use std::path::PathBuf;

/// One row of text as segmented by the extraction provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRow {
    pub fragments: Vec<String>,
}

impl TextRow {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Fragments concatenated in provider order.
    pub fn line_text(&self) -> String {
        self.fragments.concat()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum HitStatus {
    #[serde(rename = "HIT")]
    Hit,
    #[serde(rename = "NO HIT")]
    NoHit,
}

impl HitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HitStatus::Hit => "HIT",
            HitStatus::NoHit => "NO HIT",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SimpleResult {
    pub path: String,
    #[serde(rename = "text")]
    pub status: HitStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailResult {
    pub path: String,
    pub page: u32,
    pub line: u32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Any traversal or extraction error aborts the run.
    #[default]
    FailFast,
    /// Per-document failures are recorded and the walk continues.
    BestEffort,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub search_text: String,
    pub verbose: bool,
    pub only_hit: bool,
    pub format: OutputFormat,
    pub error_policy: ErrorPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            verbose: false,
            only_hit: true,
            format: OutputFormat::Text,
            error_policy: ErrorPolicy::FailFast,
        }
    }
}

impl ScanOptions {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SkippedPdf {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub status: ScanStatus,
    pub documents_scanned: usize,
    pub documents_with_hits: usize,
    pub skipped_files: Vec<SkippedPdf>,
}

impl ScanReport {
    pub(crate) fn new() -> Self {
        Self {
            status: ScanStatus::Completed,
            documents_scanned: 0,
            documents_with_hits: 0,
            skipped_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_result_serializes_exact_fields() {
        let result = DetailResult {
            path: "a.pdf".to_string(),
            page: 2,
            line: 5,
            text: "hello world".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["path"], "a.pdf");
        assert_eq!(object["page"], 2);
        assert_eq!(object["line"], 5);
        assert_eq!(object["text"], "hello world");
    }

    #[test]
    fn simple_result_puts_status_under_text() {
        let result = SimpleResult {
            path: "dir/b.pdf".to_string(),
            status: HitStatus::NoHit,
        };

        let encoded = serde_json::to_string(&result).unwrap();
        assert_eq!(encoded, r#"{"path":"dir/b.pdf","text":"NO HIT"}"#);
    }

    #[test]
    fn row_text_keeps_fragment_order() {
        let row = TextRow::new(["TO", "TAL", " 42"]);
        assert_eq!(row.line_text(), "TOTAL 42");
        assert_eq!(TextRow::default().line_text(), "");
    }
}
