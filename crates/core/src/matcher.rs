use crate::error::Result;
use crate::models::{DetailResult, HitStatus, ScanOptions, SimpleResult, TextRow};
use crate::reporter::Reporter;
use std::io::Write;

/// What the document loop does after a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlow {
    Continue,
    /// First hit in non-verbose mode: the rest of the document is abandoned.
    StopDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageScan {
    pub flow: PageFlow,
    pub matched_rows: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Document path relative to the scan root.
    pub path: &'a str,
    pub page: u32,
}

pub struct MatchPolicy<'a> {
    options: &'a ScanOptions,
}

impl<'a> MatchPolicy<'a> {
    pub fn new(options: &'a ScanOptions) -> Self {
        Self { options }
    }

    pub fn is_hit(&self, line: &str) -> bool {
        line.contains(self.options.search_text.as_str())
    }

    /// Runs the rows of one page in order. Row ordinals start at 1 on every page.
    pub fn scan_page<I, W>(
        &self,
        context: PageContext<'_>,
        rows: I,
        reporter: &mut Reporter<W>,
    ) -> Result<PageScan>
    where
        I: IntoIterator<Item = TextRow>,
        W: Write,
    {
        let mut matched_rows = 0;

        for (line, row) in (1u32..).zip(rows) {
            let text = row.line_text();
            if !self.is_hit(&text) {
                continue;
            }

            matched_rows += 1;

            if !self.options.verbose {
                reporter.report_simple(&SimpleResult {
                    path: context.path.to_string(),
                    status: HitStatus::Hit,
                })?;
                return Ok(PageScan {
                    flow: PageFlow::StopDocument,
                    matched_rows,
                });
            }

            reporter.report_detail(&DetailResult {
                path: context.path.to_string(),
                page: context.page,
                line,
                text,
            })?;
        }

        if matched_rows == 0 && !self.options.only_hit {
            reporter.report_simple(&SimpleResult {
                path: context.path.to_string(),
                status: HitStatus::NoHit,
            })?;
        }

        Ok(PageScan {
            flow: PageFlow::Continue,
            matched_rows,
        })
    }
}
