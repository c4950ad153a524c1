use crate::error::Result;
use crate::models::{DetailResult, OutputFormat, SimpleResult};
use std::fmt::Write as _;
use std::io::Write;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Writes one line per result to the injected sink, flushing after each line.
pub struct Reporter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn report_simple(&mut self, result: &SimpleResult) -> Result<()> {
        let line = match self.format {
            OutputFormat::Text => render_simple(result),
            OutputFormat::Json => serde_json::to_string(result)?,
        };
        self.write_line(&line)
    }

    pub fn report_detail(&mut self, result: &DetailResult) -> Result<()> {
        let line = match self.format {
            OutputFormat::Text => render_detail(result),
            OutputFormat::Json => serde_json::to_string(result)?,
        };
        self.write_line(&line)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn render_simple(result: &SimpleResult) -> String {
    format!("{}: {}", result.path, result.status.as_str())
}

pub fn render_detail(result: &DetailResult) -> String {
    format!(
        "{} ({:>3},{:>3}): {}",
        result.path,
        result.page,
        result.line,
        quote(&result.text)
    )
}

/// Double-quotes `text`, escaping quotes, backslashes and non-printable characters.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');

    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{0b}' => quoted.push_str("\\v"),
            ch if is_printable(ch) => quoted.push(ch),
            ch if (ch as u32) < 0x80 => {
                let _ = write!(quoted, "\\x{:02x}", ch as u32);
            }
            ch if (ch as u32) <= 0xffff => {
                let _ = write!(quoted, "\\u{:04x}", ch as u32);
            }
            ch => {
                let _ = write!(quoted, "\\U{:08x}", ch as u32);
            }
        }
    }

    quoted.push('"');
    quoted
}

/// Letters, marks, numbers, punctuation and symbols, plus the ASCII space.
fn is_printable(ch: char) -> bool {
    if ch.is_ascii() {
        return ch == ' ' || ch.is_ascii_graphic();
    }

    use GeneralCategory::*;
    matches!(
        get_general_category(ch),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | NonspacingMark
            | SpacingMark
            | EnclosingMark
            | DecimalNumber
            | LetterNumber
            | OtherNumber
            | ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
            | OtherSymbol
    )
}
