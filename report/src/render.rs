//! Paginated plain-text rendering of a [`DocumentReport`].
//!
//! Cosmetic formatter: fixed-column word wrap and a fixed number of lines per
//! page, with a form feed plus repeated title between pages. Reading order
//! and section boundaries are the only guarantees.

use crate::sections::{DocumentReport, MetadataBlock, SectionBlock};

/// Column width for word wrapping.
pub const WRAP_COLUMNS: usize = 80;

/// Body lines per page before a page break is inserted.
pub const LINES_PER_PAGE: usize = 48;

/// Title repeated at the top of every page.
pub const REPORT_TITLE: &str = "Extracted Document Sections";

/// Renders the report as paginated text.
pub fn render_report(report: &DocumentReport) -> String {
    let mut page = PageWriter::new();

    if let Some(metadata) = &report.metadata {
        render_metadata(&mut page, metadata);
    }
    for section in &report.sections {
        render_section(&mut page, section);
    }

    page.finish()
}

fn render_metadata(page: &mut PageWriter, metadata: &MetadataBlock) {
    page.line("Document Information");
    page.line(&format!("Document Type: {}", metadata.document_type));
    page.line(&format!("Total Sections: {}", metadata.total_sections));
    page.line(&format!(
        "Extraction Date: {}",
        metadata.extraction_timestamp
    ));
    page.blank();
}

fn render_section(page: &mut PageWriter, section: &SectionBlock) {
    page.line(&format!(
        "{} (Type: {}, Level: {})",
        section.title, section.section_type, section.hierarchy_level
    ));
    for raw_line in section.body.lines() {
        for wrapped in wrap_line(raw_line, WRAP_COLUMNS) {
            page.line(&wrapped);
        }
    }
    if let Some(word_count) = &section.word_count {
        page.line(&format!("Word Count: {word_count}"));
    }
    page.blank();
}

/// Word-wraps one line to at most `width` columns.
///
/// A single word longer than `width` is emitted on its own line unbroken;
/// this formatter never splits inside a word.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Accumulates lines and inserts page breaks past the per-page threshold.
struct PageWriter {
    out: String,
    lines_on_page: usize,
}

impl PageWriter {
    fn new() -> Self {
        let mut writer = Self {
            out: String::new(),
            lines_on_page: 0,
        };
        writer.page_header();
        writer
    }

    fn page_header(&mut self) {
        self.out.push_str(REPORT_TITLE);
        self.out.push('\n');
        for _ in 0..REPORT_TITLE.len() {
            self.out.push('=');
        }
        self.out.push_str("\n\n");
        self.lines_on_page = 0;
    }

    fn line(&mut self, text: &str) {
        if self.lines_on_page >= LINES_PER_PAGE {
            self.out.push('\u{c}');
            self.page_header();
        }
        self.out.push_str(text);
        self.out.push('\n');
        self.lines_on_page += 1;
    }

    fn blank(&mut self) {
        // Blank separators never trigger a page break of their own.
        self.out.push('\n');
        self.lines_on_page += 1;
    }

    fn finish(self) -> String {
        self.out
    }
}
