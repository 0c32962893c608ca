//! Console report format for PDF text dumps.
//!
//! ```text
//! Pages: 2
//! Page 1 text length: 11
//! --- Page 1 ---
//! Hello World
//! Page 2 text length: 0
//! --- Page 2 is empty ---
//! ```

use crate::types::PageText;
use std::io::{self, Write};

/// Writes the page-by-page text report.
#[derive(Debug, Clone, Default)]
pub struct TextReportFormatter {
    /// Omit page bodies and print only the length lines.
    summary_only: bool,
}

impl TextReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print lengths and empty markers only, without page text.
    pub fn with_summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = summary_only;
        self
    }

    /// Write the page count header.
    pub fn write_header<W: Write>(&self, out: &mut W, page_count: usize) -> io::Result<()> {
        writeln!(out, "Pages: {}", page_count)
    }

    /// Write the block for a single page.
    pub fn write_page<W: Write>(&self, out: &mut W, page: &PageText) -> io::Result<()> {
        writeln!(out, "Page {} text length: {}", page.number, page.char_len())?;

        match page.text.as_deref() {
            Some(text) => {
                if !self.summary_only {
                    writeln!(out, "--- Page {} ---", page.number)?;
                    writeln!(out, "{}", text)?;
                }
            }
            None => writeln!(out, "--- Page {} is empty ---", page.number)?,
        }

        Ok(())
    }

    /// Format a whole report into a string.
    pub fn format(&self, page_count: usize, pages: &[PageText]) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_header(&mut buf, page_count);
        for page in pages {
            let _ = self.write_page(&mut buf, page);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
