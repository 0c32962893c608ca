//! Plain data types for extracted content: PDF page text and slide text
//! read back from a written presentation.

use serde::{Deserialize, Serialize};

/// Text extracted from every page of a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfTextDump {
    /// Path or label of the source document.
    pub source: String,

    /// Page count as reported by the PDF library.
    pub page_count: usize,

    /// Pages in document order.
    pub pages: Vec<PageText>,
}

impl PdfTextDump {
    /// Create an empty dump for the given source.
    pub fn new(source: impl Into<String>, page_count: usize) -> Self {
        Self {
            source: source.into(),
            page_count,
            pages: Vec::with_capacity(page_count),
        }
    }

    /// Number of pages that yielded no text.
    pub fn empty_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_empty()).count()
    }
}

/// The text of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number.
    pub number: usize,

    /// Extracted text, `None` if extraction failed or found nothing.
    pub text: Option<String>,
}

impl PageText {
    /// Build a page from raw extractor output. Whitespace-only text counts as empty.
    pub fn new(number: usize, raw: Option<String>) -> Self {
        let text = raw.filter(|t| !t.trim().is_empty());
        Self { number, text }
    }

    /// Length of the text in characters, 0 for an empty page.
    pub fn char_len(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }
}

/// A slide read back from a PPTX package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Name of the slide layout, if it could be resolved.
    pub layout_name: Option<String>,

    /// Text of each shape, in document order.
    pub lines: Vec<SlideText>,

    /// External hyperlink targets referenced by text runs.
    pub hyperlinks: Vec<String>,

    /// Number of embedded pictures.
    pub picture_count: usize,
}

impl ExtractedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            layout_name: None,
            lines: Vec::new(),
            hyperlinks: Vec::new(),
            picture_count: 0,
        }
    }

    /// Add a text line to this slide.
    pub fn add_line(&mut self, text: impl Into<String>) {
        self.lines.push(SlideText::new(text));
    }

    /// The first line, which is the title for every built-in layout that has one.
    pub fn title(&self) -> Option<&str> {
        self.lines.first().map(|l| l.text.as_str())
    }

    /// Get non-empty text lines.
    pub fn non_empty_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// Whether any line contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}

/// Text content from a shape or text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideText {
    /// The actual text content, paragraphs separated by newlines.
    pub text: String,
}

impl SlideText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
