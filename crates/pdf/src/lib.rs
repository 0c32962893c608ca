//! PDF text extraction backend.
//!
//! Loads PDF documents with `lopdf` and extracts text page by page.

pub mod extractor;

pub use extractor::PdfTextExtractor;
