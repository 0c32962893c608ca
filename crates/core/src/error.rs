//! Error types for PDF text extraction and slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading PDFs or writing presentations.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file. The io error is the source.
    #[error("Failed to access file")]
    IoError(#[from] std::io::Error),

    /// The PDF could not be loaded.
    #[error("PDF error: {0}")]
    PdfError(String),

    /// A slide was requested with a layout index the deck does not have.
    #[error("Unknown slide layout index {index} (deck has {available} layouts)")]
    UnknownLayout { index: usize, available: usize },

    /// A slide has no placeholder with the requested idx.
    #[error("Slide has no placeholder with idx {0}")]
    MissingPlaceholder(u32),

    /// An image could not be probed or has an unsupported format.
    #[error("Image error: {0}")]
    ImageError(String),

    /// Failed to parse a PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML reading or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_io_error_detail_lives_in_source_only() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "disk gone"));
        assert_eq!(err.to_string(), "Failed to access file");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk gone"));
    }
}
