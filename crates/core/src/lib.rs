//! Core error type, units, presentation object model and text report
//! formatting shared by the PDF dumper and the slide deck generator.

pub mod deck;
pub mod error;
pub mod report;
pub mod types;
pub mod units;

pub use deck::{
    Deck, Font, ImageKind, Paragraph, Picture, PlaceholderKind, RgbColor, Shape, Slide,
    SlideLayout, TextFrame, TextRun,
};
pub use error::{Error, Result};
pub use report::TextReportFormatter;
pub use types::{ExtractedSlide, PageText, PdfTextDump, SlideText};
pub use units::{Emu, Pt, Rect};
