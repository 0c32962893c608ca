//! PPTX (Office Open XML) backend: package writer, deck builder and a
//! read-back parser.
//!
//! A PPTX file is a ZIP archive of XML parts. The writer emits one slide
//! master, the built-in layouts, a theme and one part per slide.

pub mod builder;
pub mod parser;
mod parts;
mod relmap;
mod slide;
mod theme;
pub mod writer;
mod xml;

pub use builder::DeckBuilder;
pub use parser::PptxParser;
pub use writer::PptxWriter;
