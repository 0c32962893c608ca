//! Thin helper over `quick_xml::Writer` for emitting OOXML parts.

use docgen_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Namespace declarations shared by presentation, master, layout and slide parts.
pub(crate) const PML_NAMESPACES: [(&str, &str); 3] = [
    ("xmlns:a", NS_DRAWING),
    ("xmlns:r", NS_RELATIONSHIPS),
    ("xmlns:p", NS_MAIN),
];

/// Streaming XML writer producing a UTF-8 string.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Create a writer and emit the standalone XML declaration.
    pub fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::with_capacity(4096)),
        };
        writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::XmlError(e.to_string()))
    }

    /// Open an element.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(element))
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(element))
    }

    /// Close an element.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Write escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.event(Event::Text(BytesText::new(text)))
    }

    /// Write `<name attrs>text</name>`.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Finish and return the document.
    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.inner.into_inner())
            .map_err(|e| Error::XmlError(format!("Generated XML is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut w = XmlWriter::new().unwrap();
        w.start("a:p", &[("name", "R&D \"x\"")]).unwrap();
        w.text_element("a:t", &[], "<Admin> & Officer").unwrap();
        w.end("a:p").unwrap();
        let xml = w.finish().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains("&lt;Admin&gt; &amp; Officer"));
        assert!(xml.contains("R&amp;D &quot;x&quot;"));
    }

    #[test]
    fn test_empty_text_writes_nothing() {
        let mut w = XmlWriter::new().unwrap();
        w.text_element("a:t", &[], "").unwrap();
        let xml = w.finish().unwrap();
        assert!(xml.ends_with("<a:t></a:t>"));
    }

    #[test]
    fn test_keeps_emoji() {
        let mut w = XmlWriter::new().unwrap();
        w.text_element("a:t", &[], "🎯 Objective").unwrap();
        assert!(w.finish().unwrap().contains("🎯 Objective"));
    }
}
