//! Relationship tables (`*.rels` parts) built while rendering a part.

use crate::xml::XmlWriter;
use docgen_core::Result;

const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs.
pub(crate) mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: &'static str,
    target: String,
    external: bool,
}

/// The relationships of a single source part, with sequential `rIdN` ids.
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, rel_type: &'static str, target: String, external: bool) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type,
            target,
            external,
        });
        id
    }

    /// Add an internal relationship and return its id.
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        self.push(rel_type, target.into(), false)
    }

    /// Add an external relationship, reusing an existing one with the same target.
    pub fn add_external(&mut self, rel_type: &'static str, target: &str) -> String {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|r| r.external && r.rel_type == rel_type && r.target == target)
        {
            return existing.id.clone();
        }
        self.push(rel_type, target.to_string(), true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the `.rels` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut w = XmlWriter::new()?;
        w.start("Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
        for rel in &self.entries {
            let mut attrs = vec![
                ("Id", rel.id.as_str()),
                ("Type", rel.rel_type),
                ("Target", rel.target.as_str()),
            ];
            if rel.external {
                attrs.push(("TargetMode", "External"));
            }
            w.empty("Relationship", &attrs)?;
        }
        w.end("Relationships")?;
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut rels = Relationships::new();
        assert_eq!(
            rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
            "rId1"
        );
        assert_eq!(rels.add(rel_types::IMAGE, "../media/image1.png"), "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_external_targets_are_reused() {
        let mut rels = Relationships::new();
        rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml");
        let a = rels.add_external(rel_types::HYPERLINK, "https://example.com/a.git");
        let b = rels.add_external(rel_types::HYPERLINK, "https://example.com/b.git");
        let again = rels.add_external(rel_types::HYPERLINK, "https://example.com/a.git");
        assert_eq!(a, "rId2");
        assert_eq!(b, "rId3");
        assert_eq!(again, a);
        assert_eq!(rels.len(), 3);
    }

    #[test]
    fn test_to_xml_marks_external() {
        let mut rels = Relationships::new();
        rels.add_external(rel_types::HYPERLINK, "https://example.com/?a=1&b=2");
        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(r#"TargetMode="External""#));
        assert!(xml.contains("a=1&amp;b=2"));
    }
}
