//! Page-by-page PDF text extraction.

use docgen_core::{Error, PageText, PdfTextDump, Result};
use lopdf::Document;
use std::path::Path;

/// An opened PDF document ready for text extraction.
pub struct PdfTextExtractor {
    document: Document,
    source: String,
}

impl PdfTextExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, path.display().to_string())
    }

    /// Load a PDF held in memory. `source` is used only for reporting.
    pub fn from_bytes(bytes: &[u8], source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let document =
            Document::load_mem(bytes).map_err(|e| Error::PdfError(format!("{}: {}", source, e)))?;

        if document.is_encrypted() {
            log::warn!("{} is encrypted; extracted text may be empty", source);
        }
        log::debug!(
            "Loaded {} (PDF {}, {} objects)",
            source,
            document.version,
            document.objects.len()
        );

        Ok(Self { document, source })
    }

    /// Label of the loaded document.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of pages reported by the document's page tree.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Extract the text of a single page (1-based).
    ///
    /// Extraction failures are logged and reported as an empty page.
    pub fn extract_page(&self, number: u32) -> PageText {
        let raw = match self.document.extract_text(&[number]) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!(
                    "Text extraction failed for page {} of {}: {}",
                    number,
                    self.source,
                    e
                );
                None
            }
        };
        PageText::new(number as usize, raw)
    }

    /// Iterate over all pages in document order.
    pub fn pages(&self) -> impl Iterator<Item = PageText> + '_ {
        self.document
            .get_pages()
            .into_keys()
            .map(move |number| self.extract_page(number))
    }

    /// Extract every page into a dump.
    pub fn dump(&self) -> PdfTextDump {
        let mut dump = PdfTextDump::new(self.source.clone(), self.page_count());
        dump.pages.extend(self.pages());
        dump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a PDF with one page per entry; `None` produces a page with no text.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => Vec::new(),
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_page_count_matches_document() {
        let bytes = build_pdf(&[Some("one"), Some("two"), None]);
        let extractor = PdfTextExtractor::from_bytes(&bytes, "three.pdf").unwrap();
        assert_eq!(extractor.page_count(), 3);
        assert_eq!(extractor.source(), "three.pdf");
    }

    #[test]
    fn test_extracts_text_in_page_order() {
        let bytes = build_pdf(&[Some("Evacuation Plan"), Some("Assembly Point")]);
        let extractor = PdfTextExtractor::from_bytes(&bytes, "plan.pdf").unwrap();

        let pages: Vec<PageText> = extractor.pages().collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        assert!(pages[0].text.as_deref().unwrap().contains("Evacuation"));
        assert!(pages[1].text.as_deref().unwrap().contains("Assembly"));
    }

    #[test]
    fn test_page_without_text_is_empty() {
        let bytes = build_pdf(&[None]);
        let extractor = PdfTextExtractor::from_bytes(&bytes, "blank.pdf").unwrap();

        let dump = extractor.dump();
        assert_eq!(dump.page_count, 1);
        assert_eq!(dump.pages.len(), 1);
        assert!(dump.pages[0].is_empty());
        assert_eq!(dump.empty_pages(), 1);
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, build_pdf(&[Some("disk")])).unwrap();

        let extractor = PdfTextExtractor::open(&path).unwrap();
        assert_eq!(extractor.page_count(), 1);
        assert!(extractor.source().ends_with("doc.pdf"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = PdfTextExtractor::open("/nonexistent/Emergency.pdf");
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_garbage_is_pdf_error() {
        let result = PdfTextExtractor::from_bytes(b"definitely not a pdf", "junk.pdf");
        match result {
            Err(Error::PdfError(msg)) => assert!(msg.starts_with("junk.pdf")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("garbage loaded as a PDF"),
        }
    }
}
