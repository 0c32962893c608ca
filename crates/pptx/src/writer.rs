//! Serializes a [`Deck`] into a PPTX package.

use crate::parts;
use crate::slide::{render_slide, MediaStore};
use crate::theme::THEME_XML;
use docgen_core::{Deck, Error, Result};
use std::fs::{self, File};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Writer for PPTX (Office Open XML) packages.
///
/// Entries are written in a fixed order with a fixed timestamp, so the same
/// deck always produces the same bytes.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `deck` as a package into `writer` and hand the writer back.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let mut media = MediaStore::new();

        let mut slide_parts = Vec::with_capacity(deck.slide_count());
        for slide in deck.slides() {
            let (xml, rels) = render_slide(slide, slide.layout_index() + 1, &mut media)?;
            log::debug!(
                "Rendered slide {} with {} relationships",
                slide_parts.len() + 1,
                rels.len()
            );
            slide_parts.push((xml, rels.to_xml()?));
        }

        let title = deck
            .slides()
            .iter()
            .find_map(|s| s.title())
            .unwrap_or_default();

        put(&mut zip, "[Content_Types].xml", parts::content_types(deck, media.parts())?.as_bytes())?;
        put(&mut zip, "_rels/.rels", parts::package_relationships().to_xml()?.as_bytes())?;
        put(&mut zip, "docProps/core.xml", parts::core_properties(&title)?.as_bytes())?;
        put(&mut zip, "docProps/app.xml", parts::app_properties(deck)?.as_bytes())?;

        let (presentation, presentation_rels) = parts::presentation(deck)?;
        put(&mut zip, "ppt/presentation.xml", presentation.as_bytes())?;
        put(&mut zip, "ppt/_rels/presentation.xml.rels", presentation_rels.to_xml()?.as_bytes())?;

        let (master, master_rels) = parts::slide_master(deck)?;
        put(&mut zip, "ppt/slideMasters/slideMaster1.xml", master.as_bytes())?;
        put(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master_rels.to_xml()?.as_bytes(),
        )?;

        for (offset, layout) in deck.layouts().iter().enumerate() {
            let number = offset + 1;
            let (xml, rels) = parts::slide_layout(layout)?;
            put(
                &mut zip,
                &format!("ppt/slideLayouts/slideLayout{}.xml", number),
                xml.as_bytes(),
            )?;
            put(
                &mut zip,
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", number),
                rels.to_xml()?.as_bytes(),
            )?;
        }

        put(&mut zip, "ppt/theme/theme1.xml", THEME_XML.as_bytes())?;

        for (offset, (xml, rels)) in slide_parts.iter().enumerate() {
            let number = offset + 1;
            put(&mut zip, &format!("ppt/slides/slide{}.xml", number), xml.as_bytes())?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                rels.as_bytes(),
            )?;
        }

        for part in media.parts() {
            put(&mut zip, &format!("ppt/media/{}", part.file_name), part.data)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Serialize `deck` to an in-memory package.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        Ok(self.write(deck, Cursor::new(Vec::new()))?.into_inner())
    }

    /// Save `deck` to `path`, creating missing parent directories and
    /// replacing any existing file.
    pub fn save(&self, deck: &Deck, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = self.to_bytes(deck)?;
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn put<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, data: &[u8]) -> Result<()> {
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    zip.start_file(name, options)
        .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
    zip.write_all(data)?;
    Ok(())
}
