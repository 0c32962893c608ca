//! High-level slide composition on top of the deck model.

use crate::writer::PptxWriter;
use docgen_core::{Deck, Emu, Error, Font, ImageKind, Picture, Pt, Rect, Result, Slide};
use image::{ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const TITLE_SLIDE_LAYOUT: usize = 0;
const CONTENT_SLIDE_LAYOUT: usize = 1;
const TITLE_ONLY_LAYOUT: usize = 5;

const BODY_PLACEHOLDER_IDX: u32 = 1;
const BULLET_FONT_SIZE: Pt = Pt(18.0);

/// Builds a deck slide by slide using the built-in layouts.
#[derive(Debug, Default)]
pub struct DeckBuilder {
    deck: Deck,
}

impl DeckBuilder {
    /// Create a builder for an empty 10 × 7.5 in deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Title slide with an optional subtitle line.
    ///
    /// The subtitle is only set when the layout provides a second placeholder.
    pub fn add_title_slide(&mut self, title: &str, subtitle: &str) -> Result<&mut Slide> {
        log::info!("Adding title slide: {}", title);
        let slide = self.deck.add_slide(TITLE_SLIDE_LAYOUT)?;
        set_title(slide, title)?;
        if slide.placeholder_count() > 1 {
            slide.placeholder_mut(BODY_PLACEHOLDER_IDX)?.set_text(subtitle);
        }
        Ok(slide)
    }

    /// Title and bulleted body, one level-0 paragraph per bullet at 18 pt.
    pub fn add_content_slide(&mut self, title: &str, bullets: &[&str]) -> Result<&mut Slide> {
        log::info!("Adding content slide: {} ({} bullets)", title, bullets.len());
        let slide = self.deck.add_slide(CONTENT_SLIDE_LAYOUT)?;
        set_title(slide, title)?;

        let body = slide.placeholder_mut(BODY_PLACEHOLDER_IDX)?;
        body.clear();
        for bullet in bullets {
            let paragraph = body.add_paragraph();
            paragraph.set_text(*bullet);
            paragraph.set_level(0);
            paragraph.font = Font {
                size: Some(BULLET_FONT_SIZE),
                ..Font::default()
            };
        }
        Ok(slide)
    }

    /// Title-only slide showing an image, or a notice when the file is missing.
    ///
    /// The picture sits at (1 in, 1.5 in) with a height of 5 in; its width
    /// keeps the image's native aspect ratio.
    pub fn add_image_slide(&mut self, title: &str, image_path: impl AsRef<Path>) -> Result<&mut Slide> {
        let image_path = image_path.as_ref();
        log::info!("Adding image slide: {}", title);
        let slide = self.deck.add_slide(TITLE_ONLY_LAYOUT)?;
        set_title(slide, title)?;

        if image_path.exists() {
            log::info!("Found image: {}", image_path.display());
            let picture = load_picture(image_path)?;
            slide.add_picture(picture);
        } else {
            log::warn!("Image not found: {}", image_path.display());
            slide
                .add_text_box(Rect::from_inches(1.0, 2.0, 8.0, 1.0))
                .set_text(&format!("Image not found: {}", image_path.display()));
        }
        Ok(slide)
    }

    /// Append a blank slide from any built-in layout for manual composition.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<&mut Slide> {
        self.deck.add_slide(layout_index)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn into_deck(self) -> Deck {
        self.deck
    }

    /// Serialize the deck to an in-memory package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PptxWriter::new().to_bytes(&self.deck)
    }

    /// Write the deck to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        PptxWriter::new().save(&self.deck, path)
    }
}

fn set_title(slide: &mut Slide, title: &str) -> Result<()> {
    match slide.title_mut() {
        Some(frame) => {
            frame.set_text(title);
            Ok(())
        }
        None => Err(Error::MissingPlaceholder(0)),
    }
}

fn load_picture(path: &Path) -> Result<Picture> {
    let data = fs::read(path)?;
    let image_error =
        |e: &dyn std::fmt::Display| Error::ImageError(format!("{}: {}", path.display(), e));

    let reader = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .map_err(|e| image_error(&e))?;
    let kind = match reader.format() {
        Some(ImageFormat::Png) => ImageKind::Png,
        Some(ImageFormat::Jpeg) => ImageKind::Jpeg,
        Some(ImageFormat::Gif) => ImageKind::Gif,
        Some(ImageFormat::Bmp) => ImageKind::Bmp,
        Some(other) => return Err(image_error(&format!("unsupported image format {:?}", other))),
        None => return Err(image_error(&"unrecognized image format")),
    };

    let (width_px, height_px) = reader.into_dimensions().map_err(|e| image_error(&e))?;
    if width_px == 0 || height_px == 0 {
        return Err(Error::ImageError(format!("{}: image has no pixels", path.display())));
    }

    let height = Emu::from_inches(5.0);
    let width = Emu(height.get() * i64::from(width_px) / i64::from(height_px));
    log::debug!(
        "Embedding {} ({}x{} px) as {}x{} EMU",
        path.display(),
        width_px,
        height_px,
        width.get(),
        height.get()
    );

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Picture {
        name,
        data,
        kind,
        rect: Rect {
            left: Emu::from_inches(1.0),
            top: Emu::from_inches(1.5),
            width,
            height,
        },
    })
}
