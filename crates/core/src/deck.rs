//! In-memory presentation model.
//!
//! A [`Deck`] owns a fixed set of built-in slide layouts and an ordered list
//! of slides. Slides are created from a layout and receive one empty
//! placeholder per layout placeholder; text is then filled in through
//! [`TextFrame`], [`Paragraph`] and [`TextRun`].

use crate::error::{Error, Result};
use crate::units::{Emu, Pt, Rect};

/// The kind of content a placeholder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Centered title used on title slides.
    CenteredTitle,
    /// Regular slide title.
    Title,
    /// Subtitle on title slides.
    Subtitle,
    /// Body text / bulleted content.
    Body,
    /// Picture drop zone.
    Picture,
}

impl PlaceholderKind {
    /// The `type` attribute value used in `<p:ph>`, `None` for body.
    pub fn ooxml_type(self) -> Option<&'static str> {
        match self {
            Self::CenteredTitle => Some("ctrTitle"),
            Self::Title => Some("title"),
            Self::Subtitle => Some("subTitle"),
            Self::Body => None,
            Self::Picture => Some("pic"),
        }
    }

    /// Whether this placeholder is the slide title.
    pub fn is_title(self) -> bool {
        matches!(self, Self::CenteredTitle | Self::Title)
    }
}

/// A placeholder definition on a slide layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderSpec {
    pub kind: PlaceholderKind,
    /// Placeholder index; titles use 0.
    pub idx: u32,
    pub name: &'static str,
    pub rect: Rect,
}

impl PlaceholderSpec {
    const fn new(kind: PlaceholderKind, idx: u32, name: &'static str, rect: Rect) -> Self {
        Self {
            kind,
            idx,
            name,
            rect,
        }
    }
}

/// A named slide template.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    pub name: &'static str,
    /// Value for the layout's `type` attribute.
    pub ooxml_type: &'static str,
    pub placeholders: Vec<PlaceholderSpec>,
}

const TITLE_RECT: Rect = Rect::new(457_200, 274_638, 8_229_600, 1_143_000);
const BODY_RECT: Rect = Rect::new(457_200, 1_600_200, 8_229_600, 4_525_963);

/// The layouts every new deck starts with, in index order.
pub fn builtin_layouts() -> Vec<SlideLayout> {
    use PlaceholderKind::{Body, CenteredTitle, Subtitle, Title};

    let title = || PlaceholderSpec::new(Title, 0, "Title 1", TITLE_RECT);

    vec![
        SlideLayout {
            name: "Title Slide",
            ooxml_type: "title",
            placeholders: vec![
                PlaceholderSpec::new(
                    CenteredTitle,
                    0,
                    "Title 1",
                    Rect::new(685_800, 2_130_425, 7_772_400, 1_470_025),
                ),
                PlaceholderSpec::new(
                    Subtitle,
                    1,
                    "Subtitle 2",
                    Rect::new(1_371_600, 3_886_200, 6_400_800, 1_752_600),
                ),
            ],
        },
        SlideLayout {
            name: "Title and Content",
            ooxml_type: "obj",
            placeholders: vec![
                title(),
                PlaceholderSpec::new(Body, 1, "Content Placeholder 2", BODY_RECT),
            ],
        },
        SlideLayout {
            name: "Section Header",
            ooxml_type: "secHead",
            placeholders: vec![
                PlaceholderSpec::new(
                    Title,
                    0,
                    "Title 1",
                    Rect::new(722_313, 4_406_900, 7_772_400, 1_362_075),
                ),
                PlaceholderSpec::new(
                    Body,
                    1,
                    "Text Placeholder 2",
                    Rect::new(722_313, 2_906_713, 7_772_400, 1_500_187),
                ),
            ],
        },
        SlideLayout {
            name: "Two Content",
            ooxml_type: "twoObj",
            placeholders: vec![
                title(),
                PlaceholderSpec::new(
                    Body,
                    1,
                    "Content Placeholder 2",
                    Rect::new(457_200, 1_600_200, 4_038_600, 4_525_963),
                ),
                PlaceholderSpec::new(
                    Body,
                    2,
                    "Content Placeholder 3",
                    Rect::new(4_648_200, 1_600_200, 4_038_600, 4_525_963),
                ),
            ],
        },
        SlideLayout {
            name: "Comparison",
            ooxml_type: "twoTxTwoObj",
            placeholders: vec![
                title(),
                PlaceholderSpec::new(
                    Body,
                    1,
                    "Text Placeholder 2",
                    Rect::new(457_200, 1_535_113, 4_040_188, 639_762),
                ),
                PlaceholderSpec::new(
                    Body,
                    2,
                    "Content Placeholder 3",
                    Rect::new(457_200, 2_174_875, 4_040_188, 3_951_288),
                ),
                PlaceholderSpec::new(
                    Body,
                    3,
                    "Text Placeholder 4",
                    Rect::new(4_645_025, 1_535_113, 4_041_775, 639_762),
                ),
                PlaceholderSpec::new(
                    Body,
                    4,
                    "Content Placeholder 5",
                    Rect::new(4_645_025, 2_174_875, 4_041_775, 3_951_288),
                ),
            ],
        },
        SlideLayout {
            name: "Title Only",
            ooxml_type: "titleOnly",
            placeholders: vec![title()],
        },
        SlideLayout {
            name: "Blank",
            ooxml_type: "blank",
            placeholders: Vec::new(),
        },
        SlideLayout {
            name: "Content with Caption",
            ooxml_type: "objTx",
            placeholders: vec![
                PlaceholderSpec::new(
                    Title,
                    0,
                    "Title 1",
                    Rect::new(457_200, 273_050, 3_008_313, 1_162_050),
                ),
                PlaceholderSpec::new(
                    Body,
                    1,
                    "Content Placeholder 2",
                    Rect::new(3_575_050, 273_050, 5_111_750, 5_853_113),
                ),
                PlaceholderSpec::new(
                    Body,
                    2,
                    "Text Placeholder 3",
                    Rect::new(457_200, 1_435_100, 3_008_313, 4_691_063),
                ),
            ],
        },
        SlideLayout {
            name: "Picture with Caption",
            ooxml_type: "picTx",
            placeholders: vec![
                PlaceholderSpec::new(
                    Title,
                    0,
                    "Title 1",
                    Rect::new(1_792_288, 4_800_600, 5_486_400, 566_738),
                ),
                PlaceholderSpec::new(
                    PlaceholderKind::Picture,
                    1,
                    "Picture Placeholder 2",
                    Rect::new(1_792_288, 612_775, 5_486_400, 4_114_800),
                ),
                PlaceholderSpec::new(
                    Body,
                    2,
                    "Text Placeholder 3",
                    Rect::new(1_792_288, 5_367_338, 5_486_400, 804_862),
                ),
            ],
        },
    ]
}

/// A 24-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Upper-case hex form used by `<a:srgbClr val="...">`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Character formatting. Unset fields inherit from the enclosing level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub size: Option<Pt>,
    pub color: Option<RgbColor>,
    pub underline: Option<bool>,
    pub bold: Option<bool>,
}

impl Font {
    /// Layer `self` over `base`: fields set here win.
    pub fn merged_over(&self, base: &Font) -> Font {
        Font {
            size: self.size.or(base.size),
            color: self.color.or(base.color),
            underline: self.underline.or(base.underline),
            bold: self.bold.or(base.bold),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Font::default()
    }
}

/// A span of uniformly formatted text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    /// External hyperlink target.
    pub hyperlink: Option<String>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the run's hyperlink address.
    pub fn set_hyperlink(&mut self, address: impl Into<String>) {
        self.hyperlink = Some(address.into());
    }
}

/// A paragraph of runs at an outline level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    /// Outline level, 0 through 8.
    pub level: u8,
    /// Paragraph-level formatting applied to runs that don't override it.
    pub font: Font,
}

impl Paragraph {
    /// Replace all runs with a single unformatted run.
    ///
    /// A `\n` in `text` stays in the run and is written as a line break
    /// within the paragraph; use [`TextFrame::set_text`] for separate
    /// paragraphs.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.runs = vec![TextRun::new(text)];
    }

    /// Append an empty run and return it.
    pub fn add_run(&mut self) -> &mut TextRun {
        self.runs.push(TextRun::default());
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Set the outline level, clamped to 0..=8.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(8);
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The text container of a placeholder or text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with one paragraph per line of `text`.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text
            .split('\n')
            .map(|line| {
                let mut paragraph = Paragraph::default();
                paragraph.set_text(line);
                paragraph
            })
            .collect();
    }

    /// Remove all content, leaving a single empty paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.truncate(1);
        if let Some(first) = self.paragraphs.first_mut() {
            first.runs.clear();
        }
    }

    /// Append a new empty paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Image container formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageKind {
    /// File extension used for the media part.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// MIME content type.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }
}

/// An embedded picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub name: String,
    pub data: Vec<u8>,
    pub kind: ImageKind,
    pub rect: Rect,
}

/// A placeholder instance on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderShape {
    pub spec: PlaceholderSpec,
    pub text_frame: TextFrame,
}

/// A free-standing text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub text_frame: TextFrame,
}

/// Anything that can sit on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Placeholder(PlaceholderShape),
    TextBox(TextBox),
    Picture(Picture),
}

impl Shape {
    /// The shape's text frame, if it has one.
    pub fn text_frame(&self) -> Option<&TextFrame> {
        match self {
            Shape::Placeholder(ph) => Some(&ph.text_frame),
            Shape::TextBox(tb) => Some(&tb.text_frame),
            Shape::Picture(_) => None,
        }
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    layout_index: usize,
    shapes: Vec<Shape>,
}

impl Slide {
    fn from_layout(layout_index: usize, layout: &SlideLayout) -> Self {
        let shapes = layout
            .placeholders
            .iter()
            .map(|spec| {
                Shape::Placeholder(PlaceholderShape {
                    spec: spec.clone(),
                    text_frame: TextFrame::new(),
                })
            })
            .collect();

        Self {
            layout_index,
            shapes,
        }
    }

    /// Index of the layout this slide was created from.
    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The title placeholder's text frame, if the layout has a title.
    pub fn title_mut(&mut self) -> Option<&mut TextFrame> {
        self.shapes.iter_mut().find_map(|shape| match shape {
            Shape::Placeholder(ph) if ph.spec.kind.is_title() => Some(&mut ph.text_frame),
            _ => None,
        })
    }

    /// The title text, if the slide has a title placeholder.
    pub fn title(&self) -> Option<String> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Placeholder(ph) if ph.spec.kind.is_title() => Some(ph.text_frame.text()),
            _ => None,
        })
    }

    /// Look up a placeholder's text frame by its idx.
    pub fn placeholder_mut(&mut self, idx: u32) -> Result<&mut TextFrame> {
        self.shapes
            .iter_mut()
            .find_map(|shape| match shape {
                Shape::Placeholder(ph) if ph.spec.idx == idx => Some(&mut ph.text_frame),
                _ => None,
            })
            .ok_or(Error::MissingPlaceholder(idx))
    }

    /// Number of placeholders on the slide.
    pub fn placeholder_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Placeholder(_)))
            .count()
    }

    /// Add a text box and return its text frame.
    pub fn add_text_box(&mut self, rect: Rect) -> &mut TextFrame {
        self.shapes.push(Shape::TextBox(TextBox {
            rect,
            text_frame: TextFrame::new(),
        }));
        match self.shapes.last_mut() {
            Some(Shape::TextBox(tb)) => &mut tb.text_frame,
            _ => unreachable!("text box was just pushed"),
        }
    }

    pub fn add_picture(&mut self, picture: Picture) {
        self.shapes.push(Shape::Picture(picture));
    }

    /// Pictures on this slide, in shape order.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Picture(p) => Some(p),
            _ => None,
        })
    }
}

/// A presentation being authored.
#[derive(Debug, Clone)]
pub struct Deck {
    slide_width: Emu,
    slide_height: Emu,
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Create an empty 10" x 7.5" deck with the built-in layouts.
    pub fn new() -> Self {
        Self {
            slide_width: Emu::from_inches(10.0),
            slide_height: Emu::from_inches(7.5),
            layouts: builtin_layouts(),
            slides: Vec::new(),
        }
    }

    pub fn set_slide_size(&mut self, width: Emu, height: Emu) {
        self.slide_width = width;
        self.slide_height = height;
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }

    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Get a layout by index.
    pub fn layout(&self, index: usize) -> Result<&SlideLayout> {
        self.layouts.get(index).ok_or(Error::UnknownLayout {
            index,
            available: self.layouts.len(),
        })
    }

    /// Append a slide built from the given layout.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<&mut Slide> {
        let layout = self.layout(layout_index)?;
        log::debug!(
            "Adding slide {} with layout '{}'",
            self.slides.len() + 1,
            layout.name
        );
        let slide = Slide::from_layout(layout_index, layout);
        self.slides.push(slide);
        let last = self.slides.len() - 1;
        Ok(&mut self.slides[last])
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_defaults() {
        let deck = Deck::new();
        assert_eq!(deck.slide_width(), Emu(9_144_000));
        assert_eq!(deck.slide_height(), Emu(6_858_000));
        assert_eq!(deck.layouts().len(), 9);
        assert_eq!(deck.layout(0).unwrap().name, "Title Slide");
        assert_eq!(deck.layout(5).unwrap().name, "Title Only");
        assert_eq!(deck.layout(6).unwrap().name, "Blank");
        assert_eq!(deck.slide_count(), 0);
    }

    #[test]
    fn test_unknown_layout() {
        let mut deck = Deck::new();
        let err = deck.add_slide(42).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownLayout {
                index: 42,
                available: 9
            }
        ));
        assert_eq!(deck.slide_count(), 0);
    }

    #[test]
    fn test_slide_gets_layout_placeholders() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(1).unwrap();
        assert_eq!(slide.placeholder_count(), 2);
        assert!(slide.title_mut().is_some());
        assert!(slide.placeholder_mut(1).is_ok());
        assert!(matches!(
            slide.placeholder_mut(7),
            Err(Error::MissingPlaceholder(7))
        ));

        let blank = deck.add_slide(6).unwrap();
        assert_eq!(blank.placeholder_count(), 0);
        assert!(blank.title_mut().is_none());
    }

    #[test]
    fn test_at_most_one_title_per_layout() {
        for layout in builtin_layouts() {
            let titles = layout
                .placeholders
                .iter()
                .filter(|p| p.kind.is_title())
                .count();
            assert!(titles <= 1, "{} has {} titles", layout.name, titles);
        }
    }

    #[test]
    fn test_text_frame_set_text_splits_lines() {
        let mut frame = TextFrame::new();
        frame.set_text("Milestone One\nDecember 2025");
        assert_eq!(frame.paragraphs().len(), 2);
        assert_eq!(frame.paragraphs()[1].text(), "December 2025");
        assert_eq!(frame.text(), "Milestone One\nDecember 2025");
    }

    #[test]
    fn test_text_frame_clear_keeps_one_paragraph() {
        let mut frame = TextFrame::new();
        frame.set_text("a\nb\nc");
        frame.clear();
        assert_eq!(frame.paragraphs().len(), 1);
        assert_eq!(frame.text(), "");

        frame.add_paragraph().set_text("first bullet");
        assert_eq!(frame.paragraphs().len(), 2);
        assert_eq!(frame.text(), "\nfirst bullet");
    }

    #[test]
    fn test_paragraph_runs() {
        let mut paragraph = Paragraph::default();
        paragraph.add_run().text = "Backend API: ".to_string();
        let link = paragraph.add_run();
        link.text = "Evoting-Backend-API".to_string();
        link.set_hyperlink("https://example.com/repo.git");
        assert_eq!(paragraph.text(), "Backend API: Evoting-Backend-API");
        assert_eq!(
            paragraph.runs[1].hyperlink.as_deref(),
            Some("https://example.com/repo.git")
        );

        paragraph.set_level(12);
        assert_eq!(paragraph.level, 8);
    }

    #[test]
    fn test_font_merge() {
        let paragraph_font = Font {
            size: Some(Pt(18.0)),
            bold: Some(true),
            ..Font::default()
        };
        let run_font = Font {
            size: Some(Pt(24.0)),
            color: Some(RgbColor(0, 0, 255)),
            ..Font::default()
        };
        let merged = run_font.merged_over(&paragraph_font);
        assert_eq!(merged.size, Some(Pt(24.0)));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.color, Some(RgbColor(0, 0, 255)));
        assert!(Font::default().is_empty());
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(RgbColor(0, 0, 255).hex(), "0000FF");
        assert_eq!(RgbColor(255, 16, 1).hex(), "FF1001");
    }

    #[test]
    fn test_add_text_box() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(5).unwrap();
        slide
            .add_text_box(Rect::from_inches(1.0, 2.0, 8.0, 1.0))
            .set_text("Image not found: x.png");
        assert_eq!(slide.shapes().len(), 2);
        assert_eq!(
            slide.shapes()[1].text_frame().map(TextFrame::text),
            Some("Image not found: x.png".to_string())
        );
        assert_eq!(slide.pictures().count(), 0);
    }
}
