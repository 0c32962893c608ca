//! Rendering of slide parts and the DrawingML shapes they contain.

use crate::relmap::{rel_types, Relationships};
use crate::xml::{XmlWriter, PML_NAMESPACES};
use docgen_core::{
    Font, ImageKind, Paragraph, Picture, Rect, Result, Shape, Slide, TextFrame,
};

/// A media file referenced from a slide, stored under `ppt/media/`.
#[derive(Debug)]
pub(crate) struct MediaPart<'a> {
    /// File name inside `ppt/media/`, e.g. `image1.png`.
    pub file_name: String,
    pub kind: ImageKind,
    pub data: &'a [u8],
}

/// Collects media parts across all slides so names are unique per package.
#[derive(Debug, Default)]
pub(crate) struct MediaStore<'a> {
    parts: Vec<MediaPart<'a>>,
}

impl<'a> MediaStore<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a picture and return its target relative to a slide part.
    fn add(&mut self, picture: &'a Picture) -> String {
        let file_name = format!(
            "image{}.{}",
            self.parts.len() + 1,
            picture.kind.extension()
        );
        let target = format!("../media/{}", file_name);
        self.parts.push(MediaPart {
            file_name,
            kind: picture.kind,
            data: &picture.data,
        });
        target
    }

    pub fn parts(&self) -> &[MediaPart<'a>] {
        &self.parts
    }
}

/// Write the mandatory group-shape header of a shape tree.
pub(crate) fn write_group_header(w: &mut XmlWriter) -> Result<()> {
    w.start("p:nvGrpSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    w.empty("p:cNvGrpSpPr", &[])?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvGrpSpPr")?;

    w.start("p:grpSpPr", &[])?;
    w.start("a:xfrm", &[])?;
    w.empty("a:off", &[("x", "0"), ("y", "0")])?;
    w.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    w.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    w.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    w.end("a:xfrm")?;
    w.end("p:grpSpPr")
}

pub(crate) fn write_xfrm(w: &mut XmlWriter, rect: Rect) -> Result<()> {
    let (x, y) = (rect.left.get().to_string(), rect.top.get().to_string());
    let (cx, cy) = (rect.width.get().to_string(), rect.height.get().to_string());
    w.start("a:xfrm", &[])?;
    w.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    w.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    w.end("a:xfrm")
}

fn write_rect_geometry(w: &mut XmlWriter) -> Result<()> {
    w.start("a:prstGeom", &[("prst", "rect")])?;
    w.empty("a:avLst", &[])?;
    w.end("a:prstGeom")
}

/// Write `a:rPr` / `a:defRPr` for a font, with an optional hyperlink relationship.
fn write_character_properties(
    w: &mut XmlWriter,
    tag: &str,
    font: &Font,
    hyperlink_rid: Option<&str>,
) -> Result<()> {
    let size = font.size.map(|s| s.centipoints().to_string());

    let mut attrs = vec![("lang", "en-US")];
    if let Some(size) = size.as_deref() {
        attrs.push(("sz", size));
    }
    if let Some(bold) = font.bold {
        attrs.push(("b", if bold { "1" } else { "0" }));
    }
    if let Some(underline) = font.underline {
        attrs.push(("u", if underline { "sng" } else { "none" }));
    }
    attrs.push(("dirty", "0"));

    if font.color.is_none() && hyperlink_rid.is_none() {
        return w.empty(tag, &attrs);
    }

    w.start(tag, &attrs)?;
    if let Some(color) = font.color {
        let hex = color.hex();
        w.start("a:solidFill", &[])?;
        w.empty("a:srgbClr", &[("val", hex.as_str())])?;
        w.end("a:solidFill")?;
    }
    if let Some(rid) = hyperlink_rid {
        w.empty("a:hlinkClick", &[("r:id", rid)])?;
    }
    w.end(tag)
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph, rels: &mut Relationships) -> Result<()> {
    w.start("a:p", &[])?;

    if paragraph.level > 0 || !paragraph.font.is_empty() {
        let level = paragraph.level.to_string();
        let mut attrs = Vec::new();
        if paragraph.level > 0 {
            attrs.push(("lvl", level.as_str()));
        }
        if paragraph.font.is_empty() {
            w.empty("a:pPr", &attrs)?;
        } else {
            w.start("a:pPr", &attrs)?;
            write_character_properties(w, "a:defRPr", &paragraph.font, None)?;
            w.end("a:pPr")?;
        }
    }

    for run in &paragraph.runs {
        let font = run.font.merged_over(&paragraph.font);
        let rid = run
            .hyperlink
            .as_deref()
            .map(|url| rels.add_external(rel_types::HYPERLINK, url));

        // Newlines inside a run become soft line breaks.
        for (n, line) in run.text.split('\n').enumerate() {
            if n > 0 {
                w.start("a:br", &[])?;
                write_character_properties(w, "a:rPr", &font, None)?;
                w.end("a:br")?;
            }
            w.start("a:r", &[])?;
            write_character_properties(w, "a:rPr", &font, rid.as_deref())?;
            w.text_element("a:t", &[], line)?;
            w.end("a:r")?;
        }
    }

    w.end("a:p")
}

fn write_text_body(
    w: &mut XmlWriter,
    frame: &TextFrame,
    text_box: bool,
    rels: &mut Relationships,
) -> Result<()> {
    w.start("p:txBody", &[])?;
    if text_box {
        w.start("a:bodyPr", &[("wrap", "none")])?;
        w.empty("a:spAutoFit", &[])?;
        w.end("a:bodyPr")?;
    } else {
        w.empty("a:bodyPr", &[])?;
    }
    w.empty("a:lstStyle", &[])?;
    for paragraph in frame.paragraphs() {
        write_paragraph(w, paragraph, rels)?;
    }
    w.end("p:txBody")
}

/// Write a placeholder `p:sp`.
///
/// Layout and master placeholders carry an explicit `rect`; slide placeholders
/// inherit position from their layout and pass `None`. Without a body an
/// empty paragraph is written.
pub(crate) fn write_placeholder(
    w: &mut XmlWriter,
    id: u32,
    name: &str,
    ph_type: Option<&str>,
    idx: u32,
    rect: Option<Rect>,
    body: Option<(&TextFrame, &mut Relationships)>,
) -> Result<()> {
    let id = id.to_string();
    let idx = idx.to_string();
    let mut ph_attrs = Vec::new();
    if let Some(ph_type) = ph_type {
        ph_attrs.push(("type", ph_type));
    }
    if idx != "0" {
        ph_attrs.push(("idx", idx.as_str()));
    }

    w.start("p:sp", &[])?;
    w.start("p:nvSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", id.as_str()), ("name", name)])?;
    w.start("p:cNvSpPr", &[])?;
    w.empty("a:spLocks", &[("noGrp", "1")])?;
    w.end("p:cNvSpPr")?;
    w.start("p:nvPr", &[])?;
    w.empty("p:ph", &ph_attrs)?;
    w.end("p:nvPr")?;
    w.end("p:nvSpPr")?;

    match rect {
        Some(rect) => {
            w.start("p:spPr", &[])?;
            write_xfrm(w, rect)?;
            w.end("p:spPr")?;
        }
        None => w.empty("p:spPr", &[])?,
    }

    match body {
        Some((frame, rels)) => write_text_body(w, frame, false, rels)?,
        None => {
            w.start("p:txBody", &[])?;
            w.empty("a:bodyPr", &[])?;
            w.empty("a:lstStyle", &[])?;
            w.empty("a:p", &[])?;
            w.end("p:txBody")?;
        }
    }

    w.end("p:sp")
}

fn write_text_box(
    w: &mut XmlWriter,
    id: u32,
    rect: Rect,
    frame: &TextFrame,
    rels: &mut Relationships,
) -> Result<()> {
    let name = format!("TextBox {}", id - 1);
    let id = id.to_string();

    w.start("p:sp", &[])?;
    w.start("p:nvSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    w.empty("p:cNvSpPr", &[("txBox", "1")])?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvSpPr")?;

    w.start("p:spPr", &[])?;
    write_xfrm(w, rect)?;
    write_rect_geometry(w)?;
    w.empty("a:noFill", &[])?;
    w.end("p:spPr")?;

    write_text_body(w, frame, true, rels)?;
    w.end("p:sp")
}

fn write_picture(w: &mut XmlWriter, id: u32, picture: &Picture, rid: &str) -> Result<()> {
    let name = format!("Picture {}", id - 1);
    let id = id.to_string();

    w.start("p:pic", &[])?;
    w.start("p:nvPicPr", &[])?;
    w.empty(
        "p:cNvPr",
        &[("id", id.as_str()), ("name", name.as_str()), ("descr", picture.name.as_str())],
    )?;
    w.start("p:cNvPicPr", &[])?;
    w.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    w.end("p:cNvPicPr")?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvPicPr")?;

    w.start("p:blipFill", &[])?;
    w.empty("a:blip", &[("r:embed", rid)])?;
    w.start("a:stretch", &[])?;
    w.empty("a:fillRect", &[])?;
    w.end("a:stretch")?;
    w.end("p:blipFill")?;

    w.start("p:spPr", &[])?;
    write_xfrm(w, picture.rect)?;
    write_rect_geometry(w)?;
    w.end("p:spPr")?;
    w.end("p:pic")
}

/// Render a slide part and its relationships.
///
/// `layout_number` is the 1-based number of the layout part. Pictures are
/// registered in `media`.
pub(crate) fn render_slide<'a>(
    slide: &'a Slide,
    layout_number: usize,
    media: &mut MediaStore<'a>,
) -> Result<(String, Relationships)> {
    let mut rels = Relationships::new();
    rels.add(
        rel_types::SLIDE_LAYOUT,
        format!("../slideLayouts/slideLayout{}.xml", layout_number),
    );

    let mut w = XmlWriter::new()?;
    w.start("p:sld", &PML_NAMESPACES)?;
    w.start("p:cSld", &[])?;
    w.start("p:spTree", &[])?;
    write_group_header(&mut w)?;

    for (offset, shape) in slide.shapes().iter().enumerate() {
        // Id 1 belongs to the group shape.
        let id = offset as u32 + 2;
        match shape {
            Shape::Placeholder(ph) => write_placeholder(
                &mut w,
                id,
                ph.spec.name,
                ph.spec.kind.ooxml_type(),
                ph.spec.idx,
                None,
                Some((&ph.text_frame, &mut rels)),
            )?,
            Shape::TextBox(tb) => write_text_box(&mut w, id, tb.rect, &tb.text_frame, &mut rels)?,
            Shape::Picture(picture) => {
                let target = media.add(picture);
                let rid = rels.add(rel_types::IMAGE, target);
                write_picture(&mut w, id, picture, &rid)?;
            }
        }
    }

    w.end("p:spTree")?;
    w.end("p:cSld")?;
    w.start("p:clrMapOvr", &[])?;
    w.empty("a:masterClrMapping", &[])?;
    w.end("p:clrMapOvr")?;
    w.end("p:sld")?;

    Ok((w.finish()?, rels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::{Deck, Pt, RgbColor};

    #[test]
    fn test_render_title_slide() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(0).unwrap();
        slide.title_mut().unwrap().set_text("University E-Voting System");
        slide.placeholder_mut(1).unwrap().set_text("Milestone One\nDecember 2025");

        let mut media = MediaStore::new();
        let (xml, rels) = render_slide(&deck.slides()[0], 1, &mut media).unwrap();

        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:t>University E-Voting System</a:t>"));
        assert!(xml.contains("<a:t>December 2025</a:t>"));
        assert_eq!(rels.len(), 1);
        assert!(rels.to_xml().unwrap().contains("slideLayout1.xml"));
        assert!(media.parts().is_empty());
    }

    #[test]
    fn test_render_hyperlink_run() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(1).unwrap();
        let body = slide.placeholder_mut(1).unwrap();
        body.clear();
        let paragraph = body.add_paragraph();
        paragraph.font.size = Some(Pt(18.0));
        let run = paragraph.add_run();
        run.text = "Evoting-Backend-API".to_string();
        run.font.color = Some(RgbColor(0, 0, 255));
        run.font.underline = Some(true);
        run.set_hyperlink("https://github.com/JDanielZ5G/Evoting-Backend-API.git");

        let mut media = MediaStore::new();
        let (xml, rels) = render_slide(&deck.slides()[0], 2, &mut media).unwrap();

        assert!(xml.contains(r#"<a:defRPr lang="en-US" sz="1800" dirty="0"/>"#));
        assert!(xml.contains(r#"<a:rPr lang="en-US" sz="1800" u="sng" dirty="0">"#));
        assert!(xml.contains(r#"<a:srgbClr val="0000FF"/>"#));
        assert!(xml.contains(r#"<a:hlinkClick r:id="rId2"/>"#));

        let rels_xml = rels.to_xml().unwrap();
        assert!(rels_xml.contains("https://github.com/JDanielZ5G/Evoting-Backend-API.git"));
        assert!(rels_xml.contains(r#"TargetMode="External""#));
    }

    #[test]
    fn test_render_newline_in_run_as_line_break() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(6).unwrap();
        slide
            .add_text_box(Rect::from_inches(1.0, 1.0, 4.0, 1.0))
            .add_paragraph()
            .set_text("Questions?\nMilestone One");

        let mut media = MediaStore::new();
        let (xml, _) = render_slide(&deck.slides()[0], 7, &mut media).unwrap();

        assert!(!xml.contains("Questions?\n"));
        assert!(xml.contains(
            r#"<a:t>Questions?</a:t></a:r><a:br><a:rPr lang="en-US" dirty="0"/></a:br><a:r>"#
        ));
        assert!(xml.contains("<a:t>Milestone One</a:t>"));
    }

    #[test]
    fn test_render_picture_registers_media() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(5).unwrap();
        slide.add_picture(Picture {
            name: "erd.png".to_string(),
            data: vec![1, 2, 3],
            kind: ImageKind::Png,
            rect: Rect::from_inches(1.0, 1.5, 5.0, 5.0),
        });

        let mut media = MediaStore::new();
        let (xml, rels) = render_slide(&deck.slides()[0], 6, &mut media).unwrap();

        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"descr="erd.png""#));
        assert!(xml.contains(r#"<a:off x="914400" y="1371600"/>"#));
        assert_eq!(media.parts().len(), 1);
        assert_eq!(media.parts()[0].file_name, "image1.png");
        assert!(rels.to_xml().unwrap().contains("../media/image1.png"));
    }

    #[test]
    fn test_render_text_box() {
        let mut deck = Deck::new();
        let slide = deck.add_slide(5).unwrap();
        slide
            .add_text_box(Rect::from_inches(1.0, 2.0, 8.0, 1.0))
            .set_text("Image not found: docs/images/erd.png");

        let mut media = MediaStore::new();
        let (xml, _) = render_slide(&deck.slides()[0], 6, &mut media).unwrap();

        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"name="TextBox 2""#));
        assert!(xml.contains("<a:t>Image not found: docs/images/erd.png</a:t>"));
    }
}
