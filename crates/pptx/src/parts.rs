//! Package-level parts: content types, presentation, slide master, layouts
//! and document properties.

use crate::relmap::{rel_types, Relationships};
use crate::slide::{write_group_header, write_placeholder, MediaPart};
use crate::xml::{XmlWriter, PML_NAMESPACES};
use docgen_core::{Deck, ImageKind, Rect, Result, SlideLayout};

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

const MASTER_TITLE_RECT: Rect = Rect::new(457_200, 274_638, 8_229_600, 1_143_000);
const MASTER_BODY_RECT: Rect = Rect::new(457_200, 1_600_200, 8_229_600, 4_525_963);

/// First id in `p:sldIdLst`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;
/// Master and layout ids share a space starting at 2^31.
const FIRST_MASTER_ID: u32 = 2_147_483_648;

/// Name of the application recorded in document properties.
pub(crate) const APPLICATION: &str = "docgen";

/// `[Content_Types].xml`.
pub(crate) fn content_types(deck: &Deck, media: &[MediaPart<'_>]) -> Result<String> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;
    w.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    w.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let mut kinds: Vec<ImageKind> = Vec::new();
    for part in media {
        if !kinds.contains(&part.kind) {
            kinds.push(part.kind);
        }
    }
    for kind in kinds {
        w.empty(
            "Default",
            &[
                ("Extension", kind.extension()),
                ("ContentType", kind.content_type()),
            ],
        )?;
    }

    let overrides = [
        ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
        ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
        ("/docProps/core.xml".to_string(), CT_CORE),
        ("/docProps/app.xml".to_string(), CT_APP),
    ];
    let layouts = (1..=deck.layouts().len())
        .map(|n| (format!("/ppt/slideLayouts/slideLayout{}.xml", n), CT_SLIDE_LAYOUT));
    let slides =
        (1..=deck.slide_count()).map(|n| (format!("/ppt/slides/slide{}.xml", n), CT_SLIDE));

    for (part_name, content_type) in overrides.into_iter().chain(layouts).chain(slides) {
        w.empty(
            "Override",
            &[
                ("PartName", part_name.as_str()),
                ("ContentType", content_type),
            ],
        )?;
    }

    w.end("Types")?;
    w.finish()
}

/// `_rels/.rels`.
pub(crate) fn package_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(rel_types::OFFICE_DOCUMENT, "ppt/presentation.xml");
    rels.add(rel_types::CORE_PROPERTIES, "docProps/core.xml");
    rels.add(rel_types::EXTENDED_PROPERTIES, "docProps/app.xml");
    rels
}

/// `ppt/presentation.xml` together with its relationships.
pub(crate) fn presentation(deck: &Deck) -> Result<(String, Relationships)> {
    let mut rels = Relationships::new();
    let master_rid = rels.add(rel_types::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    rels.add(rel_types::THEME, "theme/theme1.xml");
    let slide_rids: Vec<String> = (1..=deck.slide_count())
        .map(|n| rels.add(rel_types::SLIDE, format!("slides/slide{}.xml", n)))
        .collect();

    let mut w = XmlWriter::new()?;
    let mut attrs = PML_NAMESPACES.to_vec();
    attrs.push(("saveSubsetFonts", "1"));
    w.start("p:presentation", &attrs)?;

    let master_id = FIRST_MASTER_ID.to_string();
    w.start("p:sldMasterIdLst", &[])?;
    w.empty(
        "p:sldMasterId",
        &[("id", master_id.as_str()), ("r:id", master_rid.as_str())],
    )?;
    w.end("p:sldMasterIdLst")?;

    if !slide_rids.is_empty() {
        w.start("p:sldIdLst", &[])?;
        for (offset, rid) in slide_rids.iter().enumerate() {
            let id = (FIRST_SLIDE_ID + offset as u32).to_string();
            w.empty("p:sldId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
        }
        w.end("p:sldIdLst")?;
    }

    let cx = deck.slide_width().get().to_string();
    let cy = deck.slide_height().get().to_string();
    w.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    w.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    w.end("p:presentation")?;

    Ok((w.finish()?, rels))
}

fn write_level_properties(
    w: &mut XmlWriter,
    tag: &str,
    margin: i64,
    size: u32,
    bullet: Option<&str>,
) -> Result<()> {
    let margin = margin.to_string();
    let indent = if bullet.is_some() { "-342900" } else { "0" };
    let size = size.to_string();

    w.start(
        tag,
        &[
            ("marL", margin.as_str()),
            ("indent", indent),
            ("algn", "l"),
            ("defTabSz", "914400"),
        ],
    )?;
    match bullet {
        Some(ch) => {
            w.empty("a:buFont", &[("typeface", "Arial")])?;
            w.empty("a:buChar", &[("char", ch)])?;
        }
        None => w.empty("a:buNone", &[])?,
    }
    w.start("a:defRPr", &[("sz", size.as_str()), ("kern", "1200")])?;
    w.start("a:solidFill", &[])?;
    w.empty("a:schemeClr", &[("val", "tx1")])?;
    w.end("a:solidFill")?;
    w.empty("a:latin", &[("typeface", "+mn-lt")])?;
    w.end("a:defRPr")?;
    w.end(tag)
}

/// `ppt/slideMasters/slideMaster1.xml` together with its relationships.
pub(crate) fn slide_master(deck: &Deck) -> Result<(String, Relationships)> {
    let mut rels = Relationships::new();
    let layout_rids: Vec<String> = (1..=deck.layouts().len())
        .map(|n| {
            rels.add(
                rel_types::SLIDE_LAYOUT,
                format!("../slideLayouts/slideLayout{}.xml", n),
            )
        })
        .collect();
    rels.add(rel_types::THEME, "../theme/theme1.xml");

    let mut w = XmlWriter::new()?;
    w.start("p:sldMaster", &PML_NAMESPACES)?;
    w.start("p:cSld", &[])?;
    w.start("p:bg", &[])?;
    w.start("p:bgRef", &[("idx", "1001")])?;
    w.empty("a:schemeClr", &[("val", "bg1")])?;
    w.end("p:bgRef")?;
    w.end("p:bg")?;
    w.start("p:spTree", &[])?;
    write_group_header(&mut w)?;
    write_placeholder(
        &mut w,
        2,
        "Title Placeholder 1",
        Some("title"),
        0,
        Some(MASTER_TITLE_RECT),
        None,
    )?;
    write_placeholder(
        &mut w,
        3,
        "Text Placeholder 2",
        Some("body"),
        1,
        Some(MASTER_BODY_RECT),
        None,
    )?;
    w.end("p:spTree")?;
    w.end("p:cSld")?;

    w.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    w.start("p:sldLayoutIdLst", &[])?;
    for (offset, rid) in layout_rids.iter().enumerate() {
        let id = (FIRST_MASTER_ID + 1 + offset as u32).to_string();
        w.empty(
            "p:sldLayoutId",
            &[("id", id.as_str()), ("r:id", rid.as_str())],
        )?;
    }
    w.end("p:sldLayoutIdLst")?;

    w.start("p:txStyles", &[])?;
    w.start("p:titleStyle", &[])?;
    write_level_properties(&mut w, "a:lvl1pPr", 0, 4400, None)?;
    w.end("p:titleStyle")?;
    w.start("p:bodyStyle", &[])?;
    let body_levels = [
        ("a:lvl1pPr", 342_900, 3200, "•"),
        ("a:lvl2pPr", 742_950, 2800, "–"),
        ("a:lvl3pPr", 1_143_000, 2400, "•"),
        ("a:lvl4pPr", 1_600_200, 2000, "–"),
        ("a:lvl5pPr", 2_057_400, 2000, "»"),
    ];
    for (tag, margin, size, bullet) in body_levels {
        write_level_properties(&mut w, tag, margin, size, Some(bullet))?;
    }
    w.end("p:bodyStyle")?;
    w.start("p:otherStyle", &[])?;
    write_level_properties(&mut w, "a:lvl1pPr", 0, 1800, None)?;
    w.end("p:otherStyle")?;
    w.end("p:txStyles")?;

    w.end("p:sldMaster")?;
    Ok((w.finish()?, rels))
}

/// `ppt/slideLayouts/slideLayoutN.xml` together with its relationships.
pub(crate) fn slide_layout(layout: &SlideLayout) -> Result<(String, Relationships)> {
    let mut rels = Relationships::new();
    rels.add(rel_types::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");

    let mut w = XmlWriter::new()?;
    let mut attrs = PML_NAMESPACES.to_vec();
    attrs.push(("type", layout.ooxml_type));
    attrs.push(("preserve", "1"));
    w.start("p:sldLayout", &attrs)?;
    w.start("p:cSld", &[("name", layout.name)])?;
    w.start("p:spTree", &[])?;
    write_group_header(&mut w)?;
    for (offset, spec) in layout.placeholders.iter().enumerate() {
        write_placeholder(
            &mut w,
            offset as u32 + 2,
            spec.name,
            spec.kind.ooxml_type(),
            spec.idx,
            Some(spec.rect),
            None,
        )?;
    }
    w.end("p:spTree")?;
    w.end("p:cSld")?;
    w.start("p:clrMapOvr", &[])?;
    w.empty("a:masterClrMapping", &[])?;
    w.end("p:clrMapOvr")?;
    w.end("p:sldLayout")?;

    Ok((w.finish()?, rels))
}

/// `docProps/core.xml`. Timestamps are omitted so output stays reproducible.
pub(crate) fn core_properties(title: &str) -> Result<String> {
    let mut w = XmlWriter::new()?;
    w.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    w.text_element("dc:title", &[], title)?;
    w.text_element("dc:creator", &[], APPLICATION)?;
    w.end("cp:coreProperties")?;
    w.finish()
}

/// `docProps/app.xml`.
pub(crate) fn app_properties(deck: &Deck) -> Result<String> {
    let slides = deck.slide_count().to_string();
    let mut w = XmlWriter::new()?;
    w.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    w.text_element("Application", &[], APPLICATION)?;
    w.text_element("Slides", &[], &slides)?;
    w.text_element("PresentationFormat", &[], "On-screen Show (4:3)")?;
    w.end("Properties")?;
    w.finish()
}
