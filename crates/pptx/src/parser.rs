//! Reads a PPTX package back into per-slide text, links and picture counts.

use docgen_core::{Error, ExtractedSlide, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX package from a reader, returning its slides in order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<ExtractedSlide>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("Package lists {} slides", slide_order.len());

        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            slides.push(self.parse_slide(&mut archive, slide_path, idx + 1)?);
        }
        Ok(slides)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = read_relationships(&rels_content)?
            .into_iter()
            .filter(|rel| rel.rel_type.ends_with("/slide"))
            .map(|rel| {
                // Relationship ids are assigned in slide order.
                let order = extract_slide_number(&rel.id).or_else(|| extract_slide_number(&rel.target));
                (resolve_target("ppt", &rel.target), order)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ExtractedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let rels = match self.read_file_from_archive(archive, &rels_path_for(slide_path)) {
            Ok(xml) => read_relationships(&xml)?,
            Err(_) => Vec::new(),
        };
        let rel_targets: HashMap<&str, &Relationship> =
            rels.iter().map(|r| (r.id.as_str(), r)).collect();

        let mut slide = ExtractedSlide::new(slide_number);
        let contents = extract_slide_contents(&content)?;
        for text in contents.shape_texts {
            slide.add_line(text);
        }
        slide.picture_count = contents.picture_count;
        for rid in contents.hyperlink_ids {
            match rel_targets.get(rid.as_str()) {
                Some(rel) if !slide.hyperlinks.contains(&rel.target) => {
                    slide.hyperlinks.push(rel.target.clone())
                }
                Some(_) => {}
                None => log::warn!("{}: unresolved hyperlink relationship {}", slide_path, rid),
            }
        }

        let dir = slide_path.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
        if let Some(layout) = rels.iter().find(|r| r.rel_type.ends_with("/slideLayout")) {
            let layout_path = resolve_target(dir, &layout.target);
            match self.read_file_from_archive(archive, &layout_path) {
                Ok(xml) => slide.layout_name = read_common_slide_name(&xml),
                Err(e) => log::warn!("{}: {}", slide_path, e),
            }
        }

        Ok(slide)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

fn read_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = unescape_attr(&value),
                        _ => {}
                    }
                }
                rels.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// What a slide part contains, in document order.
#[derive(Debug, Default)]
struct SlideContents {
    shape_texts: Vec<String>,
    hyperlink_ids: Vec<String>,
    picture_count: usize,
}

/// Walk a slide's shape tree.
///
/// Text is taken only from `a:t` elements and is not trimmed, so leading
/// spaces inside runs survive. Each shape with text yields one entry whose
/// paragraphs are joined with `\n`.
fn extract_slide_contents(xml_content: &str) -> Result<SlideContents> {
    let mut contents = SlideContents::default();
    let mut reader = Reader::from_str(xml_content);

    let mut in_shape = false;
    let mut in_run_text = false;
    let mut paragraphs: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    in_shape = true;
                    paragraphs.clear();
                }
                b"pic" => contents.picture_count += 1,
                b"p" if in_shape => paragraphs.push(String::new()),
                b"t" => in_run_text = true,
                b"br" => push_line_break(&mut paragraphs),
                b"hlinkClick" => push_hyperlink_id(e, &mut contents),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"p" if in_shape => paragraphs.push(String::new()),
                b"br" => push_line_break(&mut paragraphs),
                b"hlinkClick" => push_hyperlink_id(e, &mut contents),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_run_text => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(format!("Bad text in slide: {}", e)))?;
                if let Some(current) = paragraphs.last_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    let text = paragraphs.join("\n");
                    if !text.trim().is_empty() {
                        contents.shape_texts.push(text);
                    }
                    paragraphs.clear();
                    in_shape = false;
                }
                b"t" => in_run_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::PptxParseError(format!(
                    "Error parsing slide XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(contents)
}

fn push_line_break(paragraphs: &mut [String]) {
    if let Some(current) = paragraphs.last_mut() {
        current.push('\n');
    }
}

fn push_hyperlink_id(e: &quick_xml::events::BytesStart<'_>, contents: &mut SlideContents) {
    for attr in e.attributes().flatten() {
        if local_name(attr.key.as_ref()) == b"id" {
            contents
                .hyperlink_ids
                .push(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
}

/// The `name` attribute of `p:cSld`, which carries a layout's display name.
fn read_common_slide_name(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if local_name(e.name().as_ref()) == b"cSld" =>
            {
                return e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == b"name")
                    .map(|a| unescape_attr(&String::from_utf8_lossy(&a.value)));
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn unescape_attr(value: &str) -> String {
    quick_xml::escape::unescape(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// `ppt/slides/slide3.xml` -> `ppt/slides/_rels/slide3.xml.rels`.
fn rels_path_for(part_path: &str) -> String {
    match part_path.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_path),
    }
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
