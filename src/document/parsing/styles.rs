//! Style index built from `word/styles.xml`
//!
//! Only the display name and style type are kept; the renderer needs nothing
//! beyond telling titles and headings apart from body text.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::super::models::{StyleInfo, StyleRole};
use super::super::package::STYLES_PART;
use super::xml::attribute;
use crate::error::{Error, Result};

/// Lookup from style id to its definition, scoped to one conversion
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    styles: HashMap<String, StyleInfo>,
}

impl StyleIndex {
    /// Parse a styles part. A missing part yields an empty index.
    pub fn load(styles_xml: Option<&str>) -> Result<Self> {
        match styles_xml {
            Some(xml) => Self::parse(xml),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let mut styles = HashMap::new();
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        // (style id, style type, display name) of the style being read
        let mut current: Option<(Option<String>, String, Option<String>)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:style" => {
                    current = Some(start_style(e));
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:style" => {
                    // A style without children has no name to classify
                    current = None;
                }
                Ok(Event::Start(ref e) | Event::Empty(ref e)) if e.name().as_ref() == b"w:name" => {
                    if let Some((_, _, name)) = current.as_mut() {
                        if name.is_none() {
                            *name = Some(attribute(e, b"w:val").unwrap_or_default());
                        }
                    }
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"w:style" => {
                    if let Some((Some(id), style_type, Some(name))) = current.take() {
                        styles.insert(id, StyleInfo { name, style_type });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::extraction(
                        STYLES_PART,
                        format!("{e} at byte {}", reader.buffer_position()),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Loaded {} style definitions", styles.len());
        Ok(Self { styles })
    }

    pub fn get(&self, style_id: &str) -> Option<&StyleInfo> {
        self.styles.get(style_id)
    }

    /// Role of a paragraph style id; unknown ids are plain text
    pub fn role_of(&self, style_id: &str) -> StyleRole {
        self.get(style_id)
            .map(StyleInfo::role)
            .unwrap_or(StyleRole::Text)
    }
}

fn start_style(e: &BytesStart) -> (Option<String>, String, Option<String>) {
    let id = attribute(e, b"w:styleId").filter(|id| !id.is_empty());
    let style_type = attribute(e, b"w:type").unwrap_or_default();
    (id, style_type, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
  </w:style>
  <w:style w:type="character" w:styleId="Nameless">
    <w:rPr><w:b/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Empty"/>
</w:styles>"#;

    #[test]
    fn test_parse_styles() {
        let index = StyleIndex::parse(STYLES).unwrap();
        assert!(index.get("Normal").is_some());

        let heading = index.get("Heading1").unwrap();
        assert_eq!(heading.name, "heading 1");
        assert_eq!(heading.style_type, "paragraph");

        assert_eq!(index.role_of("Heading1"), StyleRole::Heading(1));
        assert_eq!(index.role_of("Title"), StyleRole::Title);
        assert_eq!(index.role_of("Normal"), StyleRole::Text);
    }

    #[test]
    fn test_styles_without_name_are_skipped() {
        let index = StyleIndex::parse(STYLES).unwrap();
        assert!(index.get("Nameless").is_none());
        assert!(index.get("Empty").is_none());
        assert_eq!(index.role_of("Nameless"), StyleRole::Text);
    }

    #[test]
    fn test_missing_styles_part() {
        let index = StyleIndex::load(None).unwrap();
        assert!(index.get("Normal").is_none());
        assert_eq!(index.role_of("Heading1"), StyleRole::Text);
    }

    #[test]
    fn test_malformed_styles_is_extraction_error() {
        let err = StyleIndex::parse("<w:styles><w:style></w:styles>").unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
