//! Relationship resolution for embedded images
//!
//! Maps the `r:embed` ids used by drawings to the renamed output files.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::super::images::ImageMapping;
use super::super::package::RELATIONSHIPS_PART;
use super::xml::attribute;
use crate::error::{Error, Result};

/// Relationship targets are relative to `word/`
const MEDIA_TARGET_PREFIX: &str = "media/";

/// Build the rId -> output filename table.
///
/// Only image relationships pointing into the media folder count. Targets
/// that were not mapped (filtered extension, missing entry) are dropped.
pub fn resolve_image_relationships(
    rels_xml: Option<&str>,
    images: &ImageMapping,
) -> Result<HashMap<String, String>> {
    let mut rid_to_image = HashMap::new();
    let Some(xml) = rels_xml else {
        return Ok(rid_to_image);
    };

    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let Some((id, image_name)) = media_image_relationship(e) {
                    match images.new_name(&image_name) {
                        Some(filename) => {
                            rid_to_image.insert(id, filename.to_string());
                        }
                        None => {
                            log::debug!("Relationship {id} points at untracked image {image_name}")
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::extraction(
                    RELATIONSHIPS_PART,
                    format!("{e} at byte {}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rid_to_image)
}

/// `(rId, media file name)` for an image relationship into the media folder
fn media_image_relationship(e: &BytesStart) -> Option<(String, String)> {
    let rel_type = attribute(e, b"Type")?;
    if !rel_type.contains("image") {
        return None;
    }

    let id = attribute(e, b"Id")?;
    let target = attribute(e, b"Target")?;
    let relative = target.strip_prefix(MEDIA_TARGET_PREFIX)?;
    let image_name = relative.rsplit('/').next().unwrap_or(relative);
    Some((id, image_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::MediaEntry;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image2.png"/>
  <Relationship Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="https://example.com/a.png" TargetMode="External"/>
</Relationships>"#;

    fn mapping() -> ImageMapping {
        let media = vec![MediaEntry {
            name: "image1.png".to_string(),
            bytes: b"first".to_vec(),
        }];
        ImageMapping::build("Doc", &media, &["png".to_string()])
    }

    #[test]
    fn test_resolves_tracked_images_only() {
        let images = mapping();
        let table = resolve_image_relationships(Some(RELS), &images).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("rId4").map(String::as_str),
            images.new_name("image1.png")
        );
        // image2.png has no media entry, rId6 is external, rId1 is not an image
        assert!(!table.contains_key("rId5"));
        assert!(!table.contains_key("rId6"));
        assert!(!table.contains_key("rId1"));
    }

    #[test]
    fn test_missing_relationships_part() {
        let table = resolve_image_relationships(None, &mapping()).unwrap();
        assert!(table.is_empty());
    }
}
