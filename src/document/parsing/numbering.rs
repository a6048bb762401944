//! Numbering index built from `word/numbering.xml`
//!
//! Word's level formats (bullet, roman, letter) are deliberately not read:
//! every list renders as decimal. The index only records which list ids the
//! package defines, so references to undefined ids can be reported.

use std::collections::BTreeSet;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::super::package::NUMBERING_PART;
use super::xml::attribute;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct NumberingIndex {
    loaded: bool,
    list_ids: BTreeSet<u32>,
}

impl NumberingIndex {
    /// Parse a numbering part. A missing part yields an unloaded index.
    pub fn load(numbering_xml: Option<&str>) -> Result<Self> {
        match numbering_xml {
            Some(xml) => Self::parse(xml),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let mut list_ids = BTreeSet::new();
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e) | Event::Empty(ref e)) if e.name().as_ref() == b"w:num" => {
                    match attribute(e, b"w:numId").map(|id| id.parse::<u32>()) {
                        Some(Ok(id)) => {
                            list_ids.insert(id);
                        }
                        Some(Err(_)) => log::warn!("Ignoring w:num with a non-numeric id"),
                        None => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::extraction(
                        NUMBERING_PART,
                        format!("{e} at byte {}", reader.buffer_position()),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            loaded: true,
            list_ids,
        })
    }

    /// Whether the package carried numbering data at all
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn defines(&self, list_id: u32) -> bool {
        self.list_ids.contains(&list_id)
    }
}
