//! Package loading and validation
//!
//! A .docx file is a zip container. This module reads the parts the converter
//! needs (main document, styles, numbering, document relationships and media)
//! fully into memory, so nothing is ever extracted to disk and the archive
//! handle is released before any parsing starts.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use super::models::MediaEntry;
use crate::error::{Error, Result};

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
pub const MEDIA_FOLDER: &str = "word/media/";

const MEDIA_CAPACITY_HINT: u64 = 1 << 20;

/// The XML parts and media of one word-processing package
#[derive(Debug, Clone)]
pub struct DocxPackage {
    pub document_xml: String,
    pub styles_xml: Option<String>,
    pub numbering_xml: Option<String>,
    pub relationships_xml: Option<String>,
    pub media: Vec<MediaEntry>,
}

impl DocxPackage {
    /// Open a package from a file on disk
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::PackageCorrupt(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Open a package held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let Some(document_xml) = read_part(&mut archive, DOCUMENT_PART)? else {
            // Check if it might be an Excel file
            if archive.by_name("xl/workbook.xml").is_ok() {
                return Err(Error::PackageCorrupt(
                    "this appears to be an Excel file (.xlsx), not a Word document".to_string(),
                ));
            }
            return Err(Error::PackageCorrupt(format!(
                "missing {DOCUMENT_PART}; the file may be corrupted or is not a Word document"
            )));
        };

        let styles_xml = read_part(&mut archive, STYLES_PART)?;
        let numbering_xml = read_part(&mut archive, NUMBERING_PART)?;
        let relationships_xml = read_part(&mut archive, RELATIONSHIPS_PART)?;
        let media = read_media(&mut archive)?;

        Ok(Self {
            document_xml,
            styles_xml,
            numbering_xml,
            relationships_xml,
            media,
        })
    }
}

/// Read a UTF-8 part, `None` when the archive has no entry of that name
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| Error::PackageCorrupt(format!("cannot read {name}: {e}")))?;
    Ok(Some(content))
}

/// Collect files stored directly in the media folder, in archive order
fn read_media<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<MediaEntry>> {
    let mut media = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let Some(name) = entry.name().strip_prefix(MEDIA_FOLDER) else {
            continue;
        };
        if name.is_empty() || name.contains('/') {
            continue;
        }
        let name = name.to_string();

        // The header size is untrusted, so it only seeds the buffer
        let mut bytes = Vec::with_capacity(entry.size().min(MEDIA_CAPACITY_HINT) as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::PackageCorrupt(format!("cannot read media {name}: {e}")))?;
        media.push(MediaEntry { name, bytes });
    }

    Ok(media)
}
