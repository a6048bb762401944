//! Deterministic renaming of embedded media
//!
//! Output names follow `{docName}_{originalStem}_{hash8}{ext}` where `hash8`
//! is the start of the MD5 digest of the image bytes. The same bytes always
//! map to the same name, so documents can share one images directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::models::{ExtractedImage, MediaEntry};
use crate::error::Result;

/// Original media name -> renamed image, for one document
#[derive(Debug, Clone, Default)]
pub struct ImageMapping {
    images: Vec<ExtractedImage>,
    by_original: HashMap<String, usize>,
}

impl ImageMapping {
    /// Rename every media entry whose extension is in `extensions`
    pub fn build(doc_stem: &str, media: &[MediaEntry], extensions: &[String]) -> Self {
        let doc_name = sanitize_doc_name(doc_stem);
        let mut mapping = Self::default();

        for entry in media {
            if !has_image_extension(&entry.name, extensions) {
                log::debug!("Skipping non-image media {}", entry.name);
                continue;
            }

            let filename = image_filename(&doc_name, &entry.name, &entry.bytes);
            mapping
                .by_original
                .insert(entry.name.clone(), mapping.images.len());
            mapping.images.push(ExtractedImage {
                original_name: entry.name.clone(),
                filename,
                bytes: entry.bytes.clone(),
            });
        }

        mapping
    }

    pub fn new_name(&self, original_name: &str) -> Option<&str> {
        self.by_original
            .get(original_name)
            .map(|&index| self.images[index].filename.as_str())
    }

    pub fn into_images(self) -> Vec<ExtractedImage> {
        self.images
    }
}

/// Write renamed images into `dir`, creating it when needed
pub fn write_images(images: &[ExtractedImage], dir: &Path) -> Result<()> {
    if images.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;
    for image in images {
        fs::write(dir.join(&image.filename), &image.bytes)?;
        log::info!("  Extracted image: {}", image.filename);
    }
    Ok(())
}

/// Document stem as used in image names: spaces become `_`, colons are dropped
pub fn sanitize_doc_name(stem: &str) -> String {
    stem.replace(' ', "_").replace(':', "")
}

/// `{docName}_{originalStem}_{hash8}{ext}`
pub fn image_filename(doc_name: &str, original_name: &str, bytes: &[u8]) -> String {
    let path = Path::new(original_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_name);
    let suffix = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let digest = format!("{:x}", md5::compute(bytes));
    format!("{doc_name}_{stem}_{}{suffix}", &digest[..8])
}

fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        ["png", "jpg", "jpeg", "gif", "bmp"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn media(name: &str, bytes: &[u8]) -> MediaEntry {
        MediaEntry {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_image_filename_format() {
        // md5("hello") = 5d41402abc4b2a76b9719d911017c592
        let name = image_filename("Chapter_1", "image1.png", b"hello");
        assert_eq!(name, "Chapter_1_image1_5d41402a.png");
    }

    #[test]
    fn test_filename_is_deterministic() {
        let first = image_filename("Doc", "image3.jpeg", b"same bytes");
        let second = image_filename("Doc", "image3.jpeg", b"same bytes");
        let other = image_filename("Doc", "image3.jpeg", b"other bytes");
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_sanitize_doc_name() {
        assert_eq!(sanitize_doc_name("Chapter 2: Routing"), "Chapter_2_Routing");
        assert_eq!(sanitize_doc_name("plain"), "plain");
    }

    #[test]
    fn test_build_filters_extensions() {
        let entries = vec![
            media("image1.PNG", b"a"),
            media("image2.emf", b"b"),
            media("image3.jpg", b"c"),
        ];
        let mapping = ImageMapping::build("My Doc", &entries, &extensions());

        assert_eq!(mapping.clone().into_images().len(), 2);
        assert!(mapping.new_name("image2.emf").is_none());
        let png = mapping.new_name("image1.PNG").unwrap();
        assert!(png.starts_with("My_Doc_image1_"));
        assert!(png.ends_with(".PNG"));
        assert!(mapping.new_name("image3.jpg").unwrap().ends_with(".jpg"));
    }

    #[test]
    fn test_write_images() {
        let dir = tempfile::tempdir().unwrap();
        let images_dir = dir.path().join("images");
        let mapping = ImageMapping::build("Doc", &[media("image1.gif", b"GIF89a")], &extensions());

        let written = images_dir.join(mapping.new_name("image1.gif").unwrap());
        write_images(&mapping.into_images(), &images_dir).unwrap();

        assert_eq!(fs::read(written).unwrap(), b"GIF89a");
    }
}
