//! Single-document conversion
//!
//! Ties the pipeline together: package -> indexes -> elements -> Markdown.
//! Indexes are built per call and dropped with it; nothing is shared between
//! documents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{
    ContentElement, DEFAULT_CODE_LANGUAGE, DocxPackage, ExtractContext, ExtractedImage,
    ImageMapping, NumberingIndex, StyleIndex, extract_elements, resolve_image_relationships,
};
use crate::error::Result;
use crate::markdown::render_markdown;

/// Knobs that change conversion output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Prefix of image links in the Markdown, relative to the Markdown file
    pub image_link_prefix: String,
    /// Language tag for code blocks taken from 1x1 tables
    pub code_language: String,
    /// Media extensions copied out as images (case-insensitive)
    pub image_extensions: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image_link_prefix: "../images".to_string(),
            code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "bmp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Result of converting one document
#[derive(Debug, Clone)]
pub struct Conversion {
    pub markdown: String,
    pub elements: Vec<ContentElement>,
    /// Renamed images, ready to be written to the images directory
    pub images: Vec<ExtractedImage>,
}

impl Conversion {
    /// Image files referenced from the Markdown, in document order
    pub fn image_references(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                ContentElement::Image { filename, .. } => Some(filename.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert a .docx file; its stem names the extracted images
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        let package = DocxPackage::open(path)?;
        self.convert_package(&document_stem(path), &package)
    }

    pub fn convert_package(&self, doc_stem: &str, package: &DocxPackage) -> Result<Conversion> {
        let (elements, images) = self.extract(doc_stem, package)?;
        let markdown = render_markdown(&elements)?;

        Ok(Conversion {
            markdown,
            elements,
            images: images.into_images(),
        })
    }

    /// Extract content elements and the image mapping without rendering
    pub fn extract(
        &self,
        doc_stem: &str,
        package: &DocxPackage,
    ) -> Result<(Vec<ContentElement>, ImageMapping)> {
        let styles = StyleIndex::load(package.styles_xml.as_deref())?;
        let numbering = NumberingIndex::load(package.numbering_xml.as_deref())?;
        let images = ImageMapping::build(doc_stem, &package.media, &self.options.image_extensions);
        let rid_to_image =
            resolve_image_relationships(package.relationships_xml.as_deref(), &images)?;

        let ctx = ExtractContext {
            styles: &styles,
            numbering: &numbering,
            images: &rid_to_image,
            image_link_prefix: &self.options.image_link_prefix,
            code_language: &self.options.code_language,
        };
        let elements = extract_elements(&package.document_xml, &ctx)?;

        Ok((elements, images))
    }
}

/// File stem of a document path, `document` when it has none
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}
