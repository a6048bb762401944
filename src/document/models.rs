//! Core data structures for document representation
//!
//! This module defines the typed content elements produced by extraction and
//! consumed by the Markdown renderer, plus the lookup records built from the
//! package's style, numbering and media parts.

use serde::{Deserialize, Serialize};

pub type TableRows = Vec<Vec<String>>;

/// Language tag given to every code block lifted out of a 1x1 table.
pub const DEFAULT_CODE_LANGUAGE: &str = "python";

/// One unit of document content, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentElement {
    Title {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    NumberedListItem {
        text: String,
        level: u32,
        list_id: u32,
    },
    /// Plain paragraph. Empty text is kept as a spacing signal for the renderer.
    Text {
        text: String,
    },
    Image {
        filename: String,
        relative_path: String,
    },
    Code {
        text: String,
        language: String,
    },
    Table {
        rows: TableRows,
    },
}

impl ContentElement {
    pub fn text(text: impl Into<String>) -> Self {
        ContentElement::Text { text: text.into() }
    }

    pub fn list_item(text: impl Into<String>, level: u32, list_id: u32) -> Self {
        ContentElement::NumberedListItem {
            text: text.into(),
            level,
            list_id,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, ContentElement::NumberedListItem { .. })
    }

    /// Text paragraph with something other than whitespace in it
    pub fn is_substantial_text(&self) -> bool {
        matches!(self, ContentElement::Text { text } if !text.trim().is_empty())
    }
}

/// Paragraph role derived from a style's display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Title,
    Heading(u8),
    Text,
}

/// A style definition from `word/styles.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleInfo {
    pub name: String,
    /// The `w:type` attribute (`paragraph`, `character`, `table`, ...)
    pub style_type: String,
}

impl StyleInfo {
    /// Classify by case-insensitive substring match, first match wins.
    pub fn role(&self) -> StyleRole {
        let name = self.name.to_lowercase();
        if name.contains("title") {
            StyleRole::Title
        } else if name.contains("heading 1") {
            StyleRole::Heading(1)
        } else if name.contains("heading 2") {
            StyleRole::Heading(2)
        } else if name.contains("heading 3") {
            StyleRole::Heading(3)
        } else {
            StyleRole::Text
        }
    }
}

/// Deepest list level Word supports (levels 0 through 8)
pub const MAX_LIST_LEVEL: u32 = 8;

/// List membership of a paragraph (`w:numPr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberingRef {
    pub level: u32,
    pub list_id: u32,
}

/// A file found under `word/media/`
#[derive(Debug, Clone)]
pub struct MediaEntry {
    /// Bare file name, e.g. `image1.png`
    pub name: String,
    pub bytes: Vec<u8>,
}

/// An image renamed for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub original_name: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(name: &str) -> StyleInfo {
        StyleInfo {
            name: name.to_string(),
            style_type: "paragraph".to_string(),
        }
    }

    #[test]
    fn test_style_role_classification() {
        assert_eq!(style("Title").role(), StyleRole::Title);
        assert_eq!(style("heading 1").role(), StyleRole::Heading(1));
        assert_eq!(style("Heading 2").role(), StyleRole::Heading(2));
        assert_eq!(style("HEADING 3").role(), StyleRole::Heading(3));
        assert_eq!(style("Normal").role(), StyleRole::Text);
        assert_eq!(style("heading 4").role(), StyleRole::Text);
    }

    #[test]
    fn test_style_role_precedence() {
        // "title" is checked before any heading name
        assert_eq!(style("Subtitle").role(), StyleRole::Title);
        assert_eq!(style("Heading 1 Title").role(), StyleRole::Title);
        // "heading 1" also matches "heading 10"
        assert_eq!(style("heading 10").role(), StyleRole::Heading(1));
    }

    #[test]
    fn test_substantial_text() {
        assert!(ContentElement::text("Hello").is_substantial_text());
        assert!(!ContentElement::text("   ").is_substantial_text());
        assert!(!ContentElement::text("").is_substantial_text());
        assert!(!ContentElement::list_item("x", 0, 1).is_substantial_text());
    }
}
