//! doxmd: Word .docx to Markdown conversion
//!
//! This library reads Word documents (styles, numbering, relationships and
//! embedded media) and renders them as Markdown with headings, emphasis,
//! numbered lists, tables, code blocks and image references.

pub mod batch;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod markdown;

/// Output format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    /// The extracted content elements as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

// Re-export commonly used types
pub use config::Config;
pub use convert::{ConvertOptions, Conversion, Converter};
pub use document::{ContentElement, DocxPackage};
pub use error::{Error, Result};
pub use markdown::render_markdown;
