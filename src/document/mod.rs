//! Document parsing and data structures module
//!
//! This module reads a Word (.docx) package and converts its body into a
//! sequence of typed content elements ready for Markdown rendering.

pub mod extract;
pub mod images;
pub mod models;
pub mod package;
pub mod parsing;

pub use extract::{ExtractContext, extract_elements};
pub use images::{ImageMapping, write_images};
pub use models::*;
pub use package::DocxPackage;
pub use parsing::numbering::NumberingIndex;
pub use parsing::relationships::resolve_image_relationships;
pub use parsing::styles::StyleIndex;
