//! Element extraction
//!
//! Converts the raw body nodes of a document into typed content elements,
//! resolving paragraph styles, numbering and image relationships on the way.

use std::collections::HashMap;

use super::models::*;
use super::parsing::body::{BodyNode, RawParagraph, RawTable, read_body};
use super::parsing::formatting::{extract_formatted_text, extract_plain_text};
use super::parsing::numbering::NumberingIndex;
use super::parsing::styles::StyleIndex;
use crate::error::Result;

/// Lookups shared by every element of one document
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub styles: &'a StyleIndex,
    pub numbering: &'a NumberingIndex,
    /// rId -> renamed image file
    pub images: &'a HashMap<String, String>,
    /// Prefix for image links, e.g. `../images`
    pub image_link_prefix: &'a str,
    pub code_language: &'a str,
}

/// Extract content elements from a main document part, in document order
pub fn extract_elements(document_xml: &str, ctx: &ExtractContext) -> Result<Vec<ContentElement>> {
    let mut elements = Vec::new();

    for node in read_body(document_xml)? {
        match node {
            BodyNode::Paragraph(para) => extract_paragraph(&para, ctx, &mut elements),
            BodyNode::Table(table) => extract_table(&table, ctx, &mut elements),
        }
    }

    Ok(elements)
}

fn extract_paragraph(
    para: &RawParagraph,
    ctx: &ExtractContext,
    elements: &mut Vec<ContentElement>,
) {
    if para.has_drawing {
        match para.image_rel.as_ref().and_then(|rid| ctx.images.get(rid)) {
            Some(filename) => elements.push(ContentElement::Image {
                filename: filename.clone(),
                relative_path: image_link(ctx.image_link_prefix, filename),
            }),
            None => log::debug!(
                "Dropping drawing with unresolved image reference {:?}",
                para.image_rel
            ),
        }
    }

    let text = extract_formatted_text(para);

    // A drawing-only paragraph contributes nothing beyond its image
    if text.is_empty() && para.has_drawing {
        return;
    }

    elements.push(classify_paragraph(para, text, ctx));
}

/// Numbering takes precedence over the style's heading role
fn classify_paragraph(para: &RawParagraph, text: String, ctx: &ExtractContext) -> ContentElement {
    if let Some(numbering) = para.numbering {
        if ctx.numbering.is_loaded() && !ctx.numbering.defines(numbering.list_id) {
            log::debug!(
                "List id {} is not defined in numbering.xml",
                numbering.list_id
            );
        }
        return ContentElement::NumberedListItem {
            text,
            level: numbering.level,
            list_id: numbering.list_id,
        };
    }

    let role = para
        .style_id
        .as_deref()
        .map(|id| ctx.styles.role_of(id))
        .unwrap_or(StyleRole::Text);

    match role {
        StyleRole::Title => ContentElement::Title { text },
        StyleRole::Heading(level) => ContentElement::Heading { level, text },
        StyleRole::Text => ContentElement::Text { text },
    }
}

fn extract_table(table: &RawTable, ctx: &ExtractContext, elements: &mut Vec<ContentElement>) {
    // Single-cell tables hold code listings
    if let [row] = table.rows.as_slice() {
        if let [cell] = row.as_slice() {
            let lines: Vec<String> = cell
                .iter()
                .map(extract_plain_text)
                .filter(|line| !line.is_empty())
                .collect();

            if !lines.is_empty() {
                log::debug!("Found code in 1x1 table");
                elements.push(ContentElement::Code {
                    text: lines.join("\n"),
                    language: ctx.code_language.to_string(),
                });
            }
            return;
        }
    }

    let rows: TableRows = table
        .rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.iter()
                        .map(extract_formatted_text)
                        .filter(|text| !text.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect()
        })
        .collect();

    if !rows.is_empty() {
        elements.push(ContentElement::Table { rows });
    }
}

fn image_link(prefix: &str, filename: &str) -> String {
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{filename}", prefix.trim_end_matches('/'))
    }
}
