//! Markdown rendering
//!
//! Turns an ordered sequence of content elements into one Markdown string.
//! Besides the per-element output, the renderer keeps a little state across
//! elements to decide list numbering resets and paragraph spacing.

mod counters;

use std::fmt::{self, Write};

pub use counters::ListCounters;

use crate::document::{ContentElement, MAX_LIST_LEVEL};
use crate::error::Result;

/// Phrases that, ending a paragraph right before a list, mark a fresh list.
///
/// Word documents often reuse one numbering id for lists that are logically
/// separate. This is a heuristic over natural-language cues, not a structural
/// signal, and it misfires on prose that happens to contain these phrases.
pub const LIST_RESTART_CUES: [&str; 5] = [
    "could instead:",
    "might:",
    "approach:",
    "following:",
    "these:",
];

/// Whether a paragraph reads like the introduction of a new list
pub fn introduces_new_list(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    LIST_RESTART_CUES.iter().any(|cue| text.contains(cue))
}

/// Render elements to Markdown. Output is built completely in memory.
pub fn render_markdown(elements: &[ContentElement]) -> Result<String> {
    let mut renderer = MarkdownRenderer::default();
    for index in 0..elements.len() {
        renderer.render_element(elements, index)?;
    }
    Ok(collapse_blank_lines(&renderer.lines))
}

#[derive(Debug, Default)]
struct MarkdownRenderer {
    lines: Vec<String>,
    counters: ListCounters,
    in_list_context: bool,
}

impl MarkdownRenderer {
    fn render_element(&mut self, elements: &[ContentElement], index: usize) -> fmt::Result {
        let element = &elements[index];
        let previous = index.checked_sub(1).map(|i| &elements[i]);
        let next = elements.get(index + 1);

        let mut needs_extra_space = false;

        // A real paragraph after a list ends every open list
        if previous.is_some_and(ContentElement::is_list_item) && element.is_substantial_text() {
            needs_extra_space = true;
            self.counters.clear();
            self.in_list_context = false;
        }

        if let (
            ContentElement::NumberedListItem { list_id, .. },
            Some(ContentElement::Text { text: intro }),
        ) = (element, previous)
        {
            if !intro.trim().is_empty() && introduces_new_list(intro) {
                self.counters.reset_list(*list_id);
                self.in_list_context = true;
            }
        }

        if needs_extra_space && self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.blank();
        }

        match element {
            ContentElement::Title { text } => {
                self.line(format_args!("# {text}"))?;
                self.blank();
            }
            ContentElement::Heading { level, text } => {
                let marker = "#".repeat(usize::from((*level).clamp(1, 5)) + 1);
                self.line(format_args!("{marker} {text}"))?;
                self.blank();
            }
            ContentElement::NumberedListItem {
                text,
                level,
                list_id,
            } => {
                let indent = "   ".repeat((*level).min(MAX_LIST_LEVEL) as usize);
                let number = self.counters.next(*list_id, *level);
                self.line(format_args!("{indent}{number}. {text}"))?;
                self.in_list_context = true;
            }
            ContentElement::Text { text } => {
                if !text.trim().is_empty() {
                    self.line(format_args!("{text}"))?;
                    // An introductory paragraph runs straight into its list
                    if next.is_some_and(|next| !next.is_list_item()) {
                        self.blank();
                    }
                } else if !self.in_list_context {
                    self.blank();
                }
            }
            ContentElement::Image {
                filename,
                relative_path,
            } => {
                self.line(format_args!("![{filename}]({relative_path})"))?;
                self.blank();
            }
            ContentElement::Code { text, language } => {
                let code = strip_code_fences(text, language);
                self.line(format_args!("```{language}"))?;
                self.line(format_args!("{code}"))?;
                self.line(format_args!("```"))?;
                self.blank();
            }
            ContentElement::Table { rows } => {
                if let Some((header, body)) = rows.split_first() {
                    self.table_row(header.iter().map(String::as_str))?;
                    self.table_row(header.iter().map(|_| "---"))?;
                    for row in body {
                        self.table_row(row.iter().map(String::as_str))?;
                    }
                    self.blank();
                }
            }
        }

        Ok(())
    }

    fn line(&mut self, args: fmt::Arguments) -> fmt::Result {
        let mut line = String::new();
        line.write_fmt(args)?;
        self.lines.push(line);
        Ok(())
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn table_row<'a>(&mut self, cells: impl Iterator<Item = &'a str>) -> fmt::Result {
        let cells: Vec<&str> = cells.collect();
        self.line(format_args!("| {} |", cells.join(" | ")))
    }
}

/// Remove fences already present in extracted code, then trim
fn strip_code_fences(code: &str, language: &str) -> String {
    code.replace(&format!("```{language}"), "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Join lines, collapsing every run of blank lines into one
fn collapse_blank_lines(lines: &[String]) -> String {
    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    let mut prev_empty = false;

    for line in lines {
        if line.is_empty() {
            if !prev_empty {
                cleaned.push(line);
            }
            prev_empty = true;
        } else {
            cleaned.push(line);
            prev_empty = false;
        }
    }

    cleaned.join("\n")
}
