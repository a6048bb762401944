//! Streaming reader over the main document part
//!
//! Walks `word/document.xml` with quick-xml and collects the direct children
//! of `w:body` that matter for conversion (paragraphs and tables) in document
//! order. Runs nested anywhere inside a paragraph (hyperlinks, insertions)
//! belong to that paragraph. Nested tables are flattened into the cell that
//! holds them.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::super::models::{MAX_LIST_LEVEL, NumberingRef};
use super::super::package::DOCUMENT_PART;
use super::xml::{attribute, is_toggled_on};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawRun {
    pub(crate) text: String,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawParagraph {
    pub(crate) style_id: Option<String>,
    pub(crate) numbering: Option<NumberingRef>,
    pub(crate) runs: Vec<RawRun>,
    pub(crate) has_drawing: bool,
    /// `r:embed` of the first picture in the first drawing
    pub(crate) image_rel: Option<String>,
}

/// Paragraphs of one table cell
pub(crate) type RawCell = Vec<RawParagraph>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawTable {
    pub(crate) rows: Vec<Vec<RawCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BodyNode {
    Paragraph(RawParagraph),
    Table(RawTable),
}

/// Read the body of a main document part into raw nodes
pub(crate) fn read_body(xml: &str) -> Result<Vec<BodyNode>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false); // Don't trim to preserve spacing

    let mut state = BodyReader::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(e),
            Ok(Event::Empty(ref e)) => {
                state.open(e);
                state.close(e.name().as_ref());
            }
            Ok(Event::End(ref e)) => state.close(e.name().as_ref()),
            Ok(Event::Text(ref e)) if state.in_text => {
                let text = e.unescape().map_err(|err| {
                    Error::extraction(
                        DOCUMENT_PART,
                        format!("{err} at byte {}", reader.buffer_position()),
                    )
                })?;
                state.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::extraction(
                    DOCUMENT_PART,
                    format!("{e} at byte {}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(state.nodes)
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<Vec<RawCell>>,
    row: Option<Vec<RawCell>>,
    cell: Option<RawCell>,
}

#[derive(Debug, Default)]
struct BodyReader {
    nodes: Vec<BodyNode>,

    /// Depth of the element currently open
    depth: usize,
    body_depth: Option<usize>,

    table: Option<TableBuilder>,
    table_depth: usize,

    paragraph: Option<RawParagraph>,
    paragraph_depth: usize,
    in_paragraph_props: bool,
    in_numbering_props: bool,
    numbering_level: Option<String>,
    numbering_id: Option<String>,
    drawing_depth: usize,
    blip_seen: bool,

    run: Option<RawRun>,
    run_depth: usize,
    in_run_props: bool,
    in_text: bool,
}

impl BodyReader {
    fn is_body_child(&self) -> bool {
        self.body_depth.is_some_and(|body| self.depth == body + 1)
    }

    fn open(&mut self, e: &BytesStart) {
        self.depth += 1;

        match e.name().as_ref() {
            b"w:body" => self.body_depth = Some(self.depth),
            b"w:tbl" => {
                if self.table.is_some() {
                    self.table_depth += 1;
                } else if self.paragraph.is_none() && self.is_body_child() {
                    self.table = Some(TableBuilder::default());
                    self.table_depth = 1;
                }
            }
            b"w:tr" if self.table_depth == 1 && self.paragraph.is_none() => {
                if let Some(table) = self.table.as_mut() {
                    table.row = Some(Vec::new());
                }
            }
            b"w:tc" if self.table_depth == 1 && self.paragraph.is_none() => {
                if let Some(table) = self.table.as_mut() {
                    if table.row.is_some() {
                        table.cell = Some(Vec::new());
                    }
                }
            }
            b"w:p" => {
                if self.paragraph.is_some() {
                    self.paragraph_depth += 1;
                } else if self.is_body_child() || self.in_table_cell() {
                    self.paragraph = Some(RawParagraph::default());
                    self.paragraph_depth = 1;
                    self.blip_seen = false;
                    self.drawing_depth = 0;
                }
            }
            _ if self.paragraph.is_some() => self.open_in_paragraph(e),
            _ => {}
        }
    }

    fn open_in_paragraph(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:pPr" if self.paragraph_depth == 1 && self.run.is_none() => {
                self.in_paragraph_props = true;
            }
            b"w:pStyle" if self.in_paragraph_props => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.style_id = attribute(e, b"w:val");
                }
            }
            b"w:numPr" if self.in_paragraph_props => {
                self.in_numbering_props = true;
                self.numbering_level = None;
                self.numbering_id = None;
            }
            b"w:ilvl" if self.in_numbering_props => {
                self.numbering_level = Some(attribute(e, b"w:val").unwrap_or_else(|| "0".into()));
            }
            b"w:numId" if self.in_numbering_props => {
                self.numbering_id = Some(attribute(e, b"w:val").unwrap_or_else(|| "0".into()));
            }
            b"w:r" => {
                if self.run.is_some() {
                    self.run_depth += 1;
                } else {
                    self.run = Some(RawRun::default());
                    self.run_depth = 1;
                }
            }
            b"w:rPr" if self.run_depth == 1 => self.in_run_props = true,
            b"w:b" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    run.bold = is_toggled_on(e);
                }
            }
            b"w:i" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    run.italic = is_toggled_on(e);
                }
            }
            b"w:t" if self.run.is_some() => self.in_text = true,
            b"w:drawing" => {
                self.drawing_depth += 1;
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.has_drawing = true;
                }
            }
            b"a:blip" if self.drawing_depth > 0 && !self.blip_seen => {
                self.blip_seen = true;
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.image_rel = attribute(e, b"r:embed");
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"w:t" => self.in_text = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:r" if self.run.is_some() => {
                self.run_depth -= 1;
                if self.run_depth == 0 {
                    if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut())
                    {
                        paragraph.runs.push(run);
                    }
                }
            }
            b"w:drawing" if self.drawing_depth > 0 => {
                self.drawing_depth -= 1;
                if self.drawing_depth == 0 {
                    // Only the first drawing of a paragraph is consulted
                    self.blip_seen = true;
                }
            }
            b"w:numPr" if self.in_numbering_props => {
                self.in_numbering_props = false;
                self.finish_numbering();
            }
            b"w:pPr" if self.paragraph_depth == 1 => self.in_paragraph_props = false,
            b"w:p" if self.paragraph.is_some() => {
                self.paragraph_depth -= 1;
                if self.paragraph_depth == 0 {
                    self.finish_paragraph();
                }
            }
            b"w:tc" if self.table_depth == 1 && self.paragraph.is_none() => {
                if let Some(table) = self.table.as_mut() {
                    if let (Some(cell), Some(row)) = (table.cell.take(), table.row.as_mut()) {
                        row.push(cell);
                    }
                }
            }
            b"w:tr" if self.table_depth == 1 && self.paragraph.is_none() => {
                if let Some(table) = self.table.as_mut() {
                    if let Some(row) = table.row.take() {
                        table.rows.push(row);
                    }
                }
            }
            b"w:tbl" if self.table.is_some() => {
                self.table_depth -= 1;
                if self.table_depth == 0 {
                    if let Some(table) = self.table.take() {
                        self.nodes.push(BodyNode::Table(RawTable { rows: table.rows }));
                    }
                }
            }
            b"w:body" => self.body_depth = None,
            _ => {}
        }

        self.depth = self.depth.saturating_sub(1);
    }

    fn in_table_cell(&self) -> bool {
        self.table.as_ref().is_some_and(|table| table.cell.is_some())
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn finish_numbering(&mut self) {
        let (Some(level), Some(id)) = (self.numbering_level.take(), self.numbering_id.take()) else {
            return;
        };

        match (level.trim().parse::<u32>(), id.trim().parse::<u32>()) {
            (Ok(level), Ok(list_id)) if level <= MAX_LIST_LEVEL => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.numbering = Some(NumberingRef { level, list_id });
                }
            }
            _ => log::warn!("Ignoring unusable numbering reference (ilvl={level}, numId={id})"),
        }
    }

    fn finish_paragraph(&mut self) {
        self.in_paragraph_props = false;
        self.in_numbering_props = false;
        self.drawing_depth = 0;
        self.run = None;
        self.run_depth = 0;
        self.in_run_props = false;
        self.in_text = false;

        let Some(paragraph) = self.paragraph.take() else {
            return;
        };

        match self.table.as_mut().and_then(|table| table.cell.as_mut()) {
            Some(cell) => cell.push(paragraph),
            None => self.nodes.push(BodyNode::Paragraph(paragraph)),
        }
    }
}
