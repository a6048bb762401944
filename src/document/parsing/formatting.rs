//! Text extraction and inline formatting
//!
//! Turns the runs of a raw paragraph into Markdown-emphasised text.

use super::body::{RawParagraph, RawRun};

/// Extract paragraph text with bold/italic runs wrapped in emphasis markers.
/// Runs are concatenated in order with nothing added between them.
pub(crate) fn extract_formatted_text(para: &RawParagraph) -> String {
    let mut text = String::new();
    for run in &para.runs {
        push_formatted_run(&mut text, run);
    }
    text
}

/// Extract paragraph text without any formatting markers
pub(crate) fn extract_plain_text(para: &RawParagraph) -> String {
    para.runs.iter().map(|run| run.text.as_str()).collect()
}

fn push_formatted_run(output: &mut String, run: &RawRun) {
    if run.text.is_empty() {
        return;
    }

    let marker = match (run.bold, run.italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => "",
    };

    output.push_str(marker);
    output.push_str(&run.text);
    output.push_str(marker);
}
