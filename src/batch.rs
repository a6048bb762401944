//! File-level orchestration
//!
//! Finds input documents, converts each one independently and writes the
//! results. A failing document is logged and counted; it never stops the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::OutputFormat;
use crate::convert::{Conversion, Converter, document_stem};
use crate::document::write_images;

/// Where converted output goes
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub output_dir: PathBuf,
    pub images_dir: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written output files
    pub converted: Vec<PathBuf>,
    /// Documents that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// All `.docx` files directly inside `dir`, sorted by path
pub fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_docx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "docx");
        if is_docx && path.is_file() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Serialised output of a conversion in the requested format
pub fn format_output(conversion: &Conversion, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(conversion.markdown.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(&conversion.elements)
            .context("serialising content elements"),
    }
}

/// Convert one document and write its output and images
pub fn convert_document(
    converter: &Converter,
    path: &Path,
    target: &OutputTarget,
) -> Result<PathBuf> {
    log::info!("Processing: {}", path.display());

    let conversion = converter
        .convert_file(path)
        .with_context(|| format!("converting {}", path.display()))?;
    let content = format_output(&conversion, target.format)?;

    write_images(&conversion.images, &target.images_dir)
        .with_context(|| format!("writing images to {}", target.images_dir.display()))?;

    let output_path = target.output_dir.join(format!(
        "{}.{}",
        document_stem(path),
        target.format.extension()
    ));
    write_atomic(&output_path, &content)?;

    log::info!("  Created: {}", output_path.display());
    if !conversion.images.is_empty() {
        log::info!("  Extracted {} images", conversion.images.len());
    }

    Ok(output_path)
}

/// Convert every document in `source_dir`
pub fn convert_all(
    converter: &Converter,
    source_dir: &Path,
    target: &OutputTarget,
) -> Result<BatchReport> {
    let documents = find_documents(source_dir)?;
    let mut report = BatchReport::default();

    if documents.is_empty() {
        log::warn!("No .docx files found in {}", source_dir.display());
        return Ok(report);
    }

    log::info!("Found {} files to convert", documents.len());

    for path in documents {
        match convert_document(converter, &path, target) {
            Ok(output) => report.converted.push(output),
            Err(e) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::error!("  Error converting {name}: {e:#}");
                report.failed.push((path, format!("{e:#}")));
            }
        }
    }

    Ok(report)
}

/// Write a file through a temporary sibling so readers never see partial output
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    file.write_all(content.as_bytes())?;
    file.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
