use std::path::PathBuf;

use serde::Serialize;

use crate::config::JobConfig;
use crate::error::Result;
use crate::extract::extract_pages;
use crate::render::Rasterizer;

/// One document that was extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub prefix: String,
    pub pages: usize,
}

/// What a batch run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentReport>,
    pub missing: Vec<PathBuf>,
}

impl RunSummary {
    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(|doc| doc.pages).sum()
    }
}

/// Extracts every input of `config` in order.
///
/// Missing inputs are logged and skipped. Any other failure aborts the run.
pub fn run(config: &JobConfig, rasterizer: &dyn Rasterizer) -> Result<RunSummary> {
    let output_dir = config.resolved_output_dir();
    let mut summary = RunSummary {
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    for prefix in config.duplicate_prefixes() {
        log::warn!(
            "Prefix '{}' is shared by several inputs; later pages overwrite earlier ones",
            prefix
        );
    }

    for input in &config.inputs {
        let pdf_path = config.resolve_input(input);

        if !pdf_path.exists() {
            log::warn!("Not found: {}", pdf_path.display());
            summary.missing.push(pdf_path);
            continue;
        }

        let pages = extract_pages(rasterizer, &pdf_path, &output_dir, &input.prefix, config.scale)?;
        summary.documents.push(DocumentReport {
            source: pdf_path,
            prefix: input.prefix.clone(),
            pages,
        });
    }

    log::info!(
        "Done! {} document(s), {} page(s), {} missing",
        summary.documents.len(),
        summary.total_pages(),
        summary.missing.len()
    );
    Ok(summary)
}
