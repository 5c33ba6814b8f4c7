//! Page extraction: one PDF in, one PNG per page out.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{ExtractError, Result};
use crate::render::{Rasterizer, dpi_for_scale};

/// File name for 1-based `page_number`: `<prefix>_page<N>.png`.
pub fn page_file_name(prefix: &str, page_number: usize) -> String {
    format!("{}_page{}.png", prefix, page_number)
}

/// Full output path for 1-based `page_number`.
pub fn page_output_path(output_dir: &Path, prefix: &str, page_number: usize) -> PathBuf {
    output_dir.join(page_file_name(prefix, page_number))
}

/// Renders every page of `pdf_path` into `output_dir` as
/// `<prefix>_page<N>.png` and returns the number of pages written.
///
/// Existing files are overwritten. On error, pages already written stay on
/// disk; the document is closed on every path.
pub fn extract_pages(
    rasterizer: &dyn Rasterizer,
    pdf_path: &Path,
    output_dir: &Path,
    prefix: &str,
    scale: f32,
) -> Result<usize> {
    let document = rasterizer.open(pdf_path)?;
    let page_count = document.page_count();

    if page_count == 0 {
        return Err(ExtractError::EmptyDocument {
            path: pdf_path.to_path_buf(),
        });
    }

    std::fs::create_dir_all(output_dir).map_err(|source| ExtractError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    log::info!("Processing: {}", pdf_path.display());
    log::info!("Pages: {} ({:.0} dpi)", page_count, dpi_for_scale(scale));

    for index in 0..page_count {
        let page_number = index + 1;
        let image = document.render_page(index, scale)?;

        let output_path = page_output_path(output_dir, prefix, page_number);
        image
            .save_with_format(&output_path, ImageFormat::Png)
            .map_err(|e| ExtractError::Save {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;

        log::info!("  Saved: {}", output_path.display());
    }

    drop(document);
    Ok(page_count)
}
