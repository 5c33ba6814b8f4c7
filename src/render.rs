//! Page rasterization.
//!
//! The extractor talks to a [`Rasterizer`], which opens documents, and a
//! [`RasterDocument`], which counts and renders pages. [`PdfiumRasterizer`]
//! backs both with PDFium through `pdfium-render`.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;

use crate::error::{ExtractError, Result};

/// Nominal PDF resolution. A scale of 1.0 renders one pixel per point.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Opens documents for rendering.
pub trait Rasterizer {
    /// Opens the document at `path`. The returned handle is released when dropped.
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument + '_>>;
}

/// An open document whose pages can be rendered.
pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Renders the page at 0-based `index`, scaled by `scale` from its size in points.
    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage>;
}

/// Pixel size of a page of `width` x `height` points rendered at `scale`.
/// Partial pixels round up; each side is at least one pixel.
pub fn scaled_dimensions(width: f32, height: f32, scale: f32) -> (i32, i32) {
    let pixels = |points: f32| ((points * scale).ceil() as i32).max(1);
    (pixels(width), pixels(height))
}

/// Effective dots per inch for a render scale.
pub fn dpi_for_scale(scale: f32) -> f32 {
    POINTS_PER_INCH * scale
}

/// Locations checked for the PDFium dynamic library before the system one.
fn library_search_paths(extra_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = extra_dir {
        paths.push(dir.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.to_path_buf());
            paths.push(exe_dir.join("lib"));
        }
    }

    paths.push(PathBuf::from("./lib"));
    paths
}

/// Binds PDFium, trying `extra_dir` and the usual bundle locations first.
pub fn bind_pdfium(extra_dir: Option<&Path>) -> Result<Pdfium> {
    for dir in library_search_paths(extra_dir) {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(&dir);
        log::debug!("Trying PDFium at {}", lib_path.display());

        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            log::debug!("Bound PDFium from {}", dir.display());
            return Ok(Pdfium::new(bindings));
        }
    }

    log::debug!("Trying system PDFium library");
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| ExtractError::Bind(e.to_string()))
}

/// [`Rasterizer`] backed by PDFium.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }

    /// Binds PDFium (see [`bind_pdfium`]) and wraps it.
    pub fn bind(extra_dir: Option<&Path>) -> Result<Self> {
        bind_pdfium(extra_dir).map(Self::new)
    }

    pub fn pdfium(&self) -> &Pdfium {
        &self.pdfium
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument + '_>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage> {
        let page_error = |reason: String| ExtractError::Render {
            page: index + 1,
            reason,
        };

        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| page_error(e.to_string()))?;

        let (width, height) = scaled_dimensions(page.width().value, page.height().value, scale);
        log::debug!("Rendering page {} at about {}x{} px", index + 1, width, height);

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| page_error(e.to_string()))?;

        Ok(bitmap.as_image())
    }
}
