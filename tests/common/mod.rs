#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, Once};

use image::DynamicImage;
use pdfpages::render::scaled_dimensions;
use pdfpages::{ExtractError, RasterDocument, Rasterizer, Result};

/// Page size used by fake documents, in points.
pub const A4: (f32, f32) = (595.0, 842.0);

#[derive(Clone)]
struct FakePdf {
    pages: usize,
    fail_at: Option<usize>,
}

/// In-memory rasterizer keyed by file name. Renders blank pages.
#[derive(Default)]
pub struct FakeRasterizer {
    documents: HashMap<String, FakePdf>,
    pub opened: Rc<Cell<usize>>,
    pub closed: Rc<Cell<usize>>,
}

impl FakeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: &str, pages: usize) -> Self {
        self.documents.insert(name.to_string(), FakePdf { pages, fail_at: None });
        self
    }

    /// Document whose page at 0-based `fail_at` fails to render.
    pub fn with_broken_document(mut self, name: &str, pages: usize, fail_at: usize) -> Self {
        self.documents.insert(
            name.to_string(),
            FakePdf {
                pages,
                fail_at: Some(fail_at),
            },
        );
        self
    }
}

impl Rasterizer for FakeRasterizer {
    fn open(&self, path: &Path) -> Result<Box<dyn RasterDocument + '_>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let pdf = self.documents.get(&name).ok_or_else(|| ExtractError::Open {
            path: path.to_path_buf(),
            reason: "not a PDF".to_string(),
        })?;

        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(FakeDocument {
            pdf: pdf.clone(),
            closed: Rc::clone(&self.closed),
        }))
    }
}

struct FakeDocument {
    pdf: FakePdf,
    closed: Rc<Cell<usize>>,
}

impl RasterDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pdf.pages
    }

    fn render_page(&self, index: usize, scale: f32) -> Result<DynamicImage> {
        if self.pdf.fail_at == Some(index) {
            return Err(ExtractError::Render {
                page: index + 1,
                reason: "corrupt content stream".to_string(),
            });
        }
        let (width, height) = scaled_dimensions(A4.0, A4.1, scale);
        Ok(DynamicImage::new_rgb8(width as u32, height as u32))
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

/// Writes a placeholder file so existence checks pass.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.7\n").unwrap();
    path
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

static LOG_LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let line = format!("{} {}", record.level(), record.args());
        LOG_LINES.lock().unwrap().push(line);
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Routes `log` output into memory for [`logged`]. Safe to call from every test.
pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Info);
    });
}

/// Whether any captured line contains `needle`.
pub fn logged(needle: &str) -> bool {
    LOG_LINES.lock().unwrap().iter().any(|line| line.contains(needle))
}
