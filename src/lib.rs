//! Render every page of a PDF to `<prefix>_page<N>.png` files.

pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod render;

pub use config::{InputSpec, JobConfig};
pub use driver::{DocumentReport, RunSummary, run};
pub use error::{ExtractError, Result};
pub use extract::{extract_pages, page_file_name, page_output_path};
pub use render::{PdfiumRasterizer, RasterDocument, Rasterizer};
