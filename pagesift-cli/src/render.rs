//! pdfium-backed page rasterization
//!
//! pdfium is a native library loaded at runtime; when no build is found the
//! backend runs without a rasterizer and the core keeps every page the
//! cheap checks cannot decide.

use pagesift_core::{scaled_dimensions, PageGeometry, Raster};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

pub struct PdfiumRenderer {
    pdfium: Pdfium,
    path: PathBuf,
}

impl PdfiumRenderer {
    /// Bind to a pdfium build: alongside the executable first, then the
    /// system library path. `None` when neither is present.
    pub fn new(path: &Path) -> Option<Self> {
        let bindings =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .ok()?;
        Some(Self {
            pdfium: Pdfium::new(bindings),
            path: path.to_path_buf(),
        })
    }

    /// Render one page at the floor-scaled target size, white background.
    /// Any pdfium failure maps to `None`.
    pub fn render(&self, index: usize, scale: f64, geometry: PageGeometry) -> Option<Raster> {
        let (width, height) = scaled_dimensions(geometry, scale);
        if width == 0 || height == 0 {
            return None;
        }

        let document = self.pdfium.load_pdf_from_file(&self.path, None).ok()?;
        let page = document.pages().get(index as u16).ok()?;

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);
        let bitmap = page.render_with_config(&config).ok()?;

        Raster::from_rgba8(
            bitmap.width() as usize,
            bitmap.height() as usize,
            bitmap.as_rgba_bytes(),
        )
    }
}
