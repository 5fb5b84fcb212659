//! Document collaborator traits
//!
//! The split pipeline does not parse or render documents itself. It talks to
//! a codec backend through [`SourceDocument`], which exposes exactly the
//! per-page signals the pipeline needs: extracted text, annotation count,
//! page geometry, rasterization, and a way to persist a subset of pages as
//! a standalone document.

use crate::error::SplitResult;
use crate::raster::Raster;
use std::path::Path;

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Read access to a loaded paginated document, plus page-subset export.
///
/// Pages are addressed by zero-based index. The document is read-only for
/// the duration of a split run; implementations must not reorder or mutate
/// pages while a run holds a reference.
pub trait SourceDocument {
    /// Total number of pages
    fn page_count(&self) -> usize;

    /// Extracted text of a page, empty when the page has none (or text
    /// extraction is unavailable for it)
    fn page_text(&self, index: usize) -> String;

    /// Number of annotations attached to a page
    fn annotation_count(&self, index: usize) -> usize;

    /// Bounding rectangle of a page
    fn page_geometry(&self, index: usize) -> PageGeometry;

    /// Render a page into an RGBA raster at the given scale.
    ///
    /// The target must measure `floor(width * scale)` by
    /// `floor(height * scale)` pixels and be initialized to pure white
    /// before drawing (see [`Raster::white`]), so uncovered regions read as
    /// maximal brightness. Returns `None` if the raster cannot be produced;
    /// the classifier treats such pages as not blank.
    fn render_page(&self, index: usize, scale: f64) -> Option<Raster>;

    /// Write the given pages, in the given order, as a complete standalone
    /// document at `path`.
    fn write_pages(&self, indices: &[usize], path: &Path) -> SplitResult<()>;
}
