//! lopdf-backed implementation of the core document traits
//!
//! `lopdf` supplies everything except rasterization: page enumeration, text
//! extraction, annotation inspection, and page-subset export by cloning the
//! document and deleting the complement. Rasterization comes from pdfium
//! when the `render` feature is enabled; without it, pages that pass the
//! text and annotation checks are kept (the core treats a missing raster as
//! "not blank").

use lopdf::{Object, ObjectId};
use pagesift_core::{PageGeometry, Raster, SourceDocument, SplitError, SplitResult};
use std::path::Path;

// US Letter, used when no MediaBox is reachable
const FALLBACK_GEOMETRY: PageGeometry = PageGeometry {
    width: 612.0,
    height: 792.0,
};

pub struct LopdfDocument {
    document: lopdf::Document,
    /// Page object ids in document order
    page_ids: Vec<ObjectId>,
    #[cfg(feature = "render")]
    renderer: Option<crate::render::PdfiumRenderer>,
}

impl LopdfDocument {
    pub fn open(path: &Path) -> SplitResult<Self> {
        let document =
            lopdf::Document::load(path).map_err(|e| SplitError::LoadFailure(e.to_string()))?;
        let page_ids = document.get_pages().into_values().collect();

        #[cfg(feature = "render")]
        let renderer = match crate::render::PdfiumRenderer::new(path) {
            Some(renderer) => Some(renderer),
            None => {
                tracing::warn!(
                    "libpdfium not available, blank detection limited to text and annotations"
                );
                None
            }
        };

        Ok(Self {
            document,
            page_ids,
            #[cfg(feature = "render")]
            renderer,
        })
    }

    fn page_dictionary(&self, index: usize) -> Option<&lopdf::Dictionary> {
        let id = *self.page_ids.get(index)?;
        self.document.get_dictionary(id).ok()
    }

    fn resolved<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }

    /// MediaBox of a page, walking Parent nodes since the entry is
    /// inheritable
    fn media_box(&self, index: usize) -> Option<PageGeometry> {
        let mut dict = self.page_dictionary(index)?;
        loop {
            if let Ok(media_box) = dict.get(b"MediaBox") {
                return rectangle_geometry(self.resolved(media_box));
            }
            let parent = dict.get(b"Parent").ok()?;
            dict = match self.resolved(parent) {
                Object::Dictionary(d) => d,
                _ => return None,
            };
        }
    }
}

impl SourceDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_text(&self, index: usize) -> String {
        if index >= self.page_ids.len() {
            return String::new();
        }
        match self.document.extract_text(&[index as u32 + 1]) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(page = index, %err, "text extraction failed");
                String::new()
            }
        }
    }

    fn annotation_count(&self, index: usize) -> usize {
        let Some(dict) = self.page_dictionary(index) else {
            return 0;
        };
        let Ok(annots) = dict.get(b"Annots") else {
            return 0;
        };
        match self.resolved(annots).as_array() {
            Ok(array) => array.len(),
            Err(_) => 0,
        }
    }

    fn page_geometry(&self, index: usize) -> PageGeometry {
        self.media_box(index).unwrap_or(FALLBACK_GEOMETRY)
    }

    fn render_page(&self, index: usize, scale: f64) -> Option<Raster> {
        #[cfg(feature = "render")]
        {
            let geometry = self.page_geometry(index);
            self.renderer.as_ref()?.render(index, scale, geometry)
        }
        #[cfg(not(feature = "render"))]
        {
            let _ = (index, scale);
            None
        }
    }

    /// Export the given pages by whitelisting: clone the document, delete
    /// every other page in descending order, drop orphaned objects, save.
    fn write_pages(&self, indices: &[usize], path: &Path) -> SplitResult<()> {
        let keep: std::collections::HashSet<u32> =
            indices.iter().map(|&i| i as u32 + 1).collect();

        let mut output = self.document.clone();
        let mut delete: Vec<u32> = (1..=self.page_ids.len() as u32)
            .filter(|n| !keep.contains(n))
            .collect();
        delete.reverse();
        for page_number in delete {
            output.delete_pages(&[page_number]);
        }

        output.prune_objects();
        output.compress();
        output
            .save(path)
            .map_err(|e| SplitError::PageWriteFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

fn rectangle_geometry(object: &Object) -> Option<PageGeometry> {
    let rect = object.as_array().ok()?;
    if rect.len() != 4 {
        return None;
    }
    let mut coords = [0.0f64; 4];
    for (slot, value) in coords.iter_mut().zip(rect) {
        *slot = numeric(value)?;
    }
    Some(PageGeometry::new(
        (coords[2] - coords[0]).abs(),
        (coords[3] - coords[1]).abs(),
    ))
}

fn numeric(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
