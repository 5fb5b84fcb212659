//! In-memory document fake shared by unit tests

use crate::document::{PageGeometry, SourceDocument};
use crate::error::{SplitError, SplitResult};
use crate::raster::{scaled_dimensions, Raster};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct FakePage {
    pub text: String,
    pub annotations: usize,
    pub geometry: PageGeometry,
    /// Channel value used for a solid render; `None` simulates a render
    /// failure
    pub render_level: Option<u8>,
}

impl FakePage {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::blank()
        }
    }

    pub fn annotated(annotations: usize) -> Self {
        Self {
            annotations,
            ..Self::blank()
        }
    }

    /// Empty text, no annotations, renders pure white
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            annotations: 0,
            geometry: PageGeometry::new(612.0, 792.0),
            render_level: Some(0xFF),
        }
    }

    /// Empty text, no annotations, renders a uniform gray level
    pub fn with_render_level(level: u8) -> Self {
        Self {
            render_level: Some(level),
            ..Self::blank()
        }
    }

    pub fn unrenderable() -> Self {
        Self {
            render_level: None,
            ..Self::blank()
        }
    }
}

#[derive(Default)]
pub struct FakeDocument {
    pub pages: Vec<FakePage>,
    /// Zero-based ordinals of `write_pages` calls that should fail
    pub failing_writes: HashSet<usize>,
    pub written: RefCell<Vec<(PathBuf, Vec<usize>)>>,
    write_calls: RefCell<usize>,
}

impl FakeDocument {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// A document of `count` pages that all carry text
    pub fn with_content_pages(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| FakePage::with_text(&format!("page {i}")))
                .collect(),
        )
    }

    pub fn written_page_counts(&self) -> Vec<usize> {
        self.written
            .borrow()
            .iter()
            .map(|(_, pages)| pages.len())
            .collect()
    }
}

impl SourceDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> String {
        self.pages[index].text.clone()
    }

    fn annotation_count(&self, index: usize) -> usize {
        self.pages[index].annotations
    }

    fn page_geometry(&self, index: usize) -> PageGeometry {
        self.pages[index].geometry
    }

    fn render_page(&self, index: usize, scale: f64) -> Option<Raster> {
        let level = self.pages[index].render_level?;
        let (width, height) = scaled_dimensions(self.pages[index].geometry, scale);
        let mut raster = Raster::white(width, height)?;
        for chunk in raster.pixels_mut().chunks_exact_mut(4) {
            chunk[0] = level;
            chunk[1] = level;
            chunk[2] = level;
        }
        Some(raster)
    }

    fn write_pages(&self, indices: &[usize], path: &Path) -> SplitResult<()> {
        let call = *self.write_calls.borrow();
        *self.write_calls.borrow_mut() += 1;

        if self.failing_writes.contains(&call) {
            return Err(SplitError::PageWriteFailure {
                path: path.to_path_buf(),
                reason: "simulated write failure".to_string(),
            });
        }

        self.written
            .borrow_mut()
            .push((path.to_path_buf(), indices.to_vec()));
        Ok(())
    }
}
