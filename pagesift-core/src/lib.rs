//! # pagesift-core
//!
//! Blank-page detection and fixed-size chunk splitting for paginated
//! documents.
//!
//! ## Features
//!
//! - **Blank Page Detection**: layered heuristic over extracted text,
//!   annotations, and rendered pixel brightness
//! - **Chunk Planning**: deterministic partitioning of retained pages into
//!   fixed-size output documents
//! - **Split Execution**: end-to-end pipeline with a progress contract and
//!   tolerated per-chunk write failures
//! - **Codec Agnostic**: the document format lives behind the
//!   [`SourceDocument`] trait; any backend that can count, inspect, render,
//!   and export pages plugs in
//!
//! ## Quick Start
//!
//! ```rust
//! use pagesift_core::{split_document, SourceDocument, SplitOptions, SplitResult};
//! use std::path::Path;
//!
//! fn split<D: SourceDocument>(document: &D) -> SplitResult<()> {
//!     let summary = split_document(
//!         document,
//!         "scans",
//!         Path::new("out"),
//!         SplitOptions::default(),
//!     )?;
//!
//!     println!("{}", summary.status_message());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod document;
pub mod error;
pub mod executor;
pub mod planner;
pub mod progress;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{AnalysisOptions, BlankPageDetector};
pub use document::{PageGeometry, SourceDocument};
pub use error::{SplitError, SplitResult};
pub use executor::{
    split_document, SplitExecutor, SplitOptions, SplitSummary, CHUNK_SIZE_PRESETS,
};
pub use planner::{plan_chunks, Chunk};
pub use progress::{CancelToken, Progress, SplitPhase};
pub use raster::{scaled_dimensions, Raster, MAX_SAMPLES};
