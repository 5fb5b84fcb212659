//! Split execution
//!
//! [`SplitExecutor`] drives the whole pipeline over one source document:
//! classify every page, keep the content-bearing ones, partition them into
//! chunks, and write one output document per chunk. Progress moves through
//! a fixed budget: detection owns the first 30%, writing the remaining 70%.

use crate::analysis::{AnalysisOptions, BlankPageDetector};
use crate::document::SourceDocument;
use crate::error::{SplitError, SplitResult};
use crate::planner::plan_chunks;
use crate::progress::{CancelToken, Progress, SplitPhase};
use std::path::{Path, PathBuf};

/// Chunk sizes offered by caller UIs; any positive size is accepted
pub const CHUNK_SIZE_PRESETS: [usize; 4] = [5, 10, 25, 50];

const OUTPUT_EXTENSION: &str = "pdf";

const DETECTION_PROGRESS_SHARE: f64 = 0.3;

/// Options for one split run
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Pages per output document; the last one may be shorter
    pub pages_per_chunk: usize,
    /// Classify pages and drop blank ones before chunking
    pub remove_blank_pages: bool,
    /// Blank page detection tuning
    pub analysis: AnalysisOptions,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            pages_per_chunk: 10,
            remove_blank_pages: true,
            analysis: AnalysisOptions::default(),
        }
    }
}

/// Outcome of a completed split run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Chunks successfully persisted; failed chunk writes are not counted
    pub files_written: usize,
    /// Pages classified blank and dropped
    pub pages_removed: usize,
    pub output_dir: PathBuf,
}

impl SplitSummary {
    /// Human-readable terminal status, also published through [`Progress`]
    pub fn status_message(&self) -> String {
        let mut message = format!("Successfully split into {} files", self.files_written);
        if self.pages_removed > 0 {
            message.push_str(&format!("\nRemoved {} blank pages", self.pages_removed));
        }
        message.push_str(&format!("\nSaved to: {}", self.output_dir.display()));
        message
    }
}

/// Drives one split run over a source document
pub struct SplitExecutor<'a, D: SourceDocument + ?Sized> {
    document: &'a D,
    options: SplitOptions,
    progress: Progress,
    cancel: CancelToken,
}

impl<'a, D: SourceDocument + ?Sized> SplitExecutor<'a, D> {
    pub fn new(document: &'a D, options: SplitOptions) -> Self {
        Self {
            document,
            options,
            progress: Progress::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Handle for observing this executor's progress from other threads
    pub fn progress(&self) -> Progress {
        self.progress.clone()
    }

    /// Token that aborts the run between chunk writes
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the pipeline, writing `{base_name}_NNN.pdf` files into
    /// `output_dir`.
    ///
    /// Individual chunk write failures are logged and reflected only in
    /// `files_written`; every other failure aborts the run.
    pub fn run(&self, base_name: &str, output_dir: &Path) -> SplitResult<SplitSummary> {
        if self.options.pages_per_chunk == 0 {
            return Err(SplitError::InvalidConfiguration(
                "pages per chunk must be at least 1".to_string(),
            ));
        }

        self.progress.reset();
        match self.execute(base_name, output_dir) {
            Ok(summary) => {
                self.progress.finish(summary.status_message());
                Ok(summary)
            }
            Err(err) => {
                self.progress.fail(err.to_string());
                Err(err)
            }
        }
    }

    fn execute(&self, base_name: &str, output_dir: &Path) -> SplitResult<SplitSummary> {
        std::fs::create_dir_all(output_dir).map_err(|source| {
            SplitError::DirectoryCreationFailure {
                path: output_dir.to_path_buf(),
                source,
            }
        })?;

        let retained = self.collect_retained_pages();
        let total_pages = self.document.page_count();

        self.progress.set_phase(SplitPhase::Planning);
        let plan = plan_chunks(&retained, self.options.pages_per_chunk)?;

        self.progress.set_phase(SplitPhase::Writing);
        let mut files_written = 0;
        for (index, chunk) in plan.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(SplitError::Cancelled);
            }

            let file_name = format!("{}_{:03}.{}", base_name, index + 1, OUTPUT_EXTENSION);
            let path = output_dir.join(file_name);

            match self.document.write_pages(&chunk.pages, &path) {
                Ok(()) => files_written += 1,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "chunk write failed, continuing");
                }
            }

            self.progress.advance_to(
                DETECTION_PROGRESS_SHARE
                    + ((index + 1) as f64 / plan.len() as f64) * (1.0 - DETECTION_PROGRESS_SHARE),
            );
        }

        Ok(SplitSummary {
            files_written,
            pages_removed: total_pages - retained.len(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Detection phase: original page indices that survive classification,
    /// in document order
    fn collect_retained_pages(&self) -> Vec<usize> {
        self.progress.set_phase(SplitPhase::Detecting);

        let total_pages = self.document.page_count();
        let detector = BlankPageDetector::with_options(self.document, self.options.analysis.clone());

        let mut retained = Vec::with_capacity(total_pages);
        for index in 0..total_pages {
            if !self.options.remove_blank_pages || !detector.is_blank(index) {
                retained.push(index);
            }
            self.progress
                .advance_to(((index + 1) as f64 / total_pages as f64) * DETECTION_PROGRESS_SHARE);
        }

        self.progress.advance_to(DETECTION_PROGRESS_SHARE);
        retained
    }
}

/// Split `document` into `{base_name}_NNN.pdf` files under `output_dir`
pub fn split_document<D: SourceDocument + ?Sized>(
    document: &D,
    base_name: &str,
    output_dir: &Path,
    options: SplitOptions,
) -> SplitResult<SplitSummary> {
    SplitExecutor::new(document, options).run(base_name, output_dir)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
