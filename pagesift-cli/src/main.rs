use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pagesift_core::{BlankPageDetector, SplitExecutor, SplitOptions, SplitPhase};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod backend;
#[cfg(feature = "render")]
mod render;

use backend::LopdfDocument;

#[derive(Parser)]
#[command(
    name = "pagesift",
    about = "Split PDFs into fixed-size chunks, dropping blank pages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into chunk files
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Pages per output file
        #[arg(short = 'n', long, default_value_t = 10)]
        pages_per_chunk: usize,

        /// Keep blank pages instead of dropping them
        #[arg(long)]
        keep_blank_pages: bool,

        /// Suppress the progress display
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show page count and detected blank pages
    Info {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            output,
            pages_per_chunk,
            keep_blank_pages,
            quiet,
        } => run_split(&input, &output, pages_per_chunk, keep_blank_pages, quiet),
        Commands::Info { input } => run_info(&input),
    }
}

fn run_split(
    input: &Path,
    output: &Path,
    pages_per_chunk: usize,
    keep_blank_pages: bool,
    quiet: bool,
) -> Result<()> {
    let document = LopdfDocument::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?;
    let base_name = source_base_name(input)?;

    let options = SplitOptions {
        pages_per_chunk,
        remove_blank_pages: !keep_blank_pages,
        ..SplitOptions::default()
    };
    let executor = SplitExecutor::new(&document, options);

    // The document backend is not Sync (pdfium bindings), so the run stays
    // on this thread and only the progress handle crosses to the display
    // thread.
    let finished = Arc::new(AtomicBool::new(false));
    let display = (!quiet).then(|| {
        let progress = executor.progress();
        let finished = Arc::clone(&finished);
        std::thread::spawn(move || {
            while !finished.load(Ordering::Acquire) {
                print!(
                    "\r{:<9} {:>3.0}%",
                    phase_label(progress.phase()),
                    progress.value() * 100.0
                );
                let _ = std::io::stdout().flush();
                std::thread::sleep(Duration::from_millis(50));
            }
            println!(
                "\r{:<9} {:>3.0}%",
                phase_label(progress.phase()),
                progress.value() * 100.0
            );
        })
    });

    let result = executor.run(&base_name, output);
    finished.store(true, Ordering::Release);
    if let Some(handle) = display {
        handle
            .join()
            .map_err(|_| anyhow!("progress display thread panicked"))?;
    }

    let summary = result?;
    println!("{}", summary.status_message());
    Ok(())
}

fn run_info(input: &Path) -> Result<()> {
    let document = LopdfDocument::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?;

    use pagesift_core::SourceDocument;
    println!("PDF Information for: {}", input.display());
    println!("Pages: {}", document.page_count());

    let detector = BlankPageDetector::new(&document);
    let blank_pages = detector.detect_blank_pages();
    println!("Blank pages: {}", blank_pages.len());
    if !blank_pages.is_empty() {
        let numbers: Vec<String> = blank_pages.iter().map(|i| (i + 1).to_string()).collect();
        println!("Blank page numbers: {}", numbers.join(", "));
    }

    Ok(())
}

fn source_base_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("input path {} has no file name", input.display()))
}

fn phase_label(phase: SplitPhase) -> &'static str {
    match phase {
        SplitPhase::Idle => "Idle",
        SplitPhase::Detecting => "Detecting",
        SplitPhase::Planning => "Planning",
        SplitPhase::Writing => "Writing",
        SplitPhase::Done => "Done",
        SplitPhase::Failed => "Failed",
    }
}
