//! CLI tool that dumps the text of every page of a PDF.

use anyhow::{Context, Result};
use clap::Parser;
use docgen_core::TextReportFormatter;
use docgen_pdf::PdfTextExtractor;
use std::io::{self, Write};
use std::path::PathBuf;

/// Print the page count and the extracted text of each page of a PDF.
#[derive(Parser, Debug)]
#[command(name = "extract-pdf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF file to read
    #[arg(default_value = "Emergency_251204_112414.pdf")]
    pdf: PathBuf,

    /// Print lengths and empty markers only, without page text
    #[arg(short, long)]
    summary: bool,

    /// Print the dump as JSON instead of the text report
    #[arg(long, conflicts_with = "summary")]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args, &mut out) {
        // Pages already written stay on stdout.
        let _ = writeln!(out, "{}", error_line(&e));
    }
}

/// The single line printed for a failed run, causes included.
fn error_line(e: &anyhow::Error) -> String {
    format!("Error: {:#}", e)
}

/// Stream the report for `args.pdf` into `out`.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let extractor = PdfTextExtractor::open(&args.pdf)
        .with_context(|| format!("Failed to open {}", args.pdf.display()))?;
    log::debug!("Loaded {}", extractor.source());

    if args.json {
        let dump = extractor.dump();
        serde_json::to_writer_pretty(&mut *out, &dump).context("Failed to serialize dump")?;
        writeln!(out)?;
        return Ok(());
    }

    let formatter = TextReportFormatter::new().with_summary_only(args.summary);
    formatter.write_header(out, extractor.page_count())?;
    for page in extractor.pages() {
        formatter
            .write_page(out, &page)
            .with_context(|| format!("Failed to write page {}", page.number))?;
    }
    Ok(())
}
