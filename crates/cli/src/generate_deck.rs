//! CLI tool that writes the Milestone One presentation.

mod milestone;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Generate the University E-Voting System Milestone One slide deck.
#[derive(Parser, Debug)]
#[command(name = "generate-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output .pptx file (parent directories are created)
    #[arg(short, long, default_value = "docs/MILESTONE_ONE_PRESENTATION.pptx")]
    output: PathBuf,

    /// Directory holding the journey and ERD images
    #[arg(long, default_value = "docs/images")]
    image_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match generate(&args.image_dir, &args.output) {
        Ok(()) => println!(
            "✅ Presentation created successfully: {}",
            args.output.display()
        ),
        Err(e) => {
            println!("{}", error_line(&e));
            eprintln!("{:?}", e);
        }
    }
}

/// Top-level failure line with the full cause chain.
fn error_line(e: &anyhow::Error) -> String {
    format!("ERROR: {:#}", e)
}

fn generate(image_dir: &Path, output: &Path) -> Result<()> {
    log::info!("Initializing presentation...");
    let deck = milestone::build_milestone_deck(image_dir).context("Failed to build slides")?;
    deck.save(output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["generate-deck"]);
        assert_eq!(args.output, PathBuf::from("docs/MILESTONE_ONE_PRESENTATION.pptx"));
        assert_eq!(args.image_dir, PathBuf::from("docs/images"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("deck.pptx");
        generate(&dir.path().join("images"), &output).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_generate_reports_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be replaced by the package file.
        let err = generate(&dir.path().join("images"), dir.path()).unwrap_err();
        assert!(error_line(&err).starts_with("ERROR: Failed to save"));
    }

    #[test]
    fn test_error_line_names_the_cause() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("erd.png"), b"not an image").unwrap();

        let err = generate(&images, &dir.path().join("deck.pptx")).unwrap_err();
        let line = error_line(&err);
        assert_eq!(line.lines().count(), 1);
        assert!(line.starts_with("ERROR: Failed to build slides: Image error: "));
        assert!(line.contains("erd.png"));
    }
}
