//! Highlight part numbers in a PDF.
//!
//! Usage: pdf-partmark -i <input.pdf> -o <output.pdf> [-c config.json] [--seed N] [--report report.json]

use clap::Parser;
use pdf_partmark::config::HighlightConfig;
use pdf_partmark::highlighter::{DocumentReport, Highlighter};
use pdf_partmark::surface::{PageSurface, PdfSurface};
use std::path::{Path, PathBuf};
use std::process;

/// Bad arguments, missing paths or invalid configuration
const EXIT_USAGE: i32 = 1;
/// The document could not be processed or written
const EXIT_PROCESSING: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "pdf-partmark")]
#[command(version)]
#[command(about = "Highlight part numbers in a PDF and outline -L/-R markers")]
struct Cli {
    /// PDF to read
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the highlighted PDF
    #[arg(short, long)]
    output: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the per-page palette shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON report of what was found on every page
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every match and draw call
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            process::exit(code);
        },
    };

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            process::exit(EXIT_USAGE);
        },
    };

    if let Err(e) = run(&cli, config) {
        eprintln!("Error: {}", e);
        process::exit(EXIT_PROCESSING);
    }
}

/// Check paths and build the configuration.
fn load_config(cli: &Cli) -> Result<HighlightConfig, String> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()));
    }
    if !parent_exists(&cli.output) {
        return Err(format!("Output directory does not exist: {}", cli.output.display()));
    }
    if let Some(report) = &cli.report {
        if !parent_exists(report) {
            return Err(format!("Report directory does not exist: {}", report.display()));
        }
    }

    let mut config = match &cli.config {
        Some(path) => HighlightConfig::from_json_file(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => HighlightConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parent_exists(path: &Path) -> bool {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
        _ => true,
    }
}

fn run(cli: &Cli, config: HighlightConfig) -> pdf_partmark::Result<()> {
    let mut surface = PdfSurface::open(&cli.input)?;
    let mut highlighter = Highlighter::new(config)?;

    let page_count = surface.page_count();
    println!("{} pages to process...", page_count);

    let mut report = DocumentReport::default();
    for page in 0..page_count {
        println!("Page: {}", page + 1);
        report.push(highlighter.process_page(&mut surface, page)?);
    }
    println!("{} Matches found", report.total_matches);

    let bytes = surface.save()?;
    std::fs::write(&cli.output, bytes)?;
    log::info!("Wrote {}", cli.output.display());

    if let Some(path) = &cli.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("Wrote report {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "pdf-partmark",
            "-i",
            "in.pdf",
            "-o",
            "out.pdf",
            "-c",
            "config.json",
            "--seed",
            "42",
            "--report",
            "report.json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("in.pdf"));
        assert_eq!(cli.output, PathBuf::from("out.pdf"));
        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.report, Some(PathBuf::from("report.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_output() {
        assert!(Cli::try_parse_from(["pdf-partmark", "-i", "in.pdf"]).is_err());
    }

    #[test]
    fn test_parent_exists() {
        assert!(parent_exists(Path::new("out.pdf")));
        assert!(!parent_exists(Path::new("/definitely/not/here/out.pdf")));
    }
}
