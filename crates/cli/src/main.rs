//! # jsonzip: A CLI for `jsonzip`
//!
//! Converts a CSV file on disk into a zip of `<slug>.json` files, using the same
//! pipeline as the HTTP server.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jsonzip::{collect, decode_upload, extract, DuplicatePolicy, ExtractOptions, ValidationMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the JSON column of a CSV file into a zip archive
    Extract(ExtractArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// The CSV file to read
    input: PathBuf,
    /// Where to write the zip. A directory gets the default file name inside it.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Drop rows whose JSON does not parse, even if they look like an object
    #[arg(long)]
    strict: bool,
    /// Fail instead of overwriting when two rows share a slug
    #[arg(long)]
    reject_duplicates: bool,
    /// List the files that would be written without creating the archive
    #[arg(long)]
    dry_run: bool,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            validation: if self.strict {
                ValidationMode::Strict
            } else {
                ValidationMode::Lenient
            },
            duplicates: if self.reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::LastWriteWins
            },
        }
    }
}

// --- Main Application Entry ---

fn main() -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract(args) => handle_extract(args),
    }
}

// --- Command Handlers ---

fn handle_extract(args: &ExtractArgs) -> Result<()> {
    let bytes = fs::read(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;
    let csv_text = decode_upload(&bytes);
    let options = args.options();
    info!(input = %args.input.display(), ?options, "Extracting JSON from CSV");

    if args.dry_run {
        let result = collect(&csv_text, &options)?;
        if result.processed() == 0 {
            bail!(jsonzip::ExtractError::NoValidJson);
        }
        for entry in result.entries() {
            println!("{}", entry.file_name());
        }
        println!("{} JSON files would be written", result.processed());
        return Ok(());
    }

    let extraction = extract(&csv_text, &options)?;
    let output = output_path(args.output.as_deref(), &extraction.file_name);
    fs::write(&output, &extraction.bytes)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    println!(
        "Wrote {} JSON files to {}",
        extraction.processed(),
        output.display()
    );
    Ok(())
}

/// Resolves where the archive goes: the explicit path, a default name inside an
/// explicit directory, or the default name in the working directory.
fn output_path(output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_name),
    }
}
