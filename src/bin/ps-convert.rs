//! CLI tool to convert an enrollment spreadsheet into a Layout PS text file.
//!
//! Usage:
//!   ps-convert convert <planilha.xlsx>
//!   ps-convert convert <planilha.xlsx> -o <saida.txt> --strict
//!   ps-convert layout

use clap::{Parser, Subcommand};
use ps_layout::{
    ConvertError, EncoderConfig, ErrorKind, Layout, ReaderConfig, Strictness, convert_path,
};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;

/// Health-plan spreadsheet to Layout PS converter.
#[derive(Parser)]
#[command(name = "ps-convert")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet (xlsx, xls, xlsb, ods) into 200-byte records.
    Convert {
        /// Input spreadsheet
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "Layout PS.txt")]
        output: PathBuf,

        /// Sheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// 1-based row holding the column headers
        #[arg(long, default_value = "2")]
        header_row: NonZeroUsize,

        /// Reject the file on the first malformed cell instead of writing zeros
        #[arg(long)]
        strict: bool,

        /// Show paths, row counts and debug logging on stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the Layout PS field table.
    Layout,
}

fn main() {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Convert {
            input,
            output,
            sheet,
            header_row,
            strict,
            verbose,
        } => {
            init_logging(verbose);
            let reader = ReaderConfig {
                sheet,
                header_row: header_row.get() - 1,
                ..ReaderConfig::default()
            };
            let encoder = EncoderConfig {
                strictness: if strict {
                    Strictness::Strict
                } else {
                    Strictness::Lenient
                },
            };
            if let Err(e) = run_convert(&input, &output, &reader, encoder, verbose) {
                eprintln!("Error: {e}");
                process::exit(match e.kind() {
                    ErrorKind::ClientInput => 2,
                    ErrorKind::Internal => 1,
                });
            }
        }
        Commands::Layout => match Layout::ps() {
            Ok(layout) => print!("{layout}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run_convert(
    input: &Path,
    output: &Path,
    reader: &ReaderConfig,
    encoder: EncoderConfig,
    verbose: bool,
) -> Result<(), ConvertError> {
    if verbose {
        eprintln!("Input:  {}", input.display());
        eprintln!("Output: {}", output.display());
        eprintln!("Mode:   {:?}", encoder.strictness);
    }

    let layout = Layout::ps()?;
    let doc = convert_path(input, &layout, reader, encoder)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, doc.to_bytes())?;

    eprintln!(
        "Processed {} records ({} blank rows skipped), output: {}",
        doc.lines().len(),
        doc.discarded_rows(),
        output.display()
    );
    // Each warning was already logged as it happened.
    if !doc.warnings().is_empty() {
        eprintln!("{} field(s) reprocessed", doc.warnings().len());
    }
    Ok(())
}
