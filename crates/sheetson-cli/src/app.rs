//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};

use sheetson_data::{read_workbook_bytes, ExcelSource, RowSource, RowWindow};

#[derive(Parser)]
#[command(name = "sheetson")]
#[command(author, version, about = "Structured JSON out of free-form spreadsheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an Excel workbook to structured JSON
    Convert {
        /// Input .xlsx file (base64 text with --base64-in)
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the input file as base64-encoded workbook bytes
        #[arg(long)]
        base64_in: bool,

        /// Base64-encode the JSON output
        #[arg(long)]
        base64_out: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// First scanned row (1-based)
        #[arg(long, default_value_t = 3)]
        first_row: u32,

        /// Last scanned row (1-based, inclusive)
        #[arg(long, default_value_t = 214)]
        last_row: u32,

        /// Number of columns scanned per row
        #[arg(long, default_value_t = 50)]
        max_cols: u32,
    },

    /// List the sheet names of a workbook, in workbook order
    Sheets {
        /// Input .xlsx file
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            base64_in,
            base64_out,
            pretty,
            first_row,
            last_row,
            max_cols,
        } => {
            let window = RowWindow {
                first_row,
                last_row,
                max_cols,
            };
            let rendered = convert_file(&input, base64_in, base64_out, pretty, &window)?;

            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }
            Ok(())
        }

        Commands::Sheets { input } => {
            for name in list_sheets(&input)? {
                println!("{name}");
            }
            Ok(())
        }
    }
}

/// Convert one workbook file to its JSON rendering
pub fn convert_file(
    input: &Path,
    base64_in: bool,
    base64_out: bool,
    pretty: bool,
    window: &RowWindow,
) -> Result<String> {
    let bytes = load_workbook_bytes(input, base64_in)?;
    let doc = read_workbook_bytes(bytes, window)
        .with_context(|| format!("failed to process {}", input.display()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };

    Ok(if base64_out { STANDARD.encode(json) } else { json })
}

/// List a workbook's sheet names in declaration order
pub fn list_sheets(input: &Path) -> Result<Vec<String>> {
    let bytes =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let source = ExcelSource::from_bytes(bytes)?;
    Ok(source.sheet_names())
}

fn load_workbook_bytes(input: &Path, base64_in: bool) -> Result<Vec<u8>> {
    if base64_in {
        let encoded = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        // Tolerate line-wrapped payloads
        let compact: String = encoded.split_whitespace().collect();
        STANDARD
            .decode(compact.as_bytes())
            .context("input is not valid base64")
    } else {
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))
    }
}
