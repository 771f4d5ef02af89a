//! mc-sdf Command Line Interface
//!
//! Validates mc-sdf-1 documents and compiles them into `setblock` commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate a document
//! sdf_cli validate --file castle.yaml
//!
//! # Show the document metadata
//! cat castle.yaml | sdf_cli meta
//!
//! # Generate commands starting at a world position
//! sdf_cli generate --file castle.yaml --position "100 64 -20"
//!
//! # Machine-readable placements
//! sdf_cli --format json generate --file castle.yaml
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mc_sdf::sdf_core::{Document, Origin};
use mc_sdf::{load_str, parse_position, render_document};

#[derive(Parser)]
#[command(name = "sdf_cli")]
#[command(author = "mc-sdf")]
#[command(version = "0.1.0")]
#[command(about = "Validate mc-sdf-1 structure documents and generate block commands")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a document
    Validate {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the document metadata
    Meta {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate one setblock command per placement
    Generate {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// World position of the root frame: "<x> <y> <z>"
        #[arg(short, long, env = "MC_SDF_POSITION", default_value = "0 0 0")]
        position: String,

        /// Skip placements whose material cannot be resolved
        #[arg(long)]
        lenient: bool,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate { file } => cmd_validate(file, cli.format, cli.quiet),
        Commands::Meta { file } => cmd_meta(file, cli.format),
        Commands::Generate {
            file,
            position,
            lenient,
        } => cmd_generate(file, &position, lenient, cli.format, cli.quiet),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": e }));
            } else {
                eprintln!("{}: {}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_validate(file: Option<PathBuf>, format: OutputFormat, quiet: bool) -> Result<(), String> {
    let doc = read_document(file)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "cells": doc.cells().iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                "context_count": doc.context_count(),
                "item_count": doc.item_count(),
            });
            print_json(&output)?;
        }
        OutputFormat::Text => {
            println!(
                "cells={} contexts={} items={}",
                doc.cells().len(),
                doc.context_count(),
                doc.item_count()
            );
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} cell(s), {} context(s), {} item(s)",
                "OK".green(),
                doc.cells().len(),
                doc.context_count(),
                doc.item_count()
            );
            if !quiet {
                for cell in doc.cells() {
                    println!(
                        "  {} - {} context(s), {} item(s)",
                        cell.name.cyan(),
                        cell.context_count(),
                        cell.item_count()
                    );
                }
            }
        }
    }

    Ok(())
}

fn cmd_meta(file: Option<PathBuf>, format: OutputFormat) -> Result<(), String> {
    let doc = read_document(file)?;
    let merged = doc.meta().merged();

    match format {
        OutputFormat::Json => print_json(&merged)?,
        OutputFormat::Text | OutputFormat::Pretty => {
            if doc.meta().is_empty() {
                println!("(no metadata)");
                return Ok(());
            }
            let text = serde_yaml::to_string(&merged)
                .map_err(|e| format!("YAML serialization failed: {}", e))?;
            print!("{}", text);
        }
    }

    Ok(())
}

fn cmd_generate(
    file: Option<PathBuf>,
    position: &str,
    lenient: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let origin: Origin = parse_position(position).map_err(|e| e.to_string())?;
    let doc = read_document(file)?;

    let rendered = render_document(&doc, origin, lenient).map_err(|e| e.to_string())?;

    match format {
        OutputFormat::Json => print_json(&rendered)?,
        OutputFormat::Text => {
            for r in &rendered {
                println!("{}", r.command);
            }
        }
        OutputFormat::Pretty => {
            for r in &rendered {
                println!("{}", r.command);
            }
            if !quiet {
                eprintln!(
                    "{} {} command(s) from {} placement(s)",
                    "OK".green(),
                    rendered.len(),
                    doc.item_count()
                );
            }
        }
    }

    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_document(file: Option<PathBuf>) -> Result<Document, String> {
    let source = read_input(file)?;
    load_str(&source).map_err(|e| format!("{:#}", e))
}

fn read_input(file: Option<PathBuf>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e)),
        None => {
            if io::stdin().is_terminal() {
                return Err("No input provided. Use --file or pipe input via stdin.".to_string());
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e))?
    );
    Ok(())
}
