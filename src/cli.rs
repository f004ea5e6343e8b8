//! CLI argument parsing for Medir

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for extraction results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "medir")]
#[command(version)]
#[command(about = "Extract cost-centre timings from compiler benchmark profiling reports", long_about = None)]
pub struct Cli {
    /// Profiling report files, or results directories holding *.prof files
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Cost centre to look up (repeatable; overrides the built-in tracked list)
    #[arg(long = "cost-centre", value_name = "NAME")]
    pub cost_centres: Vec<String>,

    /// Exit with an error if any report fails to parse
    #[arg(long = "strict")]
    pub strict: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
