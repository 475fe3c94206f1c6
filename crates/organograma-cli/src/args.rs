//! Command-line argument definitions for the organogram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! an initial selection, configuration file selection and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Standalone SVG drawing
    #[default]
    Svg,
    /// Node positions and edge styles as JSON
    Json,
}

impl Format {
    /// File extension of documents in this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

/// Command-line arguments for the organogram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file [default: out.svg or out.json, following --format]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,

    /// Node to select before rendering (e.g. "socio-10")
    #[arg(short, long)]
    pub select: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the output path, defaulting to `out.<extension>` for the chosen format.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("out.{}", self.format.extension()))
    }
}
