//! CLI type definitions and enums

use clap::{Parser, ValueEnum};
use linkml_core::config::{RuleOrder, SchemaFormat};
use std::path::PathBuf;

/// Compile a GOLD ecosystem path table into a `LinkML` schema
#[derive(Parser, Debug)]
#[command(
    name = "gold-linkml",
    version,
    about = "Compile a GOLD ecosystem classification table into a LinkML schema"
)]
pub struct GoldLinkMLCli {
    /// Path table (xlsx, xlsm, xls, ods, csv or tsv)
    pub input: PathBuf,

    /// Schema serialization format (defaults to the configured one, then YAML)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Worksheet to read (defaults to the first one)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Treat the first column as a path position instead of a row key
    #[arg(long)]
    pub keep_key_column: bool,

    /// Order in which rules are emitted
    #[arg(long, value_enum)]
    pub rule_order: Option<RuleOrderArg>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the schema title
    #[arg(long)]
    pub title: Option<String>,

    /// Write the schema to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check the source rows against the compiled rules
    #[arg(long)]
    pub verify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output formats for the compiled schema
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// `LinkML` YAML
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for SchemaFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => SchemaFormat::Yaml,
            OutputFormat::Json => SchemaFormat::Json,
        }
    }
}

/// Rule emission order
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleOrderArg {
    /// Order in which prefixes first appear in the table
    FirstSeen,
    /// Sorted by prefix values
    Lexical,
}

impl From<RuleOrderArg> for RuleOrder {
    fn from(order: RuleOrderArg) -> Self {
        match order {
            RuleOrderArg::FirstSeen => RuleOrder::FirstSeen,
            RuleOrderArg::Lexical => RuleOrder::Lexical,
        }
    }
}
