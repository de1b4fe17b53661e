use std::path::PathBuf;

use clap::Parser;

use crate::core::{Encoding, OutputFormat};

/// Render the connections of an interface view
#[derive(Parser, Debug)]
#[command(name = "ivview")]
#[command(version, about, long_about = None)]
pub struct Ivview {
    /// Interface view document (YAML or JSON)
    pub input: PathBuf,

    /// Template group file, the bundled PlantUML group is used when absent
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Template)]
    pub format: OutputFormat,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Encoding::Latin1)]
    pub encoding: Encoding,

    /// Write the rendered view to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
