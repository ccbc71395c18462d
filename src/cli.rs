use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LoggingMode;

#[derive(Parser)]
#[command(name = "treehop")]
#[command(about = "Jump to syntax nodes by typing hint labels", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        value_enum,
        default_value_t = LoggingMode::Stderr,
        hide = true
    )]
    pub logging_mode: LoggingMode,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of the nearest treehop.toml
    #[arg(long, global = true, env = "TREEHOP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hints one activation would draw
    Hints {
        /// Source file to parse
        file: PathBuf,

        #[command(flatten)]
        window: Window,

        /// Start the search from the smallest node spanning this 1-based line
        #[arg(long)]
        focus_line: Option<usize>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Activate, type keys and report where the cursor lands
    Jump {
        /// Source file to parse
        file: PathBuf,

        /// Keys to type, one keystroke per character
        #[arg(long)]
        keys: String,

        #[command(flatten)]
        window: Window,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse a file and jump around with hints
    View {
        /// Source file to open
        file: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Print the JSON Schema of treehop.toml instead
        #[arg(long)]
        schema: bool,
    },
}

/// Byte window treated as the visible range.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct Window {
    /// First visible byte offset (default: start of file)
    #[arg(long)]
    pub start: Option<usize>,

    /// End of the visible range, exclusive (default: end of file)
    #[arg(long)]
    pub end: Option<usize>,
}

impl Window {
    pub fn resolve(&self, len: usize) -> std::ops::Range<usize> {
        let end = self.end.unwrap_or(len).min(len);
        let start = self.start.unwrap_or(0).min(end);
        start..end
    }
}
