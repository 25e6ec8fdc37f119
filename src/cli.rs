use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::ExportFormat;
use crate::pipeline::harmony::HarmonyMode;

/// Generate, lock, reorder and export five-color palettes.
#[derive(Parser, Debug)]
#[command(name = "chromaset", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Palette history file (defaults to ~/.config/chromaset/history.json)
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Base URL for share links
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new palette and record it in history
    Generate {
        /// Harmony rule for the new hues
        #[arg(short, long, value_enum, default_value_t = HarmonyMode::Random)]
        mode: HarmonyMode,

        /// Start from this palette (share code, share URL or `latest`)
        #[arg(long)]
        from: Option<String>,

        /// Slots (1-5) of the starting palette to keep
        #[arg(short, long, value_delimiter = ',', requires = "from")]
        lock: Vec<usize>,
    },

    /// Show WCAG contrast for every pair of colors in a palette
    Contrast {
        /// Share code, share URL or `latest`
        palette: String,
    },

    /// Export a palette as CSS, JSON or PNG
    Export {
        /// Share code, share URL or `latest`
        palette: String,

        #[arg(short, long, value_enum)]
        format: ExportFormat,

        /// Write to this file instead of stdout (PNG defaults to palette.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a share link for a palette
    Share {
        /// Share code, share URL or `latest`
        palette: String,
    },

    /// Inspect or edit the palette history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Launch the interactive editor
    Tui {
        /// Start from this palette (share code, share URL or `latest`)
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// List saved palettes, most recent first
    List,
    /// Show one saved palette
    Show { id: String },
    /// Delete one saved palette
    Remove { id: String },
    /// Delete every saved palette
    Clear,
}
