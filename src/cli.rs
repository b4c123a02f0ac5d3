//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use hubtheme::ThemeMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hubtheme")]
#[command(author, version, about = "Theme catalog, preference store and pre-paint bootstrap for Better Hub")]
pub struct Cli {
    /// Configuration file (default: .hubtheme.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .hubtheme.toml
    Init {
        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// List the theme catalog
    List {
        /// Only themes of this mode
        #[arg(short, long, value_enum)]
        mode: Option<ThemeMode>,
    },
    /// Print the bootstrap script for the document head
    Script {
        /// Print bare JavaScript instead of a <script> element
        #[arg(long)]
        raw: bool,
        /// CSP nonce for the <script> element
        #[arg(long)]
        nonce: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Resolve the active theme id from the stored preferences
    Resolve {
        #[command(flatten)]
        system: SystemArgs,
    },
    /// Resolve and apply, printing the resulting <html> attributes
    Apply {
        #[command(flatten)]
        system: SystemArgs,
    },
    /// Select a theme and remember it for its mode
    Set {
        /// Theme id, e.g. "ember"
        id: String,
    },
    /// Switch to the remembered theme of the other mode
    Toggle {
        #[command(flatten)]
        system: SystemArgs,
    },
    /// Show stored preferences and catalog health
    Status,
}

/// Overrides for the system color scheme signal
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SystemArgs {
    /// Treat the system as preferring dark
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,
    /// Treat the system as preferring light
    #[arg(long)]
    pub light: bool,
}

impl SystemArgs {
    pub fn prefers_dark(&self) -> Option<bool> {
        match (self.dark, self.light) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
