//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weather Control - weather state synchronization for broadcast graphics
#[derive(Parser, Debug)]
#[command(name = "weather-control")]
#[command(version)]
#[command(about = "Synchronizes broadcast graphics with live or overridden weather data")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to the config file (defaults to the XDG config location)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start polling immediately, regardless of the saved auto-update flag
    #[arg(long)]
    pub poll: bool,

    /// Forward resolved values to the node graph from startup
    #[arg(long)]
    pub linked: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Create the config file with defaults
    Init,
    /// Print the config file path
    Path,
    /// Print the stored configuration
    Show,
}
