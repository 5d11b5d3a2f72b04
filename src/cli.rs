//! Command-line interface definition for Picvote
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for watching the gallery, one-shot queries,
//! voting, and session management.

use clap::{Parser, Subcommand};

/// Picvote - Terminal client for the picture voting service
///
/// Browse the gallery, watch live results, and vote from the
/// command line.
#[derive(Parser, Debug, Clone)]
#[command(name = "picvote")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the configured server base URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Picvote
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Watch the gallery interactively with live refresh and voting
    Watch,

    /// Print the current picture gallery
    Gallery {
        /// Output as pretty-printed JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the current voting stats and top three
    Stats {
        /// Output as pretty-printed JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Vote for a picture by its id
    Vote {
        /// Id of the picture to vote for
        #[arg(short, long)]
        picture: u64,
    },

    /// Inspect or reset the stored voting session
    Session {
        /// Session subcommand
        #[command(subcommand)]
        action: SessionAction,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionAction {
    /// Print the stored session id and creation time
    Show,

    /// Delete the stored session; a new one is created on next use
    Reset,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            server: None,
            verbose: false,
            command: Commands::Watch,
        }
    }
}
