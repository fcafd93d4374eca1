//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// DNA profile store: flag, count, list and clean up profiles of interest
#[derive(Parser, Debug)]
#[command(name = "forensic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Data file (default: `data_file` from config)
    #[arg(short = 'f', long, global = true, value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flag profiles of interest and print a summary
    Flag,

    /// Count flagged (or unflagged) profiles
    Count {
        /// Count profiles that are not of interest
        #[arg(long)]
        unflagged: bool,
    },

    /// List unflagged people in level order
    Unmarked,

    /// Remove people by full name ("Last, First")
    ///
    /// Works on the loaded copy; the data file is not rewritten.
    Remove {
        /// Full names to remove
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove every profile that is not of interest
    ///
    /// Works on the loaded copy; the data file is not rewritten.
    Cleanup,

    /// Show the tree structure (* marks profiles of interest)
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Show config file locations
    Path,

    /// Print a config template
    Template,
}
