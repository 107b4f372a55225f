//! CLI argument parsing for jotter
//!
//! Supports global flags: --root, --store, --format, --quiet, --verbose

pub mod args;
pub mod format;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{NoteFields, WatchArgs};
pub use jotter_core::format::OutputFormat;

/// Jotter - local notes kept in step across every running instance
#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store directory
    #[arg(long, global = true, env = "JOTTER_STORE")]
    pub store: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. `trace`, `jotter_core=debug`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new jotter store
    Init,

    /// Create a new note and print its id
    Create(NoteFields),

    /// Change the title and/or content of a note
    Update {
        /// Note ID
        id: String,

        #[command(flatten)]
        fields: NoteFields,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// List notes in creation order
    List,

    /// Show a note
    Show {
        /// Note ID
        id: String,
    },

    /// Follow writes from other instances until interrupted
    Watch(WatchArgs),
}
