//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::collection;
use super::output::{Output, OutputFormat};
use crate::logging;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "reorder")]
#[command(author, version, about = "Drag-and-drop ordering for item collections")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new reorder project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Create a collection from item names
    Seed {
        /// Collection name
        collection: String,

        /// Item names, in their initial order
        names: Vec<String>,

        /// Replace an existing collection
        #[arg(long)]
        force: bool,
    },

    /// Show a collection in order
    List {
        /// Collection name
        collection: String,
    },

    /// Drag one item onto another
    ///
    /// The dragged item takes the target's position; items in between
    /// shift by one.
    Move {
        /// Collection name
        collection: String,

        /// ID of the item being dragged
        dragged: String,

        /// ID of the item it is dropped onto
        target: String,

        /// Compute the new order without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Lock an item so it can neither be dragged nor dropped onto
    Lock {
        /// Collection name
        collection: String,

        /// Item ID
        id: String,
    },

    /// Unlock a locked item
    Unlock {
        /// Collection name
        collection: String,

        /// Item ID
        id: String,
    },

    /// Restore the order recorded when the collection was seeded
    Reset {
        /// Collection name
        collection: String,
    },

    /// Replay a JSONL script of drag events
    Replay {
        /// Collection name
        collection: String,

        /// Script path, one event per line
        script: PathBuf,

        /// Compute the new order without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stored collections
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()?.global.default_format.into(),
    };
    let output = Output::new(format);

    tracing::debug!("reorder starting");

    match cli.command {
        Commands::Init { path } => {
            tracing::debug!(path = %path, "initializing project");
            let project = Project::init(&path)?;
            output.success(&format!(
                "Initialized reorder project at {}",
                project.root().display()
            ));
        }

        Commands::Seed { collection, names, force } => {
            collection::seed(&output, &collection, &names, force)?
        }
        Commands::List { collection } => collection::list(&output, &collection)?,
        Commands::Move { collection, dragged, target, dry_run } => {
            collection::move_item(&output, &collection, &dragged, &target, dry_run)?
        }
        Commands::Lock { collection, id } => {
            collection::set_locked(&output, &collection, &id, true)?
        }
        Commands::Unlock { collection, id } => {
            collection::set_locked(&output, &collection, &id, false)?
        }
        Commands::Reset { collection } => collection::reset(&output, &collection)?,
        Commands::Replay { collection, script, dry_run } => {
            collection::replay(&output, &collection, &script, dry_run)?
        }
        Commands::Status => collection::status(&output)?,
    }

    tracing::debug!("command completed");
    Ok(())
}
