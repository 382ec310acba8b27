//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create `.reorder/` |
//! | `seed`, `list`, `status` | Create and inspect collections |
//! | `move`, `replay` | Drag items (one move, or a scripted gesture stream) |
//! | `lock`, `unlock`, `reset` | Pin items, restore defaults |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) enables debug logging on stderr:
//! ```bash
//! reorder --verbose move widgets w3 w1
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod collection;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
