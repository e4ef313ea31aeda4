//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Setup | Match and innings | `init`, `start`, `abandon` |
//! | Deliveries | One ball at a time | `run 4`, `wide`, `no-ball`, `bye 2` |
//! | Wickets | Multi-step dismissal entry | `wicket caught`, `wicket fielder Smith` |
//! | Personnel | Batsmen and bowlers | `batsman`, `bowler`, `retire`, `return`, `dismiss-bowler` |
//! | Corrections | Fixing the book | `undo`, `rename`, `revise overs` |
//! | Views | Reading the book | `status`, `scorecard`, `history`, `partnerships` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including engine logs:
//! ```bash
//! crease --verbose run 4
//! ```
//! `CREASE_LOG` accepts a `tracing` filter directive and overrides both.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod revise;
mod scoring;
mod views;
mod wicket;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
