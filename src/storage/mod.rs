//! # Storage Layer
//!
//! Persistence for a match, kept in plain files next to wherever the match
//! was started.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Undo stack | JSONL (one snapshot per line) | `.crease/snapshots.jsonl` |
//! | Open wicket entry | JSON | `.crease/wicket.json` |
//! | Match rules | TOML | `.crease/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`SnapshotStore`] uses file locking (`fs2`) for concurrent access
//! - Rewrites are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a match directory
//! - [`SnapshotStore`] - Read/write scorebook snapshots as JSONL
//! - [`Config`] - Match and global configuration

mod config;
mod jsonl;
mod project;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig};
pub use jsonl::SnapshotStore;
pub use project::{Project, ProjectError, Session};
