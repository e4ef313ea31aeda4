//! crease - ball-by-ball scoring for limited-overs cricket
//!
//! A match lives in a `.crease/` directory. Every scoring command loads the
//! undo stack, applies one event through [`domain::Scorer`], and appends the
//! resulting snapshot. Scorecards, partnerships and the over-by-over history
//! are derived from the same state.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{MatchRules, MatchState, Outcome, Scorer};
