//! Domain models for crease
//!
//! Contains the scoring rules and state machine without any I/O concerns.

mod ball;
mod engine;
mod error;
mod id;
mod partnership;
mod roster;
mod rules;
mod state;
mod summary;
mod undo;
mod wicket;

pub use ball::{BallEvent, BallKind, History, OverLine};
pub use engine::{BallReport, Scorebook, Scorer, WicketProgress};
pub use error::{
    same_name, validate_name, ScoringError, ScoringResult, StateError, ValidationError,
    MIN_NAME_LEN,
};
pub use id::{BowlerId, IdError, PlayerId};
pub use partnership::{Partnership, PartnershipEnd, PartnershipRecord, PartnershipTracker};
pub use roster::{Batsman, Bowler, Position, Roster, RETIRED_HURT};
pub use rules::{MatchRules, TeamConfig, TeamSide};
pub use state::{MatchState, Outcome, Overs};
pub use summary::{BattingRow, BowlingRow, Extras, InningsSummary};
pub use undo::{Snapshot, UndoStack};
pub use wicket::{Dismissal, DismissalKind, WicketFlow, WicketStep};
