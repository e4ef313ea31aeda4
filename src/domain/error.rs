//! Scoring errors
//!
//! Every failure is local and reported synchronously. An operation that
//! returns an error has not mutated any state.

use thiserror::Error;

use super::wicket::DismissalKind;

/// The caller supplied something the rules do not allow
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Name '{name}' is too short (minimum {min} characters)")]
    NameTooShort { name: String, min: usize },

    #[error("A player named '{0}' is already in this innings")]
    DuplicateName(String),

    #[error("{0} bowled the previous over and cannot bowl consecutive overs")]
    ConsecutiveOvers(String),

    #[error("{name} has already bowled the maximum of {cap} overs")]
    BowlerCapReached { name: String, cap: u32 },

    #[error("{0} has been removed from the attack for this innings")]
    BowlerDismissed(String),

    #[error("No retired player named '{0}' is waiting to return")]
    RetiredPlayerNotFound(String),

    #[error("A {0} dismissal needs the fielder's name")]
    FielderRequired(DismissalKind),

    #[error("Invalid run count: {0}")]
    InvalidRuns(u32),

    #[error("Overs must be at least 1, got {0}")]
    InvalidOvers(u32),

    #[error("Squad size must be at least 2, got {0}")]
    InvalidSquadSize(u32),

    #[error("Unknown player or bowler: {0}")]
    UnknownPlayer(String),
}

/// The request is valid but not in the current state of the match
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    #[error("Nothing to undo")]
    EmptyUndoStack,

    #[error("A wicket is being recorded; finish or cancel it first")]
    WicketInProgress,

    #[error("Waiting for the new batsman")]
    NewBatsmanPending,

    #[error("Waiting for the next bowler")]
    NewBowlerPending,

    #[error("An innings is already in progress")]
    InningsActive,

    #[error("No innings in progress")]
    NoActiveInnings,

    #[error("The match is over")]
    MatchOver,

    #[error("No bowler change has been requested")]
    NoBowlerRequested,

    #[error("No batsman is needed")]
    NoBatsmanRequested,

    #[error("Wicket entry expected {expected}, but it is {actual}")]
    UnexpectedWicketStep {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Any error the scoring engine can report
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Minimum length of a display name after trimming
pub const MIN_NAME_LEN: usize = 2;

/// Trims and validates a display name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort {
            name: name.to_string(),
            min: MIN_NAME_LEN,
        });
    }
    Ok(name.to_string())
}

/// Case-insensitive name comparison used for lookups by display name
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_trims() {
        assert_eq!(validate_name("  Dhoni ").unwrap(), "Dhoni");
    }

    #[test]
    fn validate_name_rejects_empty_and_short() {
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert!(matches!(
            validate_name("X"),
            Err(ValidationError::NameTooShort { min: 2, .. })
        ));
    }

    #[test]
    fn same_name_ignores_case_and_whitespace() {
        assert!(same_name("Bumrah", " bumrah"));
        assert!(!same_name("Bumrah", "Shami"));
    }

    #[test]
    fn scoring_error_wraps_both_kinds() {
        let err: ScoringError = StateError::EmptyUndoStack.into();
        assert_eq!(err.to_string(), "Nothing to undo");

        let err: ScoringError = ValidationError::InvalidRuns(9).into();
        assert!(matches!(err, ScoringError::Validation(_)));
    }
}
