//! Stable identifiers for batsmen and bowlers
//!
//! ID Format:
//! - Batsman IDs: `p-{7-char-hash}` (e.g., `p-7f2b4c1`)
//! - Bowler IDs: `w-{7-char-hash}` (e.g., `w-9d3e5f2`)
//!
//! Hash is derived from the innings, an entry sequence number and the display
//! name at creation. The sequence never repeats within an innings, so two
//! players with the same name still get different IDs. The name is only an
//! input to the hash: renaming a player never changes their ID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid player ID format: expected 'p-{{7-char-hash}}', got '{0}'")]
    InvalidPlayerId(String),

    #[error("Invalid bowler ID format: expected 'w-{{7-char-hash}}', got '{0}'")]
    InvalidBowlerId(String),
}

/// Generates a 7-character hash from the identity seed
fn generate_hash(kind: char, innings: u8, sequence: u32, name: &str) -> String {
    let input = format!("{}:{}:{}:{}", kind, innings, sequence, name);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

fn parse_hash(s: &str, prefix: &str) -> Option<String> {
    let hash = s.trim().strip_prefix(prefix)?;
    if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(hash.to_ascii_lowercase())
}

/// Batsman ID in the format `p-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId {
    hash: String,
}

impl PlayerId {
    /// Creates a new player ID for an entry into the given innings
    pub fn new(innings: u8, sequence: u32, name: &str) -> Self {
        Self {
            hash: generate_hash('p', innings, sequence, name),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p-{}", self.hash)
    }
}

impl FromStr for PlayerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hash(s, "p-")
            .map(|hash| Self { hash })
            .ok_or_else(|| IdError::InvalidPlayerId(s.trim().to_string()))
    }
}

impl TryFrom<String> for PlayerId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.to_string()
    }
}

/// Bowler ID in the format `w-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BowlerId {
    hash: String,
}

impl BowlerId {
    /// Creates a new bowler ID for an entry into the given innings
    pub fn new(innings: u8, sequence: u32, name: &str) -> Self {
        Self {
            hash: generate_hash('w', innings, sequence, name),
        }
    }
}

impl fmt::Display for BowlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w-{}", self.hash)
    }
}

impl FromStr for BowlerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hash(s, "w-")
            .map(|hash| Self { hash })
            .ok_or_else(|| IdError::InvalidBowlerId(s.trim().to_string()))
    }
}

impl TryFrom<String> for BowlerId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BowlerId> for String {
    fn from(id: BowlerId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_is_unique_per_sequence() {
        let id1 = PlayerId::new(1, 1, "Same Name");
        let id2 = PlayerId::new(1, 2, "Same Name");

        assert_ne!(id1, id2);
    }

    #[test]
    fn player_id_differs_across_innings() {
        assert_ne!(PlayerId::new(1, 1, "Rohit"), PlayerId::new(2, 1, "Rohit"));
    }

    #[test]
    fn player_id_format_is_correct() {
        let s = PlayerId::new(1, 1, "Rohit").to_string();

        assert!(s.starts_with("p-"));
        assert_eq!(s.len(), 9); // "p-" + 7 chars
    }

    #[test]
    fn player_id_parses_correctly() {
        let original = PlayerId::new(1, 3, "Gill");
        let parsed: PlayerId = original.to_string().parse().unwrap();

        assert_eq!(original, parsed);
    }

    #[test]
    fn player_id_rejects_invalid_format() {
        assert!("invalid".parse::<PlayerId>().is_err());
        assert!("p-short".parse::<PlayerId>().is_err());
        assert!("p-toolonggg".parse::<PlayerId>().is_err());
        assert!("p-gggggg1".parse::<PlayerId>().is_err()); // 'g' is not hex
        assert!("w-1234567".parse::<PlayerId>().is_err()); // bowler prefix
    }

    #[test]
    fn bowler_id_format_and_parse() {
        let original = BowlerId::new(1, 1, "Bumrah");
        let s = original.to_string();

        assert!(s.starts_with("w-"));
        assert_eq!(s.parse::<BowlerId>().unwrap(), original);
        assert!("p-1234567".parse::<BowlerId>().is_err());
    }

    #[test]
    fn player_and_bowler_hashes_differ_for_same_seed() {
        let p = PlayerId::new(1, 1, "Jadeja");
        let w = BowlerId::new(1, 1, "Jadeja");

        assert_ne!(p.to_string()[2..], w.to_string()[2..]);
    }

    #[test]
    fn serde_roundtrip_ids() {
        let player = PlayerId::new(2, 4, "Kohli");
        let json = serde_json::to_string(&player).unwrap();
        assert_eq!(json, format!("\"{}\"", player));
        assert_eq!(serde_json::from_str::<PlayerId>(&json).unwrap(), player);

        let bowler = BowlerId::new(2, 1, "Starc");
        let json = serde_json::to_string(&bowler).unwrap();
        assert_eq!(serde_json::from_str::<BowlerId>(&json).unwrap(), bowler);
    }
}
