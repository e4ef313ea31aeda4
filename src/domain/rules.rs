//! Match rules
//!
//! Opaque configuration decided before the first ball: innings length, squad
//! sizes, extras toggles and their run values, and who bats first. Some of
//! these can be revised mid-match through the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two sides in the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    A,
    B,
}

impl TeamSide {
    /// Returns the other side
    pub fn other(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::A => write!(f, "a"),
            TeamSide::B => write!(f, "b"),
        }
    }
}

impl FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "1" => Ok(TeamSide::A),
            "b" | "2" => Ok(TeamSide::B),
            other => Err(format!("unknown side '{}', expected 'a' or 'b'", other)),
        }
    }
}

/// A side's name and squad size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub players: u32,
}

impl TeamConfig {
    pub fn new(name: impl Into<String>, players: u32) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }
}

/// Rules for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Legal overs per innings
    pub overs: u32,

    pub team_a: TeamConfig,
    pub team_b: TeamConfig,

    /// Side that bats in the first innings (toss outcome)
    pub batting_first: TeamSide,

    /// The last remaining batsman may bat on alone
    pub last_man_stands: bool,

    /// Maximum overs per bowler; `None` means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler_over_cap: Option<u32>,

    pub wides: bool,
    pub wide_runs: u32,

    pub no_balls: bool,
    pub no_ball_runs: u32,

    pub byes: bool,

    /// A no-ball makes the next legal delivery a free hit
    pub free_hit: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            overs: 20,
            team_a: TeamConfig::new("Team A", 11),
            team_b: TeamConfig::new("Team B", 11),
            batting_first: TeamSide::A,
            last_man_stands: false,
            bowler_over_cap: None,
            wides: true,
            wide_runs: 1,
            no_balls: true,
            no_ball_runs: 1,
            byes: true,
            free_hit: true,
        }
    }
}

impl MatchRules {
    /// Returns the configuration for a side
    pub fn team(&self, side: TeamSide) -> &TeamConfig {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub(crate) fn team_mut(&mut self, side: TeamSide) -> &mut TeamConfig {
        match side {
            TeamSide::A => &mut self.team_a,
            TeamSide::B => &mut self.team_b,
        }
    }

    /// Side batting in the given innings (1 or 2)
    pub fn batting_side(&self, innings: u8) -> TeamSide {
        if innings <= 1 {
            self.batting_first
        } else {
            self.batting_first.other()
        }
    }

    /// Wickets that end an innings for the given batting side
    ///
    /// `players - 1` normally; `players` when the last man may bat alone.
    pub fn wicket_limit(&self, side: TeamSide) -> u32 {
        let players = self.team(side).players;
        if self.last_man_stands {
            players
        } else {
            players.saturating_sub(1)
        }
    }

    /// Legal balls in a full innings
    pub fn ball_limit(&self) -> u32 {
        self.overs * 6
    }
}
