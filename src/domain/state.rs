//! Match state: score, overs, innings and outcome

use serde::{Deserialize, Serialize};
use std::fmt;

use super::rules::TeamSide;

/// Where the match stands
///
/// `Team1Win` and `Team2Win` name sides A and B as configured, not the
/// order of batting: with side B batting first, a successful chase by side A
/// is `Team1Win`. Use [`Outcome::winner`] to get the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    InningsBreak,
    Team1Win,
    Team2Win,
    Tie,
    NoResult,
}

impl Outcome {
    /// Returns true once no more balls can be bowled in the match
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Outcome::Team1Win | Outcome::Team2Win | Outcome::Tie | Outcome::NoResult
        )
    }

    /// Outcome for a win by the given side (team 1 is side A)
    pub fn win_for(side: TeamSide) -> Self {
        match side {
            TeamSide::A => Outcome::Team1Win,
            TeamSide::B => Outcome::Team2Win,
        }
    }

    /// Winning side, if any
    pub fn winner(&self) -> Option<TeamSide> {
        match self {
            Outcome::Team1Win => Some(TeamSide::A),
            Outcome::Team2Win => Some(TeamSide::B),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::InProgress => "in_progress",
            Outcome::InningsBreak => "innings_break",
            Outcome::Team1Win => "team1_win",
            Outcome::Team2Win => "team2_win",
            Outcome::Tie => "tie",
            Outcome::NoResult => "no_result",
        }
    }
}

/// Overs in scorebook form (`overs.balls`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Overs {
    pub overs: u32,
    pub balls: u32,
}

impl Overs {
    pub fn from_balls(legal_balls: u32) -> Self {
        Self {
            overs: legal_balls / 6,
            balls: legal_balls % 6,
        }
    }

    pub fn total_balls(&self) -> u32 {
        self.overs * 6 + self.balls
    }

    /// Overs as a decimal for rate calculations
    pub fn as_f64(&self) -> f64 {
        self.overs as f64 + self.balls as f64 / 6.0
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.overs, self.balls)
    }
}

/// Ball-level state of the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u32,
    pub wickets: u32,
    /// Legal balls bowled in the current over, always below 6
    pub balls_in_over: u32,
    pub completed_overs: u32,
    /// 1 or 2
    pub innings: u8,
    /// Set when the second innings begins
    pub target: Option<u32>,
    pub is_free_hit: bool,
    pub outcome: Outcome,
    /// True between `start_innings` and the end of that innings
    pub innings_active: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            score: 0,
            wickets: 0,
            balls_in_over: 0,
            completed_overs: 0,
            innings: 1,
            target: None,
            is_free_hit: false,
            outcome: Outcome::InProgress,
            innings_active: false,
        }
    }

    /// Legal balls bowled this innings
    pub fn legal_balls(&self) -> u32 {
        self.completed_overs * 6 + self.balls_in_over
    }

    pub fn overs(&self) -> Overs {
        Overs {
            overs: self.completed_overs,
            balls: self.balls_in_over,
        }
    }

    /// Counts a legal ball; returns true if it completed the over
    pub(crate) fn consume_legal_ball(&mut self) -> bool {
        self.balls_in_over += 1;
        if self.balls_in_over == 6 {
            self.balls_in_over = 0;
            self.completed_overs += 1;
            true
        } else {
            false
        }
    }

    /// Runs still needed in a chase
    pub fn runs_required(&self) -> Option<u32> {
        self.target.map(|t| t.saturating_sub(self.score))
    }

    /// Runs per over so far
    pub fn run_rate(&self) -> f64 {
        let overs = self.overs().as_f64();
        if overs == 0.0 {
            0.0
        } else {
            self.score as f64 / overs
        }
    }

    /// Resets the ball-level counters for the second innings
    pub(crate) fn begin_second_innings(&mut self) {
        self.target = Some(self.score + 1);
        self.score = 0;
        self.wickets = 0;
        self.balls_in_over = 0;
        self.completed_overs = 0;
        self.innings = 2;
        self.is_free_hit = false;
        self.innings_active = false;
        self.outcome = Outcome::InningsBreak;
    }
}
