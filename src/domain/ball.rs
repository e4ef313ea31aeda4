//! Ball events and innings history
//!
//! The history is append-only and is the only source for ball-by-ball and
//! over-by-over views. Nothing is ever rebuilt from aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{BowlerId, PlayerId};

/// What happened on a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallKind {
    /// Runs off the bat (0 for a dot ball)
    Run,
    Wide,
    NoBall,
    Bye,
    Wicket,
    /// A wicket-taking delivery on a free hit; not a dismissal
    FreeHit,
}

impl BallKind {
    /// Returns true if the delivery counts toward the six-ball over
    pub fn is_legal(&self) -> bool {
        !matches!(self, BallKind::Wide | BallKind::NoBall)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BallKind::Run => "run",
            BallKind::Wide => "wide",
            BallKind::NoBall => "no_ball",
            BallKind::Bye => "bye",
            BallKind::Wicket => "wicket",
            BallKind::FreeHit => "free_hit",
        }
    }
}

/// One delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallEvent {
    pub kind: BallKind,

    /// Runs scored on the delivery: bat runs, byes, the extras penalty, or
    /// completed runs before a run-out
    pub runs: u32,

    /// Zero-based over index
    pub over: u32,

    /// Legal ball number within the over (1-6); for wides and no-balls, the
    /// number of legal balls already bowled in the over
    pub ball_in_over: u32,

    pub bowler: Option<BowlerId>,

    pub striker: Option<PlayerId>,
}

impl BallEvent {
    /// Short scorebook notation (`.`, `4`, `1wd`, `W`, `FH`...)
    pub fn notation(&self) -> String {
        match self.kind {
            BallKind::Run if self.runs == 0 => ".".to_string(),
            BallKind::Run => self.runs.to_string(),
            BallKind::Wide => format!("{}wd", self.runs),
            BallKind::NoBall => format!("{}nb", self.runs),
            BallKind::Bye => format!("{}b", self.runs),
            BallKind::Wicket if self.runs > 0 => format!("{}W", self.runs),
            BallKind::Wicket => "W".to_string(),
            BallKind::FreeHit => "FH".to_string(),
        }
    }
}

impl fmt::Display for BallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.over, self.ball_in_over, self.notation())
    }
}

/// Deliveries of a single over, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverLine<'a> {
    pub over: u32,
    pub balls: Vec<&'a BallEvent>,
}

impl OverLine<'_> {
    /// Runs conceded in the over
    pub fn runs(&self) -> u32 {
        self.balls.iter().map(|b| b.runs).sum()
    }
}

/// Ordered deliveries of one innings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History(Vec<BallEvent>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, event: BallEvent) {
        self.0.push(event);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BallEvent> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&BallEvent> {
        self.0.last()
    }

    /// Count of deliveries that consumed a legal ball
    pub fn legal_balls(&self) -> u32 {
        self.0.iter().filter(|b| b.kind.is_legal()).count() as u32
    }

    /// Count of deliveries of a given kind
    pub fn count(&self, kind: BallKind) -> usize {
        self.0.iter().filter(|b| b.kind == kind).count()
    }

    /// Total runs of a given kind
    pub fn runs_of(&self, kind: BallKind) -> u32 {
        self.0
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.runs)
            .sum()
    }

    /// Groups deliveries by over
    pub fn overs(&self) -> Vec<OverLine<'_>> {
        let mut lines: Vec<OverLine<'_>> = Vec::new();
        for ball in &self.0 {
            match lines.last_mut() {
                Some(line) if line.over == ball.over => line.balls.push(ball),
                _ => lines.push(OverLine {
                    over: ball.over,
                    balls: vec![ball],
                }),
            }
        }
        lines
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a BallEvent;
    type IntoIter = std::slice::Iter<'a, BallEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
