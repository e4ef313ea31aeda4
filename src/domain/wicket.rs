//! Wicket entry flow
//!
//! Recording a dismissal takes several interactions: pick the type, give the
//! completed runs for a run-out, then name the fielder. The flow collects
//! those steps and only yields a [`Dismissal`] once it is complete, so
//! cancelling at any point leaves the match untouched.
//!
//! ```text
//! Idle ─select─> TypeSelected ─confirm─┬─(run out)─> AwaitingRunCount ─runs─┐
//!                                      └──────────────────────────────────> AwaitingFielderDetails
//!                                                                            │ fielder
//!                                                                            v
//!                                                                         Complete ─take─> Idle
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{validate_name, ScoringResult, StateError, ValidationError};
use super::roster::Position;

/// How the batsman got out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Bowled,
    Lbw,
    Caught,
    Stumped,
    RunOut,
    HitWicket,
}

impl DismissalKind {
    /// Returns true if the dismissal needs a fielder's name
    pub fn needs_fielder(&self) -> bool {
        matches!(
            self,
            DismissalKind::Caught | DismissalKind::Stumped | DismissalKind::RunOut
        )
    }

    /// Returns true if the wicket goes to the bowler's figures
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, DismissalKind::RunOut)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Caught => "caught",
            DismissalKind::Stumped => "stumped",
            DismissalKind::RunOut => "run out",
            DismissalKind::HitWicket => "hit wicket",
        }
    }
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DismissalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "bowled" | "b" => Ok(DismissalKind::Bowled),
            "lbw" => Ok(DismissalKind::Lbw),
            "caught" | "c" => Ok(DismissalKind::Caught),
            "stumped" | "st" => Ok(DismissalKind::Stumped),
            "runout" | "ro" => Ok(DismissalKind::RunOut),
            "hitwicket" | "hw" => Ok(DismissalKind::HitWicket),
            _ => Err(format!("unknown dismissal type '{}'", s.trim())),
        }
    }
}

/// A fully described dismissal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dismissal {
    pub kind: DismissalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<String>,
    /// Runs completed before a run-out
    #[serde(default)]
    pub runs: u32,
    /// Which batsman is out, by position at the time of the delivery
    pub end: Position,
}

impl Dismissal {
    /// A dismissal of the striker that needs no further details
    pub fn new(kind: DismissalKind) -> Self {
        Self {
            kind,
            fielder: None,
            runs: 0,
            end: Position::Striker,
        }
    }

    pub fn with_fielder(mut self, fielder: impl Into<String>) -> Self {
        self.fielder = Some(fielder.into());
        self
    }

    /// Scorecard note, e.g. `c Smith b Starc`
    pub fn note(&self, bowler: &str) -> String {
        let fielder = self.fielder.as_deref().unwrap_or("");
        match self.kind {
            DismissalKind::Bowled => format!("b {}", bowler),
            DismissalKind::Lbw => format!("lbw b {}", bowler),
            DismissalKind::Caught if fielder.eq_ignore_ascii_case(bowler) => {
                format!("c & b {}", bowler)
            }
            DismissalKind::Caught => format!("c {} b {}", fielder, bowler),
            DismissalKind::Stumped => format!("st {} b {}", fielder, bowler),
            DismissalKind::RunOut => format!("run out ({})", fielder),
            DismissalKind::HitWicket => format!("hit wicket b {}", bowler),
        }
    }
}

/// Where the flow is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WicketStep {
    #[default]
    Idle,
    TypeSelected {
        kind: DismissalKind,
    },
    AwaitingRunCount {
        kind: DismissalKind,
    },
    AwaitingFielderDetails {
        kind: DismissalKind,
        runs: u32,
        end: Position,
    },
    Complete {
        dismissal: Dismissal,
    },
}

impl WicketStep {
    pub fn label(&self) -> &'static str {
        match self {
            WicketStep::Idle => "idle",
            WicketStep::TypeSelected { .. } => "type_selected",
            WicketStep::AwaitingRunCount { .. } => "awaiting_run_count",
            WicketStep::AwaitingFielderDetails { .. } => "awaiting_fielder_details",
            WicketStep::Complete { .. } => "complete",
        }
    }
}

/// Multi-step dismissal entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WicketFlow {
    step: WicketStep,
}

impl WicketFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &WicketStep {
        &self.step
    }

    pub fn is_idle(&self) -> bool {
        self.step == WicketStep::Idle
    }

    fn unexpected(&self, expected: &'static str) -> StateError {
        StateError::UnexpectedWicketStep {
            expected,
            actual: self.step.label(),
        }
    }

    /// Picks the dismissal type; may be repeated until confirmed
    pub fn select_type(&mut self, kind: DismissalKind) -> ScoringResult<()> {
        match self.step {
            WicketStep::Idle | WicketStep::TypeSelected { .. } => {
                self.step = WicketStep::TypeSelected { kind };
                Ok(())
            }
            _ => Err(self.unexpected("idle").into()),
        }
    }

    /// Confirms the type; run-outs go on to ask for the run count
    pub fn confirm_type(&mut self) -> ScoringResult<()> {
        let WicketStep::TypeSelected { kind } = self.step else {
            return Err(self.unexpected("type_selected").into());
        };
        self.step = if kind == DismissalKind::RunOut {
            WicketStep::AwaitingRunCount { kind }
        } else {
            WicketStep::AwaitingFielderDetails {
                kind,
                runs: 0,
                end: Position::Striker,
            }
        };
        Ok(())
    }

    /// Runs completed before the run-out, and which batsman was run out
    pub fn submit_run_count(&mut self, runs: u32, end: Position) -> ScoringResult<()> {
        let WicketStep::AwaitingRunCount { kind } = self.step else {
            return Err(self.unexpected("awaiting_run_count").into());
        };
        if runs > 6 {
            return Err(ValidationError::InvalidRuns(runs).into());
        }
        self.step = WicketStep::AwaitingFielderDetails { kind, runs, end };
        Ok(())
    }

    /// Names the fielder (if the dismissal needs one) and completes the flow
    pub fn submit_fielder(&mut self, fielder: Option<&str>) -> ScoringResult<Dismissal> {
        let WicketStep::AwaitingFielderDetails { kind, runs, end } = self.step else {
            return Err(self.unexpected("awaiting_fielder_details").into());
        };
        let fielder = match fielder.map(str::trim).filter(|f| !f.is_empty()) {
            Some(name) => Some(validate_name(name)?),
            None if kind.needs_fielder() => {
                return Err(ValidationError::FielderRequired(kind).into())
            }
            None => None,
        };

        let dismissal = Dismissal {
            kind,
            fielder: if kind.needs_fielder() { fielder } else { None },
            runs,
            end,
        };
        self.step = WicketStep::Complete {
            dismissal: dismissal.clone(),
        };
        Ok(dismissal)
    }

    /// Takes the completed dismissal and returns the flow to idle
    pub fn take(&mut self) -> Option<Dismissal> {
        match std::mem::take(&mut self.step) {
            WicketStep::Complete { dismissal } => Some(dismissal),
            other => {
                self.step = other;
                None
            }
        }
    }

    /// Abandons the entry from any step
    pub fn cancel(&mut self) {
        self.step = WicketStep::Idle;
    }
}
