//! Innings summaries
//!
//! A frozen scorecard of one innings: totals, batting and bowling rows, the
//! partnership ledger and the full ball history. Archived summaries are
//! never modified and are what downstream calculators read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ball::{BallKind, History};
use super::id::{BowlerId, PlayerId};
use super::partnership::{Partnership, PartnershipRecord, PartnershipTracker};
use super::roster::{Roster, RETIRED_HURT};
use super::rules::{MatchRules, TeamSide};
use super::state::{MatchState, Overs};

/// One batsman's line on the card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRow {
    pub id: PlayerId,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    /// Dismissal note, `retired hurt`, or `not out`
    pub dismissal: String,
}

/// One bowler's line on the card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingRow {
    pub id: BowlerId,
    pub name: String,
    pub overs: Overs,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
    pub wides: u32,
    pub no_balls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes
    }
}

/// Scorecard of one innings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub innings: u8,
    pub batting_side: TeamSide,
    pub team_name: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: Overs,
    pub extras: Extras,
    pub batting: Vec<BattingRow>,
    pub bowling: Vec<BowlingRow>,
    pub partnerships: Vec<PartnershipRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unbroken: Option<Partnership>,
    pub history: History,
    /// Set when the innings was archived; `None` for a live view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl InningsSummary {
    /// Builds a scorecard from the live components
    pub fn build(
        rules: &MatchRules,
        state: &MatchState,
        roster: &Roster,
        partnerships: &PartnershipTracker,
        history: &History,
    ) -> Self {
        let batting_side = rules.batting_side(state.innings);
        let pending: Vec<&PlayerId> = roster.pending_return().iter().map(|b| &b.id).collect();

        let batting = roster
            .batting_order()
            .into_iter()
            .map(|b| BattingRow {
                id: b.id.clone(),
                name: b.name.clone(),
                runs: b.runs,
                balls: b.balls,
                fours: b.fours,
                sixes: b.sixes,
                strike_rate: round2(b.strike_rate()),
                dismissal: match &b.dismissal {
                    Some(note) => note.clone(),
                    None if pending.contains(&&b.id) => RETIRED_HURT.to_string(),
                    None => "not out".to_string(),
                },
            })
            .collect();

        let bowling = roster
            .bowlers()
            .iter()
            .map(|b| BowlingRow {
                id: b.id.clone(),
                name: b.name.clone(),
                overs: b.figures(),
                runs: b.runs,
                wickets: b.wickets,
                economy: round2(b.economy()),
                wides: b.wides,
                no_balls: b.no_balls,
            })
            .collect();

        Self {
            innings: state.innings,
            batting_side,
            team_name: rules.team(batting_side).name.clone(),
            score: state.score,
            wickets: state.wickets,
            overs: state.overs(),
            extras: Extras {
                wides: history.runs_of(BallKind::Wide),
                no_balls: history.runs_of(BallKind::NoBall),
                byes: history.runs_of(BallKind::Bye),
            },
            batting,
            bowling,
            partnerships: partnerships.history().to_vec(),
            unbroken: partnerships.current().cloned(),
            history: history.clone(),
            closed_at: None,
        }
    }

    /// Freezes the summary with a closing timestamp
    pub fn closed(mut self) -> Self {
        self.closed_at = Some(Utc::now());
        self
    }

    /// Short score line, e.g. `Hawks 151/3 (18.4 ov)`
    pub fn score_line(&self) -> String {
        format!(
            "{} {}/{} ({} ov)",
            self.team_name, self.score, self.wickets, self.overs
        )
    }

    /// Highest partnership of the innings, sealed or unbroken
    pub fn best_partnership(&self) -> Option<&Partnership> {
        self.partnerships
            .iter()
            .map(|r| &r.partnership)
            .chain(self.unbroken.iter())
            .max_by_key(|p| p.runs)
    }

    /// Run rate over the innings
    pub fn run_rate(&self) -> f64 {
        let overs = self.overs.as_f64();
        if overs == 0.0 {
            0.0
        } else {
            round2(self.score as f64 / overs)
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
