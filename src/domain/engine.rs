//! Scoring engine
//!
//! [`Scorer`] owns the whole scorebook and is the only thing that mutates it.
//! Every externally visible event (a delivery, a substitution, a bowler
//! change, a rule revision) is applied to a draft copy of the scorebook; only
//! if it succeeds does the draft replace the live book and get committed to
//! the undo stack. A failed operation therefore never leaves a trace.
//!
//! ## Strike rotation
//!
//! Odd runs (bat runs, byes, or runs completed before a run-out) swap the
//! batsmen, then the end of an over swaps them again. The two swaps are
//! independent, so a single off the last ball of an over keeps the same
//! batsman on strike for the next over. A batsman batting alone never
//! rotates.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ball::{BallEvent, BallKind, History};
use super::error::{ScoringResult, StateError, ValidationError};
use super::id::{BowlerId, PlayerId};
use super::partnership::PartnershipTracker;
use super::roster::{BowlerCharge, Position, Roster};
use super::rules::{MatchRules, TeamSide};
use super::state::{MatchState, Outcome};
use super::summary::InningsSummary;
use super::undo::{Snapshot, UndoStack};
use super::wicket::{Dismissal, DismissalKind, WicketFlow, WicketStep};

/// Everything a snapshot captures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorebook {
    pub rules: MatchRules,
    pub state: MatchState,
    pub roster: Roster,
    pub partnerships: PartnershipTracker,
    pub history: History,
    /// Summaries of finished innings, oldest first
    pub archived: Vec<InningsSummary>,
    /// Position a new batsman must fill before play continues
    pub awaiting_batsman: Option<Position>,
}

impl Scorebook {
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            state: MatchState::new(),
            roster: Roster::new(),
            partnerships: PartnershipTracker::new(),
            history: History::new(),
            archived: Vec::new(),
            awaiting_batsman: None,
        }
    }

    /// Scorecard of the innings on the field
    pub fn live_summary(&self) -> InningsSummary {
        InningsSummary::build(
            &self.rules,
            &self.state,
            &self.roster,
            &self.partnerships,
            &self.history,
        )
    }

    fn batting_side(&self) -> TeamSide {
        self.rules.batting_side(self.state.innings)
    }

    fn striker_id(&self) -> Option<PlayerId> {
        self.roster.striker().map(|b| b.id.clone())
    }

    fn event(&self, kind: BallKind, runs: u32) -> BallEvent {
        let ball_in_over = if kind.is_legal() {
            self.state.balls_in_over + 1
        } else {
            self.state.balls_in_over
        };
        BallEvent {
            kind,
            runs,
            over: self.state.completed_overs,
            ball_in_over,
            bowler: self.roster.current_bowler_id().cloned(),
            striker: self.striker_id(),
        }
    }

    /// Shared tail of every delivery: rotation, over count, history and the
    /// end-of-innings check
    fn finish_delivery(&mut self, event: BallEvent, rotate_for_runs: bool) -> BallReport {
        if rotate_for_runs {
            self.roster.swap_strike();
        }

        let mut over_completed = false;
        if event.kind.is_legal() {
            over_completed = self.state.consume_legal_ball();
            if over_completed {
                self.roster.swap_strike();
            }
        }

        debug!(
            kind = event.kind.label(),
            runs = event.runs,
            score = self.state.score,
            wickets = self.state.wickets,
            overs = %self.state.overs(),
            "delivery applied"
        );
        self.history.push(event.clone());

        let innings_ended = self.check_end();
        if over_completed && !innings_ended {
            if let Some(bowler) = self.roster.current_bowler_id().cloned() {
                self.roster.request_new_bowler(bowler);
            }
        }

        BallReport {
            event,
            over_completed,
            innings_ended,
            outcome: self.state.outcome,
            awaiting_batsman: self.awaiting_batsman,
            awaiting_bowler: self.roster.awaiting_bowler(),
        }
    }

    /// Ends the innings or match if a limit has been reached
    ///
    /// Checked in priority order: target reached, wickets exhausted, overs
    /// exhausted. Returns true if the innings ended.
    fn check_end(&mut self) -> bool {
        if !self.state.innings_active {
            return false;
        }
        let side = self.batting_side();

        if let Some(target) = self.state.target {
            if self.state.score >= target {
                self.finish_match(Outcome::win_for(side));
                return true;
            }
        }

        let all_out = self.state.wickets >= self.rules.wicket_limit(side);
        let overs_done = self.state.legal_balls() >= self.rules.ball_limit();
        if !all_out && !overs_done {
            return false;
        }

        if self.state.innings == 1 {
            self.end_first_innings();
        } else {
            let target = self.state.target.unwrap_or(1);
            let outcome = if self.state.score + 1 == target {
                Outcome::Tie
            } else {
                Outcome::win_for(side.other())
            };
            self.finish_match(outcome);
        }
        true
    }

    fn archive_innings(&mut self) {
        let summary = self.live_summary().closed();
        info!(innings = summary.innings, score = %summary.score_line(), "innings archived");
        self.archived.push(summary);
        self.roster.close_innings();
        self.awaiting_batsman = None;
    }

    fn end_first_innings(&mut self) {
        self.archive_innings();
        self.state.begin_second_innings();
        info!(target = ?self.state.target, "innings break");
    }

    fn finish_match(&mut self, outcome: Outcome) {
        self.archive_innings();
        self.state.innings_active = false;
        self.state.outcome = outcome;
        info!(outcome = outcome.label(), "match finished");
    }

    fn apply_run(&mut self, runs: u32) -> BallReport {
        let event = self.event(BallKind::Run, runs);
        let striker = self.striker_id();

        self.state.score += runs;
        self.state.is_free_hit = false;
        self.roster.record_delivery(Position::Striker, runs);
        self.roster.charge_bowler(BowlerCharge {
            runs,
            legal: true,
            ..BowlerCharge::default()
        });
        if let Some(striker) = &striker {
            self.partnerships.add_runs(runs, striker);
        }
        self.partnerships.add_ball();

        self.finish_delivery(event, runs % 2 == 1)
    }

    fn apply_penalty(&mut self, kind: BallKind, runs: u32) -> BallReport {
        let event = self.event(kind, runs);

        self.state.score += runs;
        if kind == BallKind::NoBall && self.rules.free_hit {
            self.state.is_free_hit = true;
        }
        self.roster.charge_bowler(BowlerCharge {
            runs,
            wide: kind == BallKind::Wide,
            no_ball: kind == BallKind::NoBall,
            ..BowlerCharge::default()
        });
        self.partnerships.add_extra(runs);

        self.finish_delivery(event, false)
    }

    fn apply_bye(&mut self, runs: u32) -> BallReport {
        let event = self.event(BallKind::Bye, runs);

        self.state.score += runs;
        self.state.is_free_hit = false;
        self.roster.record_ball_faced(Position::Striker);
        self.roster.charge_bowler(BowlerCharge {
            legal: true,
            ..BowlerCharge::default()
        });
        self.partnerships.add_extra(runs);
        self.partnerships.add_ball();

        self.finish_delivery(event, runs % 2 == 1)
    }

    /// A wicket-taking delivery on a free hit: a legal dot ball, nobody out
    fn apply_free_hit(&mut self) -> BallReport {
        let event = self.event(BallKind::FreeHit, 0);

        self.state.is_free_hit = false;
        self.roster.record_ball_faced(Position::Striker);
        self.roster.charge_bowler(BowlerCharge {
            legal: true,
            ..BowlerCharge::default()
        });
        self.partnerships.add_ball();

        self.finish_delivery(event, false)
    }

    fn apply_wicket(&mut self, dismissal: &Dismissal) -> BallReport {
        let runs = if dismissal.kind == DismissalKind::RunOut {
            dismissal.runs
        } else {
            0
        };
        let event = self.event(BallKind::Wicket, runs);
        let striker = self.striker_id();
        let end = if self.roster.at(dismissal.end).is_some() {
            dismissal.end
        } else {
            Position::Striker
        };
        let out_id = self.roster.at(end).map(|b| b.id.clone());
        let bowler_name = self
            .roster
            .current_bowler()
            .map(|b| b.name.clone())
            .unwrap_or_default();

        self.state.score += runs;
        self.state.wickets += 1;
        self.state.is_free_hit = false;
        self.roster.record_delivery(Position::Striker, runs);
        self.roster.charge_bowler(BowlerCharge {
            runs,
            legal: true,
            wicket: dismissal.kind.credits_bowler(),
            ..BowlerCharge::default()
        });
        if let Some(striker) = &striker {
            self.partnerships.add_runs(runs, striker);
        }
        self.partnerships.add_ball();
        self.roster.mark_dismissed(end, dismissal.note(&bowler_name));
        self.partnerships.seal(self.state.score, self.state.wickets);

        let mut report = self.finish_delivery(event, runs % 2 == 1);
        if report.innings_ended {
            return report;
        }

        let out_position = out_id
            .as_ref()
            .and_then(|id| self.roster.position_of(id))
            .unwrap_or(end);
        let players = self.rules.team(self.batting_side()).players;
        if self.rules.last_man_stands && self.state.wickets + 1 >= players {
            self.roster.vacate(out_position);
            if let Some(survivor) = self.striker_id() {
                self.partnerships.start(survivor, None, self.state.score);
            }
            debug!("last batsman continues alone");
        } else {
            self.awaiting_batsman = Some(out_position);
        }
        report.awaiting_batsman = self.awaiting_batsman;
        report
    }

    /// Starts a partnership for whoever is at the crease
    fn restart_partnership(&mut self) {
        let striker = self.roster.striker().map(|b| b.id.clone());
        let non_striker = self.roster.non_striker().map(|b| b.id.clone());
        if let Some(first) = striker.clone().or_else(|| non_striker.clone()) {
            let second = if striker.is_some() { non_striker } else { None };
            self.partnerships.start(first, second, self.state.score);
        }
    }
}

/// What an applied delivery did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallReport {
    pub event: BallEvent,
    pub over_completed: bool,
    pub innings_ended: bool,
    pub outcome: Outcome,
    pub awaiting_batsman: Option<Position>,
    pub awaiting_bowler: bool,
}

/// Where a wicket entry stands after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WicketProgress {
    /// Dismissal type chosen, not yet confirmed
    TypeSelected,
    AwaitingRunCount,
    AwaitingFielderDetails,
    /// The wicket fell and was recorded
    Applied { report: BallReport },
    /// The delivery was a free hit; nobody is out
    FreeHit { report: BallReport },
}

/// The live scoring engine
#[derive(Debug, Clone)]
pub struct Scorer {
    book: Scorebook,
    undo: UndoStack<Scorebook>,
    wicket: WicketFlow,
}

impl Scorer {
    /// Creates a scorer for a new match
    pub fn new(rules: MatchRules) -> Self {
        let book = Scorebook::new(rules);
        Self {
            undo: UndoStack::new(book.clone()),
            book,
            wicket: WicketFlow::new(),
        }
    }

    /// Resumes from stored snapshots and an in-progress wicket entry
    pub fn resume(entries: Vec<Snapshot<Scorebook>>, wicket: WicketFlow) -> Option<Self> {
        let undo = UndoStack::from_entries(entries)?;
        Some(Self {
            book: undo.top().state.clone(),
            undo,
            wicket,
        })
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn book(&self) -> &Scorebook {
        &self.book
    }

    pub fn rules(&self) -> &MatchRules {
        &self.book.rules
    }

    pub fn state(&self) -> &MatchState {
        &self.book.state
    }

    pub fn roster(&self) -> &Roster {
        &self.book.roster
    }

    pub fn partnerships(&self) -> &PartnershipTracker {
        &self.book.partnerships
    }

    pub fn history(&self) -> &History {
        &self.book.history
    }

    pub fn archived(&self) -> &[InningsSummary] {
        &self.book.archived
    }

    pub fn wicket_flow(&self) -> &WicketFlow {
        &self.wicket
    }

    pub fn undo_stack(&self) -> &UndoStack<Scorebook> {
        &self.undo
    }

    pub fn awaiting_batsman(&self) -> Option<Position> {
        self.book.awaiting_batsman
    }

    pub fn awaiting_bowler(&self) -> bool {
        self.book.roster.awaiting_bowler()
    }

    /// Summary of an innings: archived if finished, live if on the field
    pub fn summary(&self, innings: u8) -> Option<InningsSummary> {
        if let Some(archived) = self.book.archived.iter().find(|s| s.innings == innings) {
            return Some(archived.clone());
        }
        (self.book.state.innings == innings && self.book.state.innings_active)
            .then(|| self.book.live_summary())
    }

    // -------------------------------------------------------------------------
    // Commit cycle
    // -------------------------------------------------------------------------

    /// Applies one event to a draft of the book and commits it
    ///
    /// A draft equal to the current book is not committed.
    fn transact<R>(
        &mut self,
        label: impl Into<String>,
        apply: impl FnOnce(&mut Scorebook) -> ScoringResult<R>,
    ) -> ScoringResult<R> {
        let mut draft = self.book.clone();
        let result = apply(&mut draft)?;
        let label = label.into();
        if draft == self.book {
            debug!(event = %label, "no change; nothing committed");
            return Ok(result);
        }
        self.book = draft;
        self.undo.commit(label, &self.book);
        Ok(result)
    }

    fn ensure_not_over(&self) -> ScoringResult<()> {
        if self.book.state.outcome.is_final() {
            return Err(StateError::MatchOver.into());
        }
        Ok(())
    }

    fn ensure_in_play(&self) -> ScoringResult<()> {
        self.ensure_not_over()?;
        if !self.book.state.innings_active {
            return Err(StateError::NoActiveInnings.into());
        }
        if !self.wicket.is_idle() {
            return Err(StateError::WicketInProgress.into());
        }
        Ok(())
    }

    /// Checks that a delivery may be bowled now
    fn ensure_can_bowl(&self) -> ScoringResult<()> {
        self.ensure_in_play()?;
        if self.book.awaiting_batsman.is_some() {
            return Err(StateError::NewBatsmanPending.into());
        }
        if self.book.roster.awaiting_bowler() {
            return Err(StateError::NewBowlerPending.into());
        }
        Ok(())
    }

    fn check_runs(runs: u32) -> ScoringResult<()> {
        if runs > 6 {
            return Err(ValidationError::InvalidRuns(runs).into());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Innings
    // -------------------------------------------------------------------------

    /// Opens an innings with two batsmen and an opening bowler
    pub fn start_innings(&mut self, striker: &str, non_striker: &str, bowler: &str) -> ScoringResult<()> {
        self.ensure_not_over()?;
        if self.book.state.innings_active {
            return Err(StateError::InningsActive.into());
        }

        let label = format!("start innings {}", self.book.state.innings);
        self.transact(label, |book| {
            book.roster
                .start_innings(book.state.innings, striker, non_striker, bowler)?;
            book.partnerships = PartnershipTracker::new();
            book.history = History::new();
            book.awaiting_batsman = None;
            book.state.innings_active = true;
            book.state.outcome = Outcome::InProgress;
            book.restart_partnership();
            info!(innings = book.state.innings, "innings started");
            Ok(())
        })
    }

    /// Ends the match with no result, whatever the state of play
    pub fn abandon(&mut self) -> ScoringResult<()> {
        self.ensure_not_over()?;
        self.wicket.cancel();
        self.transact("no result", |book| {
            if book.state.innings_active {
                book.archive_innings();
            }
            book.state.innings_active = false;
            book.state.outcome = Outcome::NoResult;
            book.roster.close_innings();
            info!("match abandoned");
            Ok(())
        })
    }

    // -------------------------------------------------------------------------
    // Deliveries
    // -------------------------------------------------------------------------

    /// Runs off the bat (0 for a dot ball)
    pub fn apply_run(&mut self, runs: u32) -> ScoringResult<BallReport> {
        Self::check_runs(runs)?;
        self.ensure_can_bowl()?;
        self.transact(format!("run {}", runs), |book| Ok(book.apply_run(runs)))
    }

    /// A wide; `None` if wides are switched off for this match
    pub fn apply_wide(&mut self) -> ScoringResult<Option<BallReport>> {
        if !self.book.rules.wides {
            return Ok(None);
        }
        self.ensure_can_bowl()?;
        let runs = self.book.rules.wide_runs;
        self.transact("wide", |book| Ok(Some(book.apply_penalty(BallKind::Wide, runs))))
    }

    /// A no-ball; `None` if no-balls are switched off for this match
    pub fn apply_no_ball(&mut self) -> ScoringResult<Option<BallReport>> {
        if !self.book.rules.no_balls {
            return Ok(None);
        }
        self.ensure_can_bowl()?;
        let runs = self.book.rules.no_ball_runs;
        self.transact("no ball", |book| {
            Ok(Some(book.apply_penalty(BallKind::NoBall, runs)))
        })
    }

    /// Byes; `None` if byes are switched off for this match
    pub fn apply_bye(&mut self, runs: u32) -> ScoringResult<Option<BallReport>> {
        if !self.book.rules.byes {
            return Ok(None);
        }
        Self::check_runs(runs)?;
        self.ensure_can_bowl()?;
        self.transact(format!("bye {}", runs), |book| Ok(Some(book.apply_bye(runs))))
    }

    /// Records a fully described wicket in one step
    ///
    /// On a free hit the delivery is recorded as [`BallKind::FreeHit`] and
    /// nobody is out.
    pub fn apply_wicket(&mut self, dismissal: Dismissal) -> ScoringResult<BallReport> {
        self.ensure_can_bowl()?;
        if self.book.state.is_free_hit {
            return self.transact("free hit", |book| Ok(book.apply_free_hit()));
        }
        if dismissal.kind.needs_fielder() && dismissal.fielder.is_none() {
            return Err(ValidationError::FielderRequired(dismissal.kind).into());
        }
        Self::check_runs(dismissal.runs)?;
        let label = format!("wicket {}", dismissal.kind);
        self.transact(label, |book| Ok(book.apply_wicket(&dismissal)))
    }

    // -------------------------------------------------------------------------
    // Wicket entry
    // -------------------------------------------------------------------------

    fn progress(&self) -> WicketProgress {
        match self.wicket.step() {
            WicketStep::AwaitingRunCount { .. } => WicketProgress::AwaitingRunCount,
            WicketStep::AwaitingFielderDetails { .. } => WicketProgress::AwaitingFielderDetails,
            _ => WicketProgress::TypeSelected,
        }
    }

    /// Picks the dismissal type
    ///
    /// If a free hit is on, the delivery is recorded straight away as a free
    /// hit and no wicket entry starts.
    pub fn select_dismissal(&mut self, kind: DismissalKind) -> ScoringResult<WicketProgress> {
        if matches!(self.wicket.step(), WicketStep::TypeSelected { .. }) {
            self.wicket.select_type(kind)?;
            return Ok(self.progress());
        }
        self.ensure_can_bowl()?;
        if self.book.state.is_free_hit {
            let report = self.transact("free hit", |book| Ok(book.apply_free_hit()))?;
            return Ok(WicketProgress::FreeHit { report });
        }
        self.wicket.select_type(kind)?;
        Ok(self.progress())
    }

    /// Confirms the chosen dismissal type
    pub fn confirm_dismissal(&mut self) -> ScoringResult<WicketProgress> {
        self.wicket.confirm_type()?;
        Ok(self.progress())
    }

    /// Selects and confirms a dismissal type in one go
    pub fn begin_wicket(&mut self, kind: DismissalKind) -> ScoringResult<WicketProgress> {
        match self.select_dismissal(kind)? {
            WicketProgress::TypeSelected => self.confirm_dismissal(),
            other => Ok(other),
        }
    }

    /// Runs completed before a run-out, and which batsman is out
    pub fn submit_run_out(&mut self, runs: u32, end: Position) -> ScoringResult<WicketProgress> {
        self.wicket.submit_run_count(runs, end)?;
        Ok(self.progress())
    }

    /// Names the fielder and records the wicket
    pub fn submit_fielder(&mut self, fielder: Option<&str>) -> ScoringResult<WicketProgress> {
        let before = self.wicket.clone();
        self.wicket.submit_fielder(fielder)?;
        let Some(dismissal) = self.wicket.take() else {
            self.wicket = before;
            return Err(StateError::UnexpectedWicketStep {
                expected: "complete",
                actual: self.wicket.step().label(),
            }
            .into());
        };

        match self.apply_wicket(dismissal) {
            Ok(report) => Ok(WicketProgress::Applied { report }),
            Err(err) => {
                self.wicket = before;
                Err(err)
            }
        }
    }

    /// Abandons the wicket entry; nothing is recorded
    pub fn cancel_wicket(&mut self) {
        if !self.wicket.is_idle() {
            debug!(step = self.wicket.step().label(), "wicket entry cancelled");
        }
        self.wicket.cancel();
    }

    // -------------------------------------------------------------------------
    // Batsmen
    // -------------------------------------------------------------------------

    /// Sends in the next batsman after a wicket
    pub fn new_batsman(&mut self, name: &str) -> ScoringResult<PlayerId> {
        self.ensure_in_play()?;
        let position = self
            .book
            .awaiting_batsman
            .ok_or(StateError::NoBatsmanRequested)?;

        self.transact(format!("batsman {}", name.trim()), |book| {
            let id = book.roster.replace_at_position(position, name)?;
            book.awaiting_batsman = None;
            book.restart_partnership();
            Ok(id)
        })
    }

    /// Retires the batsman at a position; `new_name` comes in
    pub fn retire(&mut self, position: Position, new_name: &str) -> ScoringResult<PlayerId> {
        self.ensure_in_play()?;
        if self.book.awaiting_batsman.is_some() {
            return Err(StateError::NewBatsmanPending.into());
        }

        self.transact(format!("retire {}", position), |book| {
            book.partnerships
                .seal_retirement(book.state.score, book.state.wickets);
            let id = book.roster.retire(position, new_name)?;
            book.restart_partnership();
            Ok(id)
        })
    }

    /// Brings a retired batsman back at a position
    pub fn return_batsman(&mut self, name: &str, position: Position) -> ScoringResult<PlayerId> {
        self.ensure_in_play()?;
        if self.book.awaiting_batsman.is_some() {
            return Err(StateError::NewBatsmanPending.into());
        }

        self.transact(format!("return {}", name.trim()), |book| {
            book.partnerships
                .seal_retirement(book.state.score, book.state.wickets);
            let id = book.roster.return_from_pending(name, position)?;
            book.restart_partnership();
            Ok(id)
        })
    }

    /// Renames a batsman (`p-…`) or bowler (`w-…`) by id
    pub fn rename(&mut self, id: &str, name: &str) -> ScoringResult<()> {
        if let Ok(player) = id.parse::<PlayerId>() {
            return self.transact(format!("rename {}", player), |book| {
                book.roster.rename_batsman(&player, name)
            });
        }
        if let Ok(bowler) = id.parse::<BowlerId>() {
            return self.transact(format!("rename {}", bowler), |book| {
                book.roster.rename_bowler(&bowler, name)
            });
        }
        Err(ValidationError::UnknownPlayer(id.trim().to_string()).into())
    }

    // -------------------------------------------------------------------------
    // Bowlers
    // -------------------------------------------------------------------------

    /// Names the bowler for the next over
    pub fn confirm_bowler(&mut self, name: &str) -> ScoringResult<BowlerId> {
        self.ensure_in_play()?;
        let cap = self.book.rules.bowler_over_cap;
        self.transact(format!("bowler {}", name.trim()), |book| {
            book.roster.confirm_bowler(name, cap)
        })
    }

    /// Removes the current bowler from the attack; the replacement finishes
    /// the over
    pub fn dismiss_bowler(&mut self, replacement: &str) -> ScoringResult<BowlerId> {
        self.ensure_in_play()?;
        if self.book.roster.awaiting_bowler() {
            return Err(StateError::NewBowlerPending.into());
        }
        let cap = self.book.rules.bowler_over_cap;
        self.transact(format!("dismiss bowler for {}", replacement.trim()), |book| {
            let id = book.roster.dismiss_bowler(replacement, cap)?;
            info!(replacement = %id, "bowler removed from the attack");
            Ok(id)
        })
    }

    // -------------------------------------------------------------------------
    // Rule revisions
    // -------------------------------------------------------------------------

    fn ensure_can_revise(&self) -> ScoringResult<()> {
        self.ensure_not_over()?;
        if !self.wicket.is_idle() {
            return Err(StateError::WicketInProgress.into());
        }
        Ok(())
    }

    /// Changes the overs per innings
    ///
    /// If the innings on the field has already bowled that many overs (or
    /// more), it ends at once.
    pub fn revise_overs(&mut self, overs: u32) -> ScoringResult<()> {
        self.ensure_can_revise()?;
        if overs == 0 {
            return Err(ValidationError::InvalidOvers(overs).into());
        }
        self.transact(format!("revise overs {}", overs), |book| {
            book.rules.overs = overs;
            book.check_end();
            Ok(())
        })
    }

    /// Changes a side's squad size; ends the innings if the new wicket limit
    /// has been reached
    pub fn revise_squad(&mut self, side: TeamSide, players: u32) -> ScoringResult<()> {
        self.ensure_can_revise()?;
        if players < 2 {
            return Err(ValidationError::InvalidSquadSize(players).into());
        }
        self.transact(format!("revise squad {} {}", side, players), |book| {
            book.rules.team_mut(side).players = players;
            book.check_end();
            Ok(())
        })
    }

    /// Changes the per-bowler over cap (`None` for unlimited)
    pub fn revise_bowler_cap(&mut self, cap: Option<u32>) -> ScoringResult<()> {
        self.ensure_can_revise()?;
        if cap == Some(0) {
            return Err(ValidationError::InvalidOvers(0).into());
        }
        self.transact("revise bowler cap", |book| {
            book.rules.bowler_over_cap = cap;
            Ok(())
        })
    }

    // -------------------------------------------------------------------------
    // Undo
    // -------------------------------------------------------------------------

    /// Reverts the last committed event; returns its label
    pub fn undo(&mut self) -> ScoringResult<String> {
        let (book, label) = self.undo.undo()?;
        self.book = book;
        self.wicket.cancel();
        info!(undone = %label, "undo");
        Ok(label)
    }
}
