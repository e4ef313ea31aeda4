//! Roster store: batsmen at the crease, the batting archive, retired
//! batsmen waiting to return, and the bowling attack.
//!
//! Players are joined by [`PlayerId`] / [`BowlerId`] everywhere. Display names
//! are only used to resolve user input (new bowler, returning batsman) and can
//! be changed at any time without affecting identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::{same_name, validate_name, ScoringResult, StateError, ValidationError};
use super::id::{BowlerId, PlayerId};
use super::state::Overs;

/// Note shown for a batsman who retired and has not come back
pub const RETIRED_HURT: &str = "retired hurt";

/// End of the pitch a batsman occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Striker,
    NonStriker,
}

impl Position {
    pub fn other(self) -> Self {
        match self {
            Position::Striker => Position::NonStriker,
            Position::NonStriker => Position::Striker,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Striker => write!(f, "striker"),
            Position::NonStriker => write!(f, "non-striker"),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "striker" | "s" => Ok(Position::Striker),
            "non-striker" | "non_striker" | "nonstriker" | "ns" => Ok(Position::NonStriker),
            other => Err(format!(
                "unknown position '{}', expected 'striker' or 'non-striker'",
                other
            )),
        }
    }
}

/// A batting record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batsman {
    pub id: PlayerId,
    pub name: String,
    /// Batting order, starting at 1
    pub order: u32,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal: Option<String>,
}

impl Batsman {
    fn new(id: PlayerId, name: String, order: u32) -> Self {
        Self {
            id,
            name,
            order,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            dismissal: None,
        }
    }

    /// Runs per hundred balls
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f64 * 100.0 / self.balls as f64
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Whether leaving the crease should keep this record on the card
    fn has_batted(&self) -> bool {
        self.balls > 0 || self.dismissal.is_some()
    }
}

/// A bowling record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bowler {
    pub id: BowlerId,
    pub name: String,
    pub overs: u32,
    /// Legal balls into the bowler's current over, always below 6
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl Bowler {
    fn new(id: BowlerId, name: String) -> Self {
        Self {
            id,
            name,
            overs: 0,
            balls: 0,
            runs: 0,
            wickets: 0,
            wides: 0,
            no_balls: 0,
        }
    }

    pub fn figures(&self) -> Overs {
        Overs {
            overs: self.overs,
            balls: self.balls,
        }
    }

    /// Runs conceded per over
    pub fn economy(&self) -> f64 {
        let overs = self.figures().as_f64();
        if overs == 0.0 {
            0.0
        } else {
            self.runs as f64 / overs
        }
    }

    fn add_legal_ball(&mut self) {
        self.balls += 1;
        if self.balls == 6 {
            self.balls = 0;
            self.overs += 1;
        }
    }
}

/// What a delivery costs the bowler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BowlerCharge {
    pub runs: u32,
    pub legal: bool,
    pub wicket: bool,
    pub wide: bool,
    pub no_ball: bool,
}

/// Batting and bowling records for the innings in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    innings: u8,
    active: bool,
    striker: Option<Batsman>,
    non_striker: Option<Batsman>,
    archive: Vec<Batsman>,
    pending_return: Vec<Batsman>,
    bowlers: Vec<Bowler>,
    current_bowler: Option<BowlerId>,
    /// Bowled the previous over; cannot bowl the next one
    barred_bowler: Option<BowlerId>,
    dismissed_bowlers: BTreeSet<BowlerId>,
    awaiting_bowler: bool,
    next_sequence: u32,
    next_order: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the roster to two fresh batsmen and an opening bowler
    pub fn start_innings(
        &mut self,
        innings: u8,
        striker: &str,
        non_striker: &str,
        bowler: &str,
    ) -> ScoringResult<()> {
        if self.active {
            return Err(StateError::InningsActive.into());
        }
        let striker = validate_name(striker)?;
        let non_striker = validate_name(non_striker)?;
        let bowler = validate_name(bowler)?;
        if same_name(&striker, &non_striker) {
            return Err(ValidationError::DuplicateName(non_striker).into());
        }

        *self = Self {
            innings,
            active: true,
            ..Self::default()
        };
        self.striker = Some(self.new_batsman(striker));
        self.non_striker = Some(self.new_batsman(non_striker));
        let opener = self.new_bowler(bowler);
        self.current_bowler = Some(opener.id.clone());
        self.bowlers.push(opener);
        Ok(())
    }

    /// Marks the innings closed so the next one can start
    pub(crate) fn close_innings(&mut self) {
        self.active = false;
        self.awaiting_bowler = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn new_batsman(&mut self, name: String) -> Batsman {
        let id = loop {
            self.next_sequence += 1;
            let id = PlayerId::new(self.innings, self.next_sequence, &name);
            if self.batsman(&id).is_none() {
                break id;
            }
        };
        self.next_order += 1;
        Batsman::new(id, name, self.next_order)
    }

    fn new_bowler(&mut self, name: String) -> Bowler {
        let id = loop {
            self.next_sequence += 1;
            let id = BowlerId::new(self.innings, self.next_sequence, &name);
            if self.bowler(&id).is_none() {
                break id;
            }
        };
        Bowler::new(id, name)
    }

    // -------------------------------------------------------------------------
    // Batting
    // -------------------------------------------------------------------------

    pub fn at(&self, position: Position) -> Option<&Batsman> {
        match position {
            Position::Striker => self.striker.as_ref(),
            Position::NonStriker => self.non_striker.as_ref(),
        }
    }

    fn slot(&mut self, position: Position) -> &mut Option<Batsman> {
        match position {
            Position::Striker => &mut self.striker,
            Position::NonStriker => &mut self.non_striker,
        }
    }

    pub fn striker(&self) -> Option<&Batsman> {
        self.striker.as_ref()
    }

    pub fn non_striker(&self) -> Option<&Batsman> {
        self.non_striker.as_ref()
    }

    /// Position of an active batsman
    pub fn position_of(&self, id: &PlayerId) -> Option<Position> {
        if self.striker.as_ref().is_some_and(|b| &b.id == id) {
            Some(Position::Striker)
        } else if self.non_striker.as_ref().is_some_and(|b| &b.id == id) {
            Some(Position::NonStriker)
        } else {
            None
        }
    }

    pub fn archive(&self) -> &[Batsman] {
        &self.archive
    }

    pub fn pending_return(&self) -> &[Batsman] {
        &self.pending_return
    }

    /// Looks up a batsman anywhere in the roster
    pub fn batsman(&self, id: &PlayerId) -> Option<&Batsman> {
        self.striker
            .iter()
            .chain(self.non_striker.iter())
            .chain(self.archive.iter())
            .chain(self.pending_return.iter())
            .find(|b| &b.id == id)
    }

    /// Every batsman record, in batting order
    pub fn batting_order(&self) -> Vec<&Batsman> {
        let mut all: Vec<&Batsman> = self
            .striker
            .iter()
            .chain(self.non_striker.iter())
            .chain(self.archive.iter())
            .chain(self.pending_return.iter())
            .collect();
        all.sort_by_key(|b| b.order);
        all
    }

    fn ensure_unique_batsman(&self, name: &str) -> Result<(), ValidationError> {
        let taken = self
            .striker
            .iter()
            .chain(self.non_striker.iter())
            .chain(self.archive.iter())
            .chain(self.pending_return.iter())
            .any(|b| same_name(&b.name, name));
        if taken {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Credits runs and a ball faced to the batsman at a position
    pub fn record_delivery(&mut self, position: Position, runs: u32) {
        if let Some(batsman) = self.slot(position) {
            batsman.runs += runs;
            batsman.balls += 1;
            match runs {
                4 => batsman.fours += 1,
                6 => batsman.sixes += 1,
                _ => {}
            }
        }
    }

    /// Counts a ball faced without runs credited (byes, free-hit escapes)
    pub(crate) fn record_ball_faced(&mut self, position: Position) {
        if let Some(batsman) = self.slot(position) {
            batsman.balls += 1;
        }
    }

    /// Swaps striker and non-striker; a lone batsman keeps the strike
    pub fn swap_strike(&mut self) {
        if self.striker.is_some() && self.non_striker.is_some() {
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        }
    }

    /// Writes the dismissal note on the batsman at a position
    pub(crate) fn mark_dismissed(&mut self, position: Position, note: String) {
        if let Some(batsman) = self.slot(position) {
            batsman.dismissal = Some(note);
        }
    }

    fn archive_outgoing(&mut self, outgoing: Option<Batsman>) {
        if let Some(outgoing) = outgoing {
            if outgoing.has_batted() {
                self.archive.push(outgoing);
            }
        }
    }

    /// Sends the batsman at a position off and brings in a new one
    ///
    /// The outgoing record is archived if they faced a ball or were
    /// dismissed; an entry that never batted is dropped as a correction.
    pub fn replace_at_position(&mut self, position: Position, name: &str) -> ScoringResult<PlayerId> {
        let name = validate_name(name)?;
        let correcting = self
            .at(position)
            .is_some_and(|b| !b.has_batted() && same_name(&b.name, &name));
        if !correcting {
            self.ensure_unique_batsman(&name)?;
        }

        let incoming = self.new_batsman(name);
        let id = incoming.id.clone();
        let outgoing = self.slot(position).replace(incoming);
        self.archive_outgoing(outgoing);
        Ok(id)
    }

    /// Archives the batsman at a position without a replacement
    ///
    /// Used when the last batsman carries on alone; the survivor always
    /// takes strike.
    pub(crate) fn vacate(&mut self, position: Position) {
        let outgoing = self.slot(position).take();
        self.archive_outgoing(outgoing);
        if self.striker.is_none() {
            self.striker = self.non_striker.take();
        }
    }

    /// Retires the batsman at a position and brings in a new one
    ///
    /// The retired batsman keeps their identity and figures in the
    /// pending-return pool.
    pub fn retire(&mut self, position: Position, new_name: &str) -> ScoringResult<PlayerId> {
        let new_name = validate_name(new_name)?;
        self.ensure_unique_batsman(&new_name)?;
        if self.at(position).is_none() {
            return Err(ValidationError::UnknownPlayer(position.to_string()).into());
        }

        let incoming = self.new_batsman(new_name);
        let id = incoming.id.clone();
        if let Some(mut retired) = self.slot(position).replace(incoming) {
            retired.dismissal = None;
            self.pending_return.push(retired);
        }
        Ok(id)
    }

    /// Brings a retired batsman back in at a position
    ///
    /// Whoever held the position is archived, even without a ball faced.
    pub fn return_from_pending(&mut self, name: &str, position: Position) -> ScoringResult<PlayerId> {
        let index = self
            .pending_return
            .iter()
            .position(|b| same_name(&b.name, name))
            .ok_or_else(|| ValidationError::RetiredPlayerNotFound(name.trim().to_string()))?;

        let returning = self.pending_return.remove(index);
        let id = returning.id.clone();
        if let Some(outgoing) = self.slot(position).replace(returning) {
            self.archive.push(outgoing);
        }
        Ok(id)
    }

    /// Changes a batsman's display name
    pub fn rename_batsman(&mut self, id: &PlayerId, name: &str) -> ScoringResult<()> {
        let name = validate_name(name)?;
        let clash = self
            .batting_order()
            .iter()
            .any(|b| &b.id != id && same_name(&b.name, &name));
        if clash {
            return Err(ValidationError::DuplicateName(name).into());
        }

        let batsman = self
            .striker
            .iter_mut()
            .chain(self.non_striker.iter_mut())
            .chain(self.archive.iter_mut())
            .chain(self.pending_return.iter_mut())
            .find(|b| &b.id == id)
            .ok_or_else(|| ValidationError::UnknownPlayer(id.to_string()))?;
        batsman.name = name;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Bowling
    // -------------------------------------------------------------------------

    pub fn bowlers(&self) -> &[Bowler] {
        &self.bowlers
    }

    pub fn bowler(&self, id: &BowlerId) -> Option<&Bowler> {
        self.bowlers.iter().find(|b| &b.id == id)
    }

    pub fn current_bowler(&self) -> Option<&Bowler> {
        self.current_bowler.as_ref().and_then(|id| self.bowler(id))
    }

    pub fn current_bowler_id(&self) -> Option<&BowlerId> {
        self.current_bowler.as_ref()
    }

    pub fn is_bowler_dismissed(&self, id: &BowlerId) -> bool {
        self.dismissed_bowlers.contains(id)
    }

    pub fn dismissed_bowlers(&self) -> impl Iterator<Item = &BowlerId> {
        self.dismissed_bowlers.iter()
    }

    pub fn awaiting_bowler(&self) -> bool {
        self.awaiting_bowler
    }

    /// Applies a delivery to the current bowler's figures
    pub(crate) fn charge_bowler(&mut self, charge: BowlerCharge) {
        let Some(id) = self.current_bowler.clone() else {
            return;
        };
        if let Some(bowler) = self.bowlers.iter_mut().find(|b| b.id == id) {
            bowler.runs += charge.runs;
            if charge.legal {
                bowler.add_legal_ball();
            }
            if charge.wicket {
                bowler.wickets += 1;
            }
            if charge.wide {
                bowler.wides += 1;
            }
            if charge.no_ball {
                bowler.no_balls += 1;
            }
        }
    }

    /// Asks for a new bowler; `barred` may not bowl the next over
    pub fn request_new_bowler(&mut self, barred: BowlerId) {
        self.barred_bowler = Some(barred);
        self.awaiting_bowler = true;
    }

    /// Checks a named bowler against the rotation rules
    ///
    /// Returns the existing record if the name matches one, or `None` if the
    /// name is new to this innings.
    fn check_bowler(&self, name: &str, cap: Option<u32>) -> Result<Option<BowlerId>, ValidationError> {
        let Some(existing) = self.bowlers.iter().find(|b| same_name(&b.name, name)) else {
            return Ok(None);
        };
        if self.dismissed_bowlers.contains(&existing.id) {
            return Err(ValidationError::BowlerDismissed(existing.name.clone()));
        }
        if self.barred_bowler.as_ref() == Some(&existing.id) {
            return Err(ValidationError::ConsecutiveOvers(existing.name.clone()));
        }
        if let Some(cap) = cap {
            if existing.overs >= cap {
                return Err(ValidationError::BowlerCapReached {
                    name: existing.name.clone(),
                    cap,
                });
            }
        }
        Ok(Some(existing.id.clone()))
    }

    fn install_bowler(&mut self, name: String, existing: Option<BowlerId>) -> BowlerId {
        let id = match existing {
            Some(id) => id,
            None => {
                let bowler = self.new_bowler(name);
                let id = bowler.id.clone();
                self.bowlers.push(bowler);
                id
            }
        };
        self.current_bowler = Some(id.clone());
        id
    }

    /// Resolves the bowler for the next over, resuming an existing record or
    /// creating a new one
    pub fn confirm_bowler(&mut self, name: &str, cap: Option<u32>) -> ScoringResult<BowlerId> {
        if !self.awaiting_bowler {
            return Err(StateError::NoBowlerRequested.into());
        }
        let name = validate_name(name)?;
        let existing = self.check_bowler(&name, cap)?;

        let id = self.install_bowler(name, existing);
        self.awaiting_bowler = false;
        Ok(id)
    }

    /// Removes the current bowler from the attack for the rest of the
    /// innings; the replacement finishes the over in progress
    pub fn dismiss_bowler(&mut self, replacement: &str, cap: Option<u32>) -> ScoringResult<BowlerId> {
        let current = self
            .current_bowler
            .clone()
            .ok_or(StateError::NoActiveInnings)?;
        let replacement = validate_name(replacement)?;
        if self
            .bowler(&current)
            .is_some_and(|b| same_name(&b.name, &replacement))
        {
            return Err(ValidationError::BowlerDismissed(replacement).into());
        }
        let existing = self.check_bowler(&replacement, cap)?;

        self.dismissed_bowlers.insert(current);
        Ok(self.install_bowler(replacement, existing))
    }

    /// Changes a bowler's display name
    pub fn rename_bowler(&mut self, id: &BowlerId, name: &str) -> ScoringResult<()> {
        let name = validate_name(name)?;
        if self
            .bowlers
            .iter()
            .any(|b| &b.id != id && same_name(&b.name, &name))
        {
            return Err(ValidationError::DuplicateName(name).into());
        }
        let bowler = self
            .bowlers
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| ValidationError::UnknownPlayer(id.to_string()))?;
        bowler.name = name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoringError;

    fn started() -> Roster {
        let mut roster = Roster::new();
        roster.start_innings(1, "Rohit", "Gill", "Starc").unwrap();
        roster
    }

    fn names(batsmen: &[Batsman]) -> Vec<&str> {
        batsmen.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn start_innings_creates_pair_and_bowler() {
        let roster = started();

        assert_eq!(roster.striker().unwrap().name, "Rohit");
        assert_eq!(roster.non_striker().unwrap().name, "Gill");
        assert_eq!(roster.current_bowler().unwrap().name, "Starc");
        assert_ne!(roster.striker().unwrap().id, roster.non_striker().unwrap().id);
    }

    #[test]
    fn start_innings_twice_fails() {
        let mut roster = started();
        let err = roster.start_innings(1, "A1", "B1", "C1").unwrap_err();

        assert_eq!(err, ScoringError::State(StateError::InningsActive));
        assert_eq!(roster.striker().unwrap().name, "Rohit");
    }

    #[test]
    fn start_innings_rejects_same_openers() {
        let mut roster = Roster::new();
        let err = roster.start_innings(1, "Rohit", "rohit", "Starc").unwrap_err();

        assert!(matches!(
            err,
            ScoringError::Validation(ValidationError::DuplicateName(_))
        ));
        assert!(!roster.is_active());
    }

    #[test]
    fn record_delivery_counts_boundaries() {
        let mut roster = started();
        roster.record_delivery(Position::Striker, 4);
        roster.record_delivery(Position::Striker, 6);
        roster.record_delivery(Position::NonStriker, 0);

        let striker = roster.striker().unwrap();
        assert_eq!((striker.runs, striker.balls), (10, 2));
        assert_eq!((striker.fours, striker.sixes), (1, 1));
        assert_eq!(roster.non_striker().unwrap().balls, 1);
    }

    #[test]
    fn replace_archives_dismissed_player() {
        let mut roster = started();
        roster.record_delivery(Position::Striker, 2);
        let out_id = roster.striker().unwrap().id.clone();
        roster.mark_dismissed(Position::Striker, "b Starc".into());

        let new_id = roster.replace_at_position(Position::Striker, "Kohli").unwrap();

        assert_ne!(new_id, out_id);
        assert_eq!(names(roster.archive()), vec!["Rohit"]);
        let archived = roster.batsman(&out_id).unwrap();
        assert_eq!(archived.runs, 2);
        assert_eq!(archived.dismissal.as_deref(), Some("b Starc"));
        assert_eq!(roster.striker().unwrap().name, "Kohli");
    }

    #[test]
    fn replace_drops_never_batted_entry() {
        let mut roster = started();
        roster.replace_at_position(Position::NonStriker, "Shubman").unwrap();

        assert!(roster.archive().is_empty());
        assert_eq!(roster.non_striker().unwrap().name, "Shubman");
    }

    #[test]
    fn replace_rejects_duplicate_name() {
        let mut roster = started();
        let err = roster
            .replace_at_position(Position::Striker, "gill")
            .unwrap_err();

        assert!(matches!(
            err,
            ScoringError::Validation(ValidationError::DuplicateName(_))
        ));
    }

    #[test]
    fn replace_rejects_name_of_dismissed_player() {
        let mut roster = started();
        roster.mark_dismissed(Position::Striker, "b Starc".into());

        let err = roster
            .replace_at_position(Position::Striker, "Rohit")
            .unwrap_err();

        assert!(matches!(
            err,
            ScoringError::Validation(ValidationError::DuplicateName(_))
        ));
        assert_eq!(roster.striker().unwrap().name, "Rohit");
        assert!(roster.archive().is_empty());
    }

    #[test]
    fn replace_allows_same_name_as_correction() {
        let mut roster = started();
        roster.replace_at_position(Position::NonStriker, "gill").unwrap();

        assert_eq!(roster.non_striker().unwrap().name, "gill");
        assert!(roster.archive().is_empty());
    }

    #[test]
    fn return_archives_substitute_who_never_faced() {
        let mut roster = started();
        let kohli = roster.retire(Position::NonStriker, "Kohli").unwrap();

        roster.return_from_pending("Gill", Position::NonStriker).unwrap();

        assert_eq!(roster.non_striker().unwrap().name, "Gill");
        assert_eq!(names(roster.archive()), vec!["Kohli"]);
        assert!(roster.batsman(&kohli).is_some());
        assert!(roster.pending_return().is_empty());
    }

    #[test]
    fn retire_and_return_keeps_identity_and_figures() {
        let mut roster = started();
        roster.record_delivery(Position::Striker, 3);
        roster.record_delivery(Position::Striker, 1);
        let rohit = roster.striker().unwrap().id.clone();

        roster.retire(Position::Striker, "Kohli").unwrap();
        assert_eq!(names(roster.pending_return()), vec!["Rohit"]);
        assert!(roster.archive().is_empty());

        roster.record_delivery(Position::NonStriker, 0);
        let id = roster.return_from_pending("rohit", Position::NonStriker).unwrap();

        assert_eq!(id, rohit);
        let back = roster.non_striker().unwrap();
        assert_eq!((back.runs, back.balls), (4, 2));
        assert!(back.dismissal.is_none());
        assert!(roster.pending_return().is_empty());
        // the occupant is archived
        assert_eq!(names(roster.archive()), vec!["Gill"]);
    }

    #[test]
    fn return_unknown_player_fails() {
        let mut roster = started();
        let err = roster
            .return_from_pending("Nobody", Position::Striker)
            .unwrap_err();

        assert_eq!(
            err,
            ScoringError::Validation(ValidationError::RetiredPlayerNotFound("Nobody".into()))
        );
    }

    #[test]
    fn vacate_moves_survivor_to_strike() {
        let mut roster = started();
        roster.mark_dismissed(Position::Striker, "b Starc".into());
        roster.vacate(Position::Striker);

        assert_eq!(roster.striker().unwrap().name, "Gill");
        assert!(roster.non_striker().is_none());

        roster.swap_strike();
        assert_eq!(roster.striker().unwrap().name, "Gill");
    }

    #[test]
    fn confirm_bowler_requires_request() {
        let mut roster = started();
        let err = roster.confirm_bowler("Cummins", None).unwrap_err();

        assert_eq!(err, ScoringError::State(StateError::NoBowlerRequested));
    }

    #[test]
    fn consecutive_overs_rejected() {
        let mut roster = started();
        let starc = roster.current_bowler_id().cloned().unwrap();
        roster.request_new_bowler(starc.clone());

        let err = roster.confirm_bowler("Starc", None).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Validation(ValidationError::ConsecutiveOvers("Starc".into()))
        );
        assert!(roster.awaiting_bowler());

        let cummins = roster.confirm_bowler("Cummins", None).unwrap();
        roster.request_new_bowler(cummins);
        let resumed = roster.confirm_bowler("starc", None).unwrap();

        assert_eq!(resumed, starc);
        assert_eq!(roster.bowlers().len(), 2);
    }

    #[test]
    fn bowler_cap_enforced() {
        let mut roster = started();
        for _ in 0..6 {
            roster.charge_bowler(BowlerCharge {
                legal: true,
                ..BowlerCharge::default()
            });
        }
        assert_eq!(roster.current_bowler().unwrap().overs, 1);

        let starc = roster.current_bowler_id().cloned().unwrap();
        roster.request_new_bowler(starc);
        roster.confirm_bowler("Cummins", Some(1)).unwrap();
        let cummins = roster.current_bowler_id().cloned().unwrap();
        roster.request_new_bowler(cummins);

        let err = roster.confirm_bowler("Starc", Some(1)).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Validation(ValidationError::BowlerCapReached {
                name: "Starc".into(),
                cap: 1
            })
        );
    }

    #[test]
    fn dismissed_bowler_is_excluded_for_innings() {
        let mut roster = started();
        let starc = roster.current_bowler_id().cloned().unwrap();

        let hazlewood = roster.dismiss_bowler("Hazlewood", None).unwrap();
        assert!(roster.is_bowler_dismissed(&starc));
        assert_eq!(roster.current_bowler_id(), Some(&hazlewood));

        roster.request_new_bowler(hazlewood);
        let err = roster.confirm_bowler("Starc", None).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Validation(ValidationError::BowlerDismissed("Starc".into()))
        );
    }

    #[test]
    fn bowler_figures_roll_over() {
        let mut roster = started();
        for _ in 0..7 {
            roster.charge_bowler(BowlerCharge {
                runs: 1,
                legal: true,
                ..BowlerCharge::default()
            });
        }
        roster.charge_bowler(BowlerCharge {
            runs: 1,
            wide: true,
            ..BowlerCharge::default()
        });

        let bowler = roster.current_bowler().unwrap();
        assert_eq!(bowler.figures().to_string(), "1.1");
        assert_eq!(bowler.runs, 8);
        assert_eq!(bowler.wides, 1);
    }

    #[test]
    fn rename_keeps_identity() {
        let mut roster = started();
        let id = roster.striker().unwrap().id.clone();

        roster.rename_batsman(&id, "Rohit Sharma").unwrap();
        assert_eq!(roster.batsman(&id).unwrap().name, "Rohit Sharma");

        let err = roster.rename_batsman(&id, "Gill").unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Validation(ValidationError::DuplicateName(_))
        ));
    }
}
