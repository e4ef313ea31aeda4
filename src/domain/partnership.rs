//! Batting partnerships
//!
//! The running partnership of the pair at the crease, and the sealed ledger of
//! every partnership broken so far.

use serde::{Deserialize, Serialize};

use super::id::PlayerId;

/// The current, unbroken partnership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    pub batsman1: PlayerId,
    /// `None` while a last batsman bats alone
    pub batsman2: Option<PlayerId>,
    pub runs: u32,
    pub balls: u32,
    pub batsman1_runs: u32,
    pub batsman2_runs: u32,
    /// Byes, wides and no-balls scored during the partnership
    pub extras: u32,
    /// Team score when the partnership began
    pub start_score: u32,
}

impl Partnership {
    fn new(batsman1: PlayerId, batsman2: Option<PlayerId>, start_score: u32) -> Self {
        Self {
            batsman1,
            batsman2,
            runs: 0,
            balls: 0,
            batsman1_runs: 0,
            batsman2_runs: 0,
            extras: 0,
            start_score,
        }
    }
}

/// Why a partnership ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipEnd {
    Wicket,
    Retirement,
}

/// A sealed partnership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipRecord {
    /// Wickets down when the partnership ended
    pub wicket: u32,
    pub score_at_break: u32,
    pub ended_by: PartnershipEnd,
    pub partnership: Partnership,
}

/// Running partnership plus the sealed ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnershipTracker {
    current: Option<Partnership>,
    history: Vec<PartnershipRecord>,
}

impl PartnershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Partnership> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[PartnershipRecord] {
        &self.history
    }

    /// Starts a fresh partnership for a pair
    pub fn start(&mut self, batsman1: PlayerId, batsman2: Option<PlayerId>, score: u32) {
        self.current = Some(Partnership::new(batsman1, batsman2, score));
    }

    /// Adds runs off the bat, credited to whichever batsman is on strike
    pub fn add_runs(&mut self, runs: u32, striker: &PlayerId) {
        if let Some(p) = self.current.as_mut() {
            p.runs += runs;
            if &p.batsman1 == striker {
                p.batsman1_runs += runs;
            } else if p.batsman2.as_ref() == Some(striker) {
                p.batsman2_runs += runs;
            } else {
                p.extras += runs;
            }
        }
    }

    /// Adds runs credited to no batsman
    pub fn add_extra(&mut self, runs: u32) {
        if let Some(p) = self.current.as_mut() {
            p.runs += runs;
            p.extras += runs;
        }
    }

    /// Counts a legal ball
    pub fn add_ball(&mut self) {
        if let Some(p) = self.current.as_mut() {
            p.balls += 1;
        }
    }

    /// Seals the current partnership at the fall of a wicket
    ///
    /// The partnership is dropped without a record if the pair has not faced
    /// a legal ball together.
    pub fn seal(&mut self, score_at_break: u32, wicket_number: u32) {
        self.seal_as(score_at_break, wicket_number, PartnershipEnd::Wicket);
    }

    /// Seals the current partnership when a batsman retires or returns
    pub fn seal_retirement(&mut self, score_at_break: u32, wickets: u32) {
        self.seal_as(score_at_break, wickets, PartnershipEnd::Retirement);
    }

    fn seal_as(&mut self, score_at_break: u32, wicket: u32, ended_by: PartnershipEnd) {
        let Some(current) = self.current.take() else {
            return;
        };
        if current.balls == 0 {
            return;
        }
        self.history.push(PartnershipRecord {
            wicket,
            score_at_break,
            ended_by,
            partnership: current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (PlayerId, PlayerId) {
        (PlayerId::new(1, 1, "Rohit"), PlayerId::new(1, 2, "Gill"))
    }

    #[test]
    fn runs_are_credited_to_striker() {
        let (a, b) = pair();
        let mut tracker = PartnershipTracker::new();
        tracker.start(a.clone(), Some(b.clone()), 0);

        tracker.add_runs(4, &a);
        tracker.add_ball();
        tracker.add_runs(1, &b);
        tracker.add_ball();
        tracker.add_extra(1);

        let p = tracker.current().unwrap();
        assert_eq!(p.runs, 6);
        assert_eq!(p.balls, 2);
        assert_eq!(p.batsman1_runs, 4);
        assert_eq!(p.batsman2_runs, 1);
        assert_eq!(p.extras, 1);
        assert_eq!(p.runs, p.batsman1_runs + p.batsman2_runs + p.extras);
    }

    #[test]
    fn seal_appends_record() {
        let (a, b) = pair();
        let mut tracker = PartnershipTracker::new();
        tracker.start(a.clone(), Some(b.clone()), 10);
        tracker.add_runs(2, &a);
        tracker.add_ball();

        tracker.seal(12, 1);
        tracker.start(b, Some(PlayerId::new(1, 3, "Kohli")), 12);

        assert_eq!(tracker.history().len(), 1);
        let record = &tracker.history()[0];
        assert_eq!(record.wicket, 1);
        assert_eq!(record.score_at_break, 12);
        assert_eq!(record.partnership.runs, 2);
        assert_eq!(record.ended_by, PartnershipEnd::Wicket);
        assert_eq!(tracker.current().unwrap().runs, 0);
    }

    #[test]
    fn seal_without_balls_is_noop() {
        let (a, b) = pair();
        let mut tracker = PartnershipTracker::new();
        tracker.start(a, Some(b), 0);
        tracker.add_extra(1);

        tracker.seal(1, 1);

        assert!(tracker.history().is_empty());
    }
}
