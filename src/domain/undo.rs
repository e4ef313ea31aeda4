//! Snapshot-based undo
//!
//! Every committed event pushes a full copy of the scorebook. Undo pops the
//! top entry and hands back the one beneath it; there is no redo. The bottom
//! entry is the state before anything happened and can never be popped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StateError;

/// A labelled copy of the state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// What was committed, e.g. `run 4` or `bowler Cummins`
    pub label: String,
    pub taken_at: DateTime<Utc>,
    pub state: T,
}

impl<T> Snapshot<T> {
    pub fn new(label: impl Into<String>, state: T) -> Self {
        Self {
            label: label.into(),
            taken_at: Utc::now(),
            state,
        }
    }
}

/// Stack of snapshots with the initial state at the bottom
#[derive(Debug, Clone, PartialEq)]
pub struct UndoStack<T> {
    entries: Vec<Snapshot<T>>,
}

impl<T: Clone> UndoStack<T> {
    /// Creates a stack holding only the initial state
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![Snapshot::new("start", initial)],
        }
    }

    /// Rebuilds a stack from stored entries; `None` if there are none
    pub fn from_entries(entries: Vec<Snapshot<T>>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Records a copy of the state
    pub fn commit(&mut self, label: impl Into<String>, state: &T) -> &Snapshot<T> {
        self.entries.push(Snapshot::new(label, state.clone()));
        &self.entries[self.entries.len() - 1]
    }

    /// Drops the latest snapshot and returns a copy of the state beneath it,
    /// together with the dropped label
    pub fn undo(&mut self) -> Result<(T, String), StateError> {
        if self.entries.len() <= 1 {
            return Err(StateError::EmptyUndoStack);
        }
        let popped = self.entries.pop().ok_or(StateError::EmptyUndoStack)?;
        let below = self
            .entries
            .last()
            .map(|s| s.state.clone())
            .ok_or(StateError::EmptyUndoStack)?;
        Ok((below, popped.label))
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn top(&self) -> &Snapshot<T> {
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[Snapshot<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_restores_previous_state() {
        let mut stack = UndoStack::new(0u32);
        stack.commit("one", &1);
        stack.commit("two", &2);

        let (state, label) = stack.undo().unwrap();
        assert_eq!(state, 1);
        assert_eq!(label, "two");
        assert_eq!(stack.top().state, 1);
    }

    #[test]
    fn initial_state_cannot_be_undone() {
        let mut stack = UndoStack::new(vec!["x"]);
        assert!(!stack.can_undo());
        assert_eq!(stack.undo(), Err(StateError::EmptyUndoStack));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn commit_copies_state() {
        let mut state = vec![1];
        let mut stack = UndoStack::new(state.clone());
        state.push(2);
        stack.commit("push", &state);
        state.push(3);

        assert_eq!(stack.top().state, vec![1, 2]);
        let (restored, _) = stack.undo().unwrap();
        assert_eq!(restored, vec![1]);
    }

    #[test]
    fn from_entries_requires_initial() {
        assert!(UndoStack::<u32>::from_entries(vec![]).is_none());

        let stack = UndoStack::from_entries(vec![Snapshot::new("start", 5u32)]).unwrap();
        assert_eq!(stack.top().label, "start");
    }
}
