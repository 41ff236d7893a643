//! Branchable navigation history with a cursor.
//!
//! Behaves like a browser history: pushing while the cursor sits behind the
//! newest entry discards the forward branch. Breadcrumb jumps are the
//! exception: they move the cursor without discarding anything, so `forward`
//! can still return to entries past the jump target.

use super::{Breadcrumbs, NavigationState};

/// Result of a cursor move: either the cursor moved to a new index, or it was
/// already at the boundary (or the requested index does not exist).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(usize),
    AtBoundary,
}

impl NavOutcome {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, NavOutcome::Moved(_))
    }
}

/// Navigation history for one session.
///
/// Invariant: `entries` is never empty and `cursor < entries.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<NavigationState>,
    cursor: usize,
}

impl NavigationStack {
    #[must_use]
    pub fn new(initial: NavigationState) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Append `state` after the cursor, discarding any forward-only entries.
    pub fn push(&mut self, state: NavigationState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    /// Replace the whole history with `state`.
    pub fn reset(&mut self, state: NavigationState) {
        self.entries.clear();
        self.entries.push(state);
        self.cursor = 0;
    }

    /// Move one entry back. `AtBoundary` at the oldest entry.
    pub fn back(&mut self) -> NavOutcome {
        match self.cursor.checked_sub(1) {
            Some(index) => {
                self.cursor = index;
                NavOutcome::Moved(index)
            }
            None => NavOutcome::AtBoundary,
        }
    }

    /// Move one entry forward. `AtBoundary` at the newest entry.
    pub fn forward(&mut self) -> NavOutcome {
        if self.can_go_forward() {
            self.cursor += 1;
            NavOutcome::Moved(self.cursor)
        } else {
            NavOutcome::AtBoundary
        }
    }

    /// Move the cursor straight to `index` without truncating.
    ///
    /// Returns `AtBoundary` (and leaves the cursor alone) when `index` is out
    /// of range.
    pub fn jump_to(&mut self, index: usize) -> NavOutcome {
        if index < self.entries.len() {
            self.cursor = index;
            NavOutcome::Moved(index)
        } else {
            NavOutcome::AtBoundary
        }
    }

    #[must_use]
    pub fn current(&self) -> &NavigationState {
        &self.entries[self.cursor]
    }

    /// The trail from the oldest entry up to and including the cursor.
    #[must_use]
    pub fn breadcrumbs(&self) -> Breadcrumbs<'_> {
        Breadcrumbs::new(&self.entries[..=self.cursor])
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[NavigationState] {
        &self.entries
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
