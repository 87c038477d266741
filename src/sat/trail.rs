#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::literal::Literal;

/// Why a literal was put on the trail.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    /// A unit clause of the formula.
    Unit,
    /// A unit literal assumed for the current solve call only.
    Assumption,
    /// A branching decision. `flipped` is set once the opposite branch is being explored.
    Decision { flipped: bool },
    /// Implied by the clause at this index.
    Clause(usize),
}

/// One assigned literal and the reason it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The literal made true.
    pub lit: Literal,
    /// Why it was made true.
    pub reason: Reason,
}

/// Assigned literals in assignment order. Backtracking pops from the end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    /// The steps, oldest first.
    t: Vec<Step>,
    /// Position of the next literal to propagate.
    pub head: usize,
}

impl Trail {
    /// An empty trail with room for one step per variable.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars),
            head: 0,
        }
    }

    /// Iterates over the steps, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.t.iter()
    }

    /// Drops every step and rewinds the propagation head.
    pub fn clear(&mut self) {
        self.t.clear();
        self.head = 0;
    }

    /// Appends `lit`, to be propagated later.
    pub fn push(&mut self, lit: Literal, reason: Reason) {
        self.t.push(Step { lit, reason });
    }

    /// Removes the most recent step. The propagation head never points past the end.
    pub fn pop(&mut self) -> Option<Step> {
        let step = self.t.pop()?;
        self.head = self.head.min(self.t.len());
        Some(step)
    }

    /// Returns the next literal waiting for propagation and advances the head.
    pub fn next_to_propagate(&mut self) -> Option<Literal> {
        let step = self.t.get(self.head)?;
        self.head += 1;
        Some(step.lit)
    }
}
