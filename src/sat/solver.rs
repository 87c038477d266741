use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use std::fmt::{Display, Formatter};

/// Counters accumulated over the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Number of `solve` calls.
    pub solve_calls: usize,
    /// Number of free branching decisions.
    pub decisions: usize,
    /// Number of trail literals propagated.
    pub propagations: usize,
    /// Number of conflicts hit during search.
    pub conflicts: usize,
}

impl Display for SolutionStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} solve calls, {} decisions, {} propagations, {} conflicts",
            self.solve_calls, self.decisions, self.propagations, self.conflicts
        )
    }
}

/// An engine that keeps its clause database between calls and answers
/// satisfiability queries under a list of unit assumptions.
///
/// Literals use the DIMACS convention: nonzero `i32`, negative for negation.
pub trait IncrementalSolver: Sized {
    /// Loads the clauses of `cnf`.
    fn new(cnf: Cnf) -> Self;

    /// Adds a permanent clause. Takes effect from the next `solve` call.
    fn add_clause(&mut self, clause: &[i32]);

    /// Returns whether the loaded clauses are satisfiable with every
    /// assumption literal forced true. Assumptions last for this call only.
    fn solve(&mut self, assumptions: &[i32]) -> bool;

    /// The model found by the last successful `solve`, one signed literal
    /// per variable.
    fn model(&self) -> Option<&Solutions>;

    /// Counters accumulated since `new`.
    fn stats(&self) -> SolutionStats;

    /// Gives the engine back. Called once a pipeline is done with it.
    fn release(self) {}
}
