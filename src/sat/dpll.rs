#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! An incremental DPLL engine.
//!
//! The solver keeps its clause database, watch lists and saved phases across
//! `solve` calls; only the trail is rebuilt for each call. The search is the
//! classical one:
//! 1.  **Setup:** unit clauses of the formula and then the caller's
//!     assumptions are put on the trail. A falsified assumption means the
//!     query is unsatisfiable.
//! 2.  **Unit Propagation:** two watched literals per clause. A clause is
//!     only visited when one of its watches becomes false.
//! 3.  **Decision:** the first unassigned variable is branched on, using the
//!     polarity it had in the previous model.
//! 4.  **Backtracking:** chronological. On a conflict the most recent decision
//!     that has not yet been flipped is flipped. Running out of decisions
//!     means the formula is unsatisfiable under the assumptions.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::phase_saving::SavedPhases;
use crate::sat::solver::{IncrementalSolver, SolutionStats};
use crate::sat::trail::{Reason, Trail};
use crate::sat::watch::WatchedLiterals;
use log::debug;

/// The DPLL engine. See the module documentation for the search.
#[derive(Debug, Clone, Default)]
pub struct Dpll {
    /// Clauses with at least two literals. Positions 0 and 1 are watched.
    clauses: Vec<Clause>,
    /// Unit clauses, put on the trail at the start of every solve.
    units: Vec<Literal>,
    /// For each literal, the clauses that watch it.
    watches: WatchedLiterals,
    /// Current value of every variable.
    assignment: Assignment,
    /// Assigned literals in order, with their reasons.
    trail: Trail,
    /// Branching polarity per variable, taken from the last model.
    phases: SavedPhases,
    /// Highest variable seen in a clause or an assumption.
    num_vars: usize,
    /// Set once an empty clause has been added.
    inconsistent: bool,
    /// Model of the last successful solve.
    model: Option<Solutions>,
    /// Counters over every solve of this engine.
    stats: SolutionStats,
}

impl IncrementalSolver for Dpll {
    fn new(cnf: Cnf) -> Self {
        let mut solver = Self {
            clauses: Vec::with_capacity(cnf.len()),
            units: Vec::new(),
            watches: WatchedLiterals::new(cnf.num_vars),
            assignment: Assignment::new(cnf.num_vars),
            trail: Trail::new(cnf.num_vars),
            phases: SavedPhases::new(cnf.num_vars),
            num_vars: cnf.num_vars,
            inconsistent: false,
            model: None,
            stats: SolutionStats::default(),
        };

        for clause in &cnf.clauses {
            solver.add_clause(clause);
        }

        debug!(
            "engine loaded {} clauses ({} units) over {} variables",
            solver.num_clauses(),
            solver.units.len(),
            solver.num_vars()
        );
        solver
    }

    fn add_clause(&mut self, clause: &[i32]) {
        let Some(clause) = Clause::normalised(clause) else {
            return;
        };

        if let Some(max) = clause.iter().map(|l| l.variable() as usize).max() {
            self.ensure_vars(max);
        }

        match clause.len() {
            0 => self.inconsistent = true,
            1 => self.units.push(clause[0]),
            _ => {
                let idx = self.clauses.len();
                self.watches.watch(clause[0], idx);
                self.watches.watch(clause[1], idx);
                self.clauses.push(clause);
            }
        }
    }

    fn solve(&mut self, assumptions: &[i32]) -> bool {
        self.stats.solve_calls += 1;
        self.model = None;
        self.reset();

        let satisfiable = self.search(assumptions);
        if satisfiable {
            let model = self.assignment.solutions();
            self.phases.save_model(&model);
            self.model = Some(model);
        }

        debug!(
            "solve #{} under {} assumptions: {}",
            self.stats.solve_calls,
            assumptions.len(),
            if satisfiable { "SAT" } else { "UNSAT" }
        );
        satisfiable
    }

    fn model(&self) -> Option<&Solutions> {
        self.model.as_ref()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dpll {
    /// Number of variables known to the engine.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of stored clauses, units included. Tautologies are not stored.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len() + self.units.len()
    }

    /// Runs one search from an empty trail. Returns whether a model was found.
    fn search(&mut self, assumptions: &[i32]) -> bool {
        if self.inconsistent {
            return false;
        }

        if let Some(max) = assumptions.iter().map(|l| l.unsigned_abs() as usize).max() {
            self.ensure_vars(max);
        }

        for i in 0..self.units.len() {
            if !self.enqueue(self.units[i], Reason::Unit) {
                return false;
            }
        }

        for &lit in assumptions {
            if !self.enqueue(Literal::from_i32(lit), Reason::Assumption) {
                return false;
            }
        }

        loop {
            if !self.propagate() {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    return false;
                }
                continue;
            }

            let Some(lit) = self.pick_branch_literal() else {
                return true;
            };

            self.stats.decisions += 1;
            self.assignment.assign(lit);
            self.trail.push(lit, Reason::Decision { flipped: false });
        }
    }

    /// Puts `lit` on the trail unless it already holds. Returns `false` if
    /// it is already false.
    fn enqueue(&mut self, lit: Literal, reason: Reason) -> bool {
        match self.assignment.literal_value(lit) {
            Some(value) => value,
            None => {
                self.assignment.assign(lit);
                self.trail.push(lit, reason);
                true
            }
        }
    }

    /// Propagates every pending trail literal. Returns `false` on conflict.
    fn propagate(&mut self) -> bool {
        while let Some(lit) = self.trail.next_to_propagate() {
            self.stats.propagations += 1;
            let false_lit = lit.negated();
            let mut watchers = self.watches.take(false_lit);
            let mut conflict = false;
            let mut i = 0;

            while i < watchers.len() {
                let idx = watchers[i];
                let clause = &mut self.clauses[idx];
                if clause[0] == false_lit {
                    clause.swap(0, 1);
                }

                let other = clause[0];
                if self.assignment.literal_value(other) == Some(true) {
                    i += 1;
                    continue;
                }

                let replacement =
                    (2..clause.len()).find(|&k| self.assignment.literal_value(clause[k]) != Some(false));

                if let Some(k) = replacement {
                    clause.swap(1, k);
                    self.watches.watch(clause[1], idx);
                    watchers.swap_remove(i);
                    continue;
                }

                if self.assignment.literal_value(other) == Some(false) {
                    conflict = true;
                    break;
                }

                self.assignment.assign(other);
                self.trail.push(other, Reason::Clause(idx));
                i += 1;
            }

            self.watches.restore(false_lit, watchers);
            if conflict {
                return false;
            }
        }
        true
    }

    /// Undoes the trail up to the latest unflipped decision and flips it.
    /// Returns `false` when no such decision exists.
    fn backtrack(&mut self) -> bool {
        while let Some(step) = self.trail.pop() {
            self.assignment.unassign(step.lit.variable());

            match step.reason {
                Reason::Decision { flipped: false } => {
                    let flipped = step.lit.negated();
                    self.assignment.assign(flipped);
                    self.trail.push(flipped, Reason::Decision { flipped: true });
                    return true;
                }
                Reason::Unit | Reason::Assumption => return false,
                Reason::Decision { flipped: true } | Reason::Clause(_) => {}
            }
        }
        false
    }

    /// The first unassigned variable, in its saved polarity.
    #[allow(clippy::cast_possible_truncation)]
    fn pick_branch_literal(&self) -> Option<Literal> {
        (1..=self.num_vars)
            .find(|&var| self.assignment[var].is_unassigned())
            .map(|var| Literal::new(var as Variable, self.phases.get(var)))
    }

    /// Unassigns everything on the trail and empties it.
    fn reset(&mut self) {
        for step in self.trail.iter() {
            self.assignment.unassign(step.lit.variable());
        }
        self.trail.clear();
    }

    fn ensure_vars(&mut self, num_vars: usize) {
        if num_vars > self.num_vars {
            self.assignment.grow(num_vars);
            self.watches.grow(num_vars);
            self.phases.grow(num_vars);
            self.num_vars = num_vars;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cardinality::{at_most_one, exactly_one};

    fn solver(clauses: Vec<Vec<i32>>) -> Dpll {
        Dpll::new(Cnf::new(clauses))
    }

    #[test]
    fn test_simple_sat() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3], vec![-3, -2]]);
        let mut s = Dpll::new(cnf.clone());
        assert!(s.solve(&[]));
        assert!(cnf.verify(s.model().unwrap()));
    }

    #[test]
    fn test_simple_unsat() {
        let mut s = solver(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert!(!s.solve(&[]));
        assert!(s.model().is_none());
    }

    #[test]
    fn test_pigeonhole_three_into_two() {
        // p(i, h) = 2 * i + h + 1
        let mut clauses = Vec::new();
        for i in 0..3 {
            clauses.push(vec![2 * i + 1, 2 * i + 2]);
        }
        for h in 0..2 {
            clauses.extend(at_most_one(&[h + 1, h + 3, h + 5]));
        }
        let mut s = solver(clauses);
        assert!(!s.solve(&[]));
        assert!(s.stats().conflicts > 0);
    }

    #[test]
    fn test_assumptions_are_per_call() {
        let mut s = solver(exactly_one(&[1, 2, 3]));
        assert!(s.solve(&[2]));
        assert_eq!(s.model().unwrap()[1], 2);
        assert_eq!(s.model().unwrap()[0], -1);

        assert!(!s.solve(&[1, 2]));
        assert!(s.solve(&[-1, -2]));
        assert_eq!(s.model().unwrap()[2], 3);
        assert_eq!(s.stats().solve_calls, 3);
    }

    #[test]
    fn test_contradicting_assumptions() {
        let mut s = solver(vec![vec![1, 2]]);
        assert!(!s.solve(&[1, -1]));
        assert!(s.solve(&[1]));
    }

    #[test]
    fn test_add_clause_between_solves() {
        let mut s = solver(vec![vec![1, 2]]);
        assert!(s.solve(&[]));
        s.add_clause(&[-1]);
        s.add_clause(&[-2, 3]);
        assert!(s.solve(&[]));
        assert_eq!(s.model().unwrap(), &vec![-1, 2, 3]);
        s.add_clause(&[-3]);
        assert!(!s.solve(&[]));
    }

    #[test]
    fn test_new_variables_from_assumptions() {
        let mut s = solver(vec![vec![1]]);
        assert!(s.solve(&[-4]));
        assert_eq!(s.model().unwrap().len(), 4);
        assert_eq!(s.model().unwrap()[3], -4);
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let mut s = solver(vec![vec![1], vec![]]);
        assert!(!s.solve(&[]));
    }

    #[test]
    fn test_tautology_ignored() {
        let s = solver(vec![vec![1, -1], vec![2, 3]]);
        assert_eq!(s.num_clauses(), 1);
        assert_eq!(s.num_vars(), 3);
    }

    #[test]
    fn test_saved_phase_reused() {
        let mut s = solver(vec![vec![1, 2]]);
        assert!(s.solve(&[-1]));
        assert!(s.solve(&[]));
        assert_eq!(s.model().unwrap(), &vec![-1, 2]);
    }
}
