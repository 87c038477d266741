#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A flat clause set in conjunctive normal form.
//!
//! Clauses are kept in their DIMACS form (nonzero `i32` literals) so that
//! encoders can build them without knowing anything about the engine's
//! internal literal packing.

use crate::sat::assignment::Solutions;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Vec<i32>>,
    pub num_vars: usize,
}

impl Cnf {
    #[must_use]
    pub fn new(clauses: Vec<Vec<i32>>) -> Self {
        let num_vars = max_variable(&clauses);
        Self { clauses, num_vars }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn add_clause(&mut self, clause: Vec<i32>) {
        self.num_vars = self.num_vars.max(max_variable(std::slice::from_ref(&clause)));
        self.clauses.push(clause);
    }

    /// Total number of literal occurrences over all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }

    /// Checks that every clause has at least one literal made true by `solutions`.
    ///
    /// `solutions` holds one signed literal per variable, as returned by the engine.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                solutions
                    .get(lit.unsigned_abs() as usize - 1)
                    .is_some_and(|&assigned| assigned == lit)
            })
        })
    }
}

fn max_variable(clauses: &[Vec<i32>]) -> usize {
    clauses
        .iter()
        .flatten()
        .map(|lit| lit.unsigned_abs() as usize)
        .max()
        .unwrap_or(0)
}

impl FromIterator<Vec<i32>> for Cnf {
    fn from_iter<T: IntoIterator<Item = Vec<i32>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Vec<i32>> for Cnf {
    fn extend<T: IntoIterator<Item = Vec<i32>>>(&mut self, iter: T) {
        for clause in iter {
            self.add_clause(clause);
        }
    }
}

/// Renders the formula in DIMACS format.
impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_vars_from_clauses() {
        let cnf = Cnf::new(vec![vec![1, -5], vec![3]]);
        assert_eq!(cnf.num_vars, 5);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_literals(), 3);
    }

    #[test]
    fn test_extend_updates_num_vars() {
        let mut cnf = Cnf::new(vec![vec![1, 2]]);
        cnf.extend(vec![vec![-9]]);
        assert_eq!(cnf.num_vars, 9);
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_dimacs_output() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2]]);
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2, 3]]);
        assert!(cnf.verify(&vec![1, 2, -3]));
        assert!(!cnf.verify(&vec![-1, 2, -3]));
    }
}
