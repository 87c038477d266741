//! Pairwise cardinality encodings.
//!
//! The pairwise scheme needs no auxiliary variables, which keeps the literal
//! numbering of the callers dense. It emits `n(n-1)/2` binary clauses for `n`
//! literals.

use itertools::Itertools;

/// One binary clause `[-a, -b]` for every pair of literals.
#[must_use]
pub fn at_most_one(literals: &[i32]) -> Vec<Vec<i32>> {
    literals
        .iter()
        .tuple_combinations()
        .map(|(&a, &b)| vec![-a, -b])
        .collect()
}

/// A single clause holding every literal.
#[must_use]
pub fn at_least_one(literals: &[i32]) -> Vec<Vec<i32>> {
    vec![literals.to_vec()]
}

/// The at-least-one clause followed by the pairwise at-most-one clauses.
#[must_use]
pub fn exactly_one(literals: &[i32]) -> Vec<Vec<i32>> {
    let mut clauses = at_least_one(literals);
    clauses.extend(at_most_one(literals));
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_one_pairs() {
        let clauses = at_most_one(&[1, 2, 3]);
        assert_eq!(clauses, vec![vec![-1, -2], vec![-1, -3], vec![-2, -3]]);
    }

    #[test]
    fn test_at_most_one_trivial() {
        assert!(at_most_one(&[]).is_empty());
        assert!(at_most_one(&[7]).is_empty());
    }

    #[test]
    fn test_exactly_one_clause_count() {
        let lits: Vec<i32> = (1..=9).collect();
        let clauses = exactly_one(&lits);
        assert_eq!(clauses.len(), 1 + 36);
        assert_eq!(clauses[0], lits);
        assert!(clauses[1..].iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_negative_inputs_flip() {
        assert_eq!(at_most_one(&[-4, 5]), vec![vec![4, -5]]);
    }
}
