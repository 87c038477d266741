use crate::sat::cardinality::at_most_one;
use crate::sudoku::encoding::{Size, SudokuLiteral, encode};

/// No two boards of an `n`-tuple hold the same value in the same cell.
///
/// For each `(row, col, value)` this is an at-most-one over the `n` board
/// literals, which sit `S^3` apart. A single board needs no overlap clauses.
#[must_use]
pub fn overlap_clauses(size: Size, boards: usize) -> Vec<Vec<i32>> {
    let side = size.side();
    let mut clauses = Vec::new();

    for row in 0..side {
        for col in 0..side {
            for value in 0..side {
                let lits: Vec<i32> = encode(0, row, col, value, side)
                    .stride(size.literals_per_board(), boards)
                    .map(SudokuLiteral::positive)
                    .collect();
                clauses.extend(at_most_one(&lits));
            }
        }
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_board_has_no_overlap() {
        assert!(overlap_clauses(Size::new(3), 1).is_empty());
        assert!(overlap_clauses(Size::new(2), 0).is_empty());
    }

    #[test]
    fn test_pair_clauses() {
        let clauses = overlap_clauses(Size::new(2), 2);
        assert_eq!(clauses.len(), 64);
        assert_eq!(clauses[0], vec![-1, -65]);
        assert_eq!(clauses[63], vec![-64, -128]);
    }

    #[test]
    fn test_triple_clause_count() {
        // three pairs per (row, col, value)
        assert_eq!(overlap_clauses(Size::new(3), 3).len(), 729 * 3);
    }
}
