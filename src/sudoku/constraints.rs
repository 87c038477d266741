//! Clauses and clue assumptions for a single board.
//!
//! Every structural rule is an exactly-one constraint over `S` literals that
//! lie on a fixed stride of the encoding:
//!
//! | rule   | varies over | stride |
//! |--------|-------------|--------|
//! | cell   | value       | 1      |
//! | row    | column      | `S`    |
//! | column | row         | `S^2`  |
//! | block  | cell        | n/a    |

use crate::sat::cardinality::exactly_one;
use crate::sudoku::board::Board;
use crate::sudoku::encoding::{Size, SudokuLiteral, encode};

/// The clauses and clue assumptions of one board of a tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConstraints {
    clauses: Vec<Vec<i32>>,
    assumptions: Vec<i32>,
}

impl BoardConstraints {
    /// Clauses are ordered cell, column, row, block.
    #[must_use]
    pub fn build(board: &Board, board_id: usize) -> Self {
        let size = board.size();
        let mut clauses = cell_clauses(size, board_id);
        clauses.extend(col_clauses(size, board_id));
        clauses.extend(row_clauses(size, board_id));
        clauses.extend(block_clauses(size, board_id));

        Self {
            clauses,
            assumptions: clue_assumptions(board, board_id),
        }
    }

    #[must_use]
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }

    #[must_use]
    pub fn assumptions(&self) -> &[i32] {
        &self.assumptions
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<i32>>, Vec<i32>) {
        (self.clauses, self.assumptions)
    }
}

fn strided(start: SudokuLiteral, step: usize, count: usize) -> Vec<i32> {
    start.stride(step, count).map(SudokuLiteral::positive).collect()
}

/// For every filled cell, the value literal it holds and the negation of the
/// other `S - 1` value literals of that cell.
#[must_use]
pub fn clue_assumptions(board: &Board, board_id: usize) -> Vec<i32> {
    let side = board.side();
    board
        .clues()
        .flat_map(|(row, col, value)| {
            (0..side).map(move |v| {
                let lit = encode(board_id, row, col, v, side);
                if v + 1 == value {
                    lit.positive()
                } else {
                    lit.negative()
                }
            })
        })
        .collect()
}

#[must_use]
pub fn cell_clauses(size: Size, board_id: usize) -> Vec<Vec<i32>> {
    let side = size.side();
    let mut clauses = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let start = encode(board_id, row, col, 0, side);
            clauses.extend(exactly_one(&strided(start, 1, side)));
        }
    }
    clauses
}

/// Each value once per row.
#[must_use]
pub fn row_clauses(size: Size, board_id: usize) -> Vec<Vec<i32>> {
    let side = size.side();
    let mut clauses = Vec::new();
    for row in 0..side {
        for value in 0..side {
            let start = encode(board_id, row, 0, value, side);
            clauses.extend(exactly_one(&strided(start, side, side)));
        }
    }
    clauses
}

/// Each value once per column.
#[must_use]
pub fn col_clauses(size: Size, board_id: usize) -> Vec<Vec<i32>> {
    let side = size.side();
    let mut clauses = Vec::new();
    for col in 0..side {
        for value in 0..side {
            let start = encode(board_id, 0, col, value, side);
            clauses.extend(exactly_one(&strided(start, side * side, side)));
        }
    }
    clauses
}

#[must_use]
pub fn block_clauses(size: Size, board_id: usize) -> Vec<Vec<i32>> {
    let side = size.side();
    let k = size.block_size();
    let mut clauses = Vec::new();

    for block_row in 0..k {
        for block_col in 0..k {
            let bases: Vec<i32> = (0..side)
                .map(|i| {
                    encode(board_id, block_row * k + i / k, block_col * k + i % k, 0, side)
                        .positive()
                })
                .collect();

            for value in 0..side {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let offset = value as i32;
                let lits: Vec<i32> = bases.iter().map(|base| base + offset).collect();
                clauses.extend(exactly_one(&lits));
            }
        }
    }
    clauses
}
