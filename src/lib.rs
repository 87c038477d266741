//! Sudoku and Sudoku-tuple solving and puzzle generation through an
//! incremental SAT solver.

/// A small incremental DPLL solver and the CNF building blocks it works on.
pub mod sat;

/// Boards, their CNF encoding, solving, uniqueness checks and puzzle generation.
pub mod sudoku;
