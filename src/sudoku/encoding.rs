#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dense numbering of the propositions "cell `(row, col)` of board `board`
//! holds value index `value`".
//!
//! With side `S`, the literal is `board * S^3 + row * S^2 + col * S + value + 1`.
//! Values are zero based here, so value index `v` stands for the digit `v + 1`.
//! The `+ 1` keeps every literal nonzero.

use std::fmt::{Display, Formatter};

/// Largest literal a formula may use, so that it fits a DIMACS `i32`.
#[allow(clippy::cast_sign_loss)]
pub const MAX_LITERAL: u64 = i32::MAX as u64;

/// Puzzle order `k`. A board has side `k * k` and `k * k` blocks of side `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Size {
    order: usize,
}

impl Size {
    /// The size of order `order`, e.g. 3 for the classic 9x9 board.
    #[must_use]
    pub const fn new(order: usize) -> Self {
        Self { order }
    }

    /// The size whose side is `side`, if `side` is a nonzero perfect square.
    #[must_use]
    pub fn from_side(side: usize) -> Option<Self> {
        (1..=side)
            .take_while(|k| k * k <= side)
            .find(|k| k * k == side)
            .map(Self::new)
    }

    /// The order `k`.
    #[must_use]
    pub const fn order(self) -> usize {
        self.order
    }

    /// Side of one block, equal to the order.
    #[must_use]
    pub const fn block_size(self) -> usize {
        self.order
    }

    /// Side `S = k * k` of the board, also the number of values.
    #[must_use]
    pub const fn side(self) -> usize {
        self.order * self.order
    }

    /// Number of cells, `S * S`.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// Number of literals used by one board.
    #[must_use]
    pub const fn literals_per_board(self) -> usize {
        self.cells() * self.side()
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

/// The number of one proposition, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SudokuLiteral(u64);

impl SudokuLiteral {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The literal as a positive DIMACS literal.
    ///
    /// Only defined up to [`MAX_LITERAL`]. `PuzzleFormula::build` refuses
    /// tuples whose encoding goes past it, so literals of a built formula
    /// always fit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn positive(self) -> i32 {
        debug_assert!(self.0 <= MAX_LITERAL, "literal does not fit a DIMACS i32");
        self.0 as i32
    }

    #[must_use]
    pub const fn negative(self) -> i32 {
        -self.positive()
    }

    /// Reads a positive DIMACS literal. Negative literals and 0 give `None`.
    #[must_use]
    pub fn from_dimacs(lit: i32) -> Option<Self> {
        u64::try_from(lit).ok().filter(|&l| l > 0).map(Self)
    }

    /// `count` literals starting at `self`, each `step` past the previous one.
    pub fn stride(self, step: usize, count: usize) -> impl Iterator<Item = Self> {
        let step = step as u64;
        (0..count as u64).map(move |i| Self(self.0 + i * step))
    }
}

impl Display for SudokuLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Proposition {
    pub board: usize,
    pub row: usize,
    pub col: usize,
    /// Zero based value index.
    pub value: usize,
}

impl Proposition {
    #[must_use]
    pub const fn new(board: usize, row: usize, col: usize, value: usize) -> Self {
        Self {
            board,
            row,
            col,
            value,
        }
    }

    #[must_use]
    pub const fn literal(self, side: usize) -> SudokuLiteral {
        encode(self.board, self.row, self.col, self.value, side)
    }
}

/// Numbers the proposition "cell `(row, col)` of `board` holds value index `value`".
#[must_use]
pub const fn encode(
    board: usize,
    row: usize,
    col: usize,
    value: usize,
    side: usize,
) -> SudokuLiteral {
    let (board, row, col, value, side) = (
        board as u64,
        row as u64,
        col as u64,
        value as u64,
        side as u64,
    );
    SudokuLiteral(board * side * side * side + row * side * side + col * side + value + 1)
}

/// Inverse of [`encode`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn decode(literal: SudokuLiteral, side: usize) -> Proposition {
    let s = side as u64;
    let offset = literal.0 - 1;
    let within = offset % (s * s * s);
    Proposition {
        board: (offset / (s * s * s)) as usize,
        row: (within / (s * s)) as usize,
        col: (within / s % s) as usize,
        value: (within % s) as usize,
    }
}
