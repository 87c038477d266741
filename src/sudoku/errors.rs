use std::path::PathBuf;

/// Error for [`Board::from_rows`](crate::sudoku::board::Board::from_rows)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Number of rows is not a perfect square
    #[error("a board needs k*k rows for some k >= 1, found {0}")]
    NotSquare(usize),
    /// A row does not have one entry per column
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// A cell holds a value outside `0..=side`
    #[error("value {value} at ({row}, {col}) is out of range 0..={side}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: usize,
        side: usize,
    },
}

/// Errors from reading or writing puzzle files.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleIoError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}, column {column}: `{text}` is not a cell value")]
    InvalidCell {
        line: usize,
        column: usize,
        text: String,
    },
    #[error("line {line} has {found} values, expected {expected}")]
    RaggedLine {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("input holds {rows} rows, which is not a whole number of {side}-row boards")]
    IncompleteBoard { rows: usize, side: usize },
    #[error("input holds no rows")]
    Empty,
    #[error("puzzle has side {found}, expected {expected}")]
    OrderMismatch { found: usize, expected: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Error for [`solve_boards`](crate::sudoku::solver::solve_boards)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("no boards given")]
    NoBoards,
    #[error("boards have different sizes")]
    MixedSizes,
    #[error("the clues admit no solution")]
    Unsatisfiable,
    /// The encoding would need literals past `i32::MAX`
    #[error("{boards} board(s) of side {side} need more literals than DIMACS can number")]
    TooLarge { boards: usize, side: usize },
}

/// Error for [`Generator::generate`](crate::sudoku::generator::Generator::generate)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("puzzle order must be at least 1")]
    ZeroOrder,
    #[error("at least one board is needed")]
    NoBoards,
    /// The random seed clues could not be completed into a solution
    #[error("the seeded clues admit no solution")]
    Unsatisfiable,
    #[error(transparent)]
    Formula(#[from] SolveError),
}

/// Error for parsing a [`RemovalOrder`](crate::sudoku::generator::RemovalOrder)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown removal order `{0}`, expected alternating, sequential or random")]
pub struct ParseRemovalOrderError(pub String);
