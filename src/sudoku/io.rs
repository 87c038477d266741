//! Comma separated puzzle files.
//!
//! A file holds one or more boards of the same side `S`, each as `S`
//! consecutive rows of `S` comma separated values. Blank lines are ignored.

use crate::sudoku::board::Board;
use crate::sudoku::encoding::Size;
use crate::sudoku::errors::PuzzleIoError;
use itertools::Itertools;
use std::fs;
use std::path::Path;

/// # Errors
///
/// If a value is not a number, rows differ in length, the row count is not a
/// multiple of the side, or a board is invalid.
pub fn parse_boards(input: &str) -> Result<Vec<Board>, PuzzleIoError> {
    let mut rows: Vec<Vec<usize>> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .enumerate()
            .map(|(column, text)| {
                let text = text.trim();
                text.parse::<usize>().map_err(|_| PuzzleIoError::InvalidCell {
                    line: index + 1,
                    column: column + 1,
                    text: text.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(PuzzleIoError::RaggedLine {
                    line: index + 1,
                    found: row.len(),
                    expected: first.len(),
                });
            }
        }
        rows.push(row);
    }

    let side = rows.first().map(Vec::len).ok_or(PuzzleIoError::Empty)?;
    if rows.len() % side != 0 {
        return Err(PuzzleIoError::IncompleteBoard {
            rows: rows.len(),
            side,
        });
    }

    rows.chunks(side)
        .map(|group| Board::from_rows(group).map_err(PuzzleIoError::from))
        .collect()
}

/// # Errors
///
/// If the file cannot be read or does not parse.
pub fn read_boards(path: impl AsRef<Path>) -> Result<Vec<Board>, PuzzleIoError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| PuzzleIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_boards(&input)
}

/// Rows of all boards, one per line, board after board.
#[must_use]
pub fn format_boards(boards: &[Board]) -> String {
    boards
        .iter()
        .flat_map(Board::rows)
        .map(|row| format!("{}\n", row.iter().join(",")))
        .collect()
}

/// Replaces the content of `path` with `boards`.
///
/// # Errors
///
/// If the file cannot be written.
pub fn write_boards(path: impl AsRef<Path>, boards: &[Board]) -> Result<(), PuzzleIoError> {
    let path = path.as_ref();
    fs::write(path, format_boards(boards)).map_err(|source| PuzzleIoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks that every board has the given size.
///
/// # Errors
///
/// `PuzzleIoError::OrderMismatch` naming the first board of another size.
pub fn expect_size(boards: &[Board], size: Size) -> Result<(), PuzzleIoError> {
    match boards.iter().find(|b| b.size() != size) {
        Some(board) => Err(PuzzleIoError::OrderMismatch {
            found: board.side(),
            expected: size.side(),
        }),
        None => Ok(()),
    }
}
