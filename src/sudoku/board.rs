use crate::sudoku::encoding::Size;
use crate::sudoku::errors::BoardError;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// An `S x S` grid of values in `0..=S`, where 0 marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: Size,
    /// Row-major values.
    cells: Vec<usize>,
}

/// A 4x4 board with two clues.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [[1, 0, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];

/// A classic 9x9 puzzle with a unique solution.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

impl Board {
    /// A board of `size` with every cell empty.
    #[must_use]
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            cells: vec![0; size.cells()],
        }
    }

    /// Builds a board from its rows.
    ///
    /// # Errors
    ///
    /// If the row count is not a perfect square, a row has the wrong length,
    /// or a value exceeds the side.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self, BoardError> {
        let side = rows.len();
        let size = Size::from_side(side).ok_or(BoardError::NotSquare(side))?;
        let mut cells = Vec::with_capacity(size.cells());

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != side {
                return Err(BoardError::RaggedRow {
                    row,
                    found: values.len(),
                    expected: side,
                });
            }
            if let Some(col) = values.iter().position(|&v| v > side) {
                return Err(BoardError::ValueOutOfRange {
                    row,
                    col,
                    value: values[col],
                    side,
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self { size, cells })
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of rows, columns and values.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.size.side()
    }

    /// The value at `(row, col)`, 0 if empty.
    ///
    /// # Panics
    ///
    /// If the cell is outside the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.cells[row * self.side() + col]
    }

    /// Writes `value` at `(row, col)`. 0 empties the cell.
    pub fn set(&mut self, row: usize, col: usize, value: usize) {
        debug_assert!(value <= self.side(), "value {value} out of range");
        let side = self.side();
        self.cells[row * side + col] = value;
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.set(row, col, 0);
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.side())
    }

    /// Filled cells as `(row, col, value)`, in row-major order.
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let side = self.side();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| (i / side, i % side, v))
    }

    /// Number of filled cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.cells.len() - self.clue_count()
    }

    /// Whether no cell is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Whether no row, column or block holds the same value twice.
    /// Empty cells are ignored.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.groups().all(|group| {
            let mut seen = FxHashSet::default();
            group.into_iter().filter(|&v| v != 0).all(|v| seen.insert(v))
        })
    }

    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        self.is_complete() && self.is_consistent()
    }

    /// Every row, column and block as a list of values.
    fn groups(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        let side = self.side();
        let k = self.size.block_size();

        let rows = (0..side).map(move |r| (0..side).map(|c| self.get(r, c)).collect::<Vec<_>>());
        let cols = (0..side).map(move |c| (0..side).map(|r| self.get(r, c)).collect::<Vec<_>>());
        let blocks = (0..side).map(move |b| {
            let (top, left) = (b / k * k, b % k * k);
            (0..side)
                .map(|i| self.get(top + i / k, left + i % k))
                .collect::<Vec<_>>()
        });

        rows.chain(cols).chain(blocks)
    }
}

impl<const N: usize> TryFrom<&[[usize; N]; N]> for Board {
    type Error = BoardError;

    fn try_from(rows: &[[usize; N]; N]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<&Board> for Vec<Vec<usize>> {
    fn from(board: &Board) -> Self {
        board.rows().map(<[usize]>::to_vec).collect()
    }
}

/// Bordered grid with block separators, values right aligned.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let side = self.side();
        let k = self.size.block_size();

        for (r, row) in self.rows().enumerate() {
            if r != 0 && r % k == 0 {
                writeln!(f, "{}", "-".repeat(4 * side + 3 * k + 1))?;
            }
            write!(f, "[  ")?;
            for (c, value) in row.iter().enumerate() {
                if c != 0 && c % k == 0 {
                    write!(f, "|  ")?;
                }
                write!(f, "{value:>2}  ")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED_FOUR: [[usize; 4]; 4] = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];

    #[test]
    fn test_from_rows_rejects_bad_geometry() {
        assert_eq!(
            Board::from_rows(&[vec![0usize; 3], vec![0; 3], vec![0; 3]]),
            Err(BoardError::NotSquare(3))
        );
        assert_eq!(
            Board::from_rows(&[vec![0usize; 4], vec![0; 4], vec![0; 3], vec![0; 4]]),
            Err(BoardError::RaggedRow {
                row: 2,
                found: 3,
                expected: 4
            })
        );
        assert_eq!(
            Board::from_rows(&[[0usize, 0, 0, 0], [0, 5, 0, 0], [0; 4], [0; 4]]),
            Err(BoardError::ValueOutOfRange {
                row: 1,
                col: 1,
                value: 5,
                side: 4
            })
        );
    }

    #[test]
    fn test_get_set_clear() {
        let mut board = Board::empty(Size::new(2));
        assert_eq!(board.blank_count(), 16);
        board.set(2, 3, 4);
        assert_eq!(board.get(2, 3), 4);
        assert_eq!(board.clues().collect::<Vec<_>>(), vec![(2, 3, 4)]);
        board.clear(2, 3);
        assert_eq!(board.clue_count(), 0);
    }

    #[test]
    fn test_valid_solution() {
        let board = Board::try_from(&SOLVED_FOUR).unwrap();
        assert!(board.is_complete());
        assert!(board.is_valid_solution());

        let mut broken = board.clone();
        broken.set(0, 0, 2);
        assert!(!broken.is_consistent());
        assert!(!broken.is_valid_solution());
    }

    #[test]
    fn test_consistency_ignores_blanks() {
        let board = Board::try_from(&EXAMPLE_NINE).unwrap();
        assert!(board.is_consistent());
        assert!(!board.is_complete());
        assert_eq!(board.clue_count(), 30);
    }

    #[test]
    fn test_block_duplicates_detected() {
        // rows and columns are fine, the top-left block holds 1 twice
        const LATIN: [[usize; 4]; 4] = [[1, 2, 3, 4], [2, 1, 4, 3], [3, 4, 1, 2], [4, 3, 2, 1]];
        let board = Board::try_from(&LATIN).unwrap();
        assert!(board.is_complete());
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_display() {
        let board = Board::try_from(&EXAMPLE_FOUR).unwrap();
        let expected = "\
[   1   0  |   0   0  ]
[   0   2  |   0   0  ]
-----------------------
[   0   0  |   0   0  ]
[   0   0  |   0   0  ]
";
        assert_eq!(board.to_string(), expected);
        assert_eq!(board.to_string(), board.clone().to_string());
    }

    #[test]
    fn test_rows_round_trip() {
        let board = Board::try_from(&EXAMPLE_NINE).unwrap();
        let rows: Vec<Vec<usize>> = (&board).into();
        assert_eq!(Board::from_rows(&rows), Ok(board));
    }
}
