#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Generation of maximal puzzles for a tuple of boards.
//!
//! 1.  **Seed:** each value `1..=S` is written into a random empty cell of a
//!     random board.
//! 2.  **Complete:** the seeded tuple is solved once; the model is the
//!     solution of the final puzzle.
//! 3.  **Reduce:** every cell of the solution becomes a clue. In the chosen
//!     removal order, each clue is tested by solving under all remaining
//!     clues with this one negated. If that is unsatisfiable the other clues
//!     already force the value, and the clue is retired.
//!
//! The same engine answers every query of one run, so the clause database is
//! loaded only once.

use crate::sat::dpll::Dpll;
use crate::sat::solver::{IncrementalSolver, SolutionStats};
use crate::sudoku::board::Board;
use crate::sudoku::encoding::{Size, SudokuLiteral, encode};
use crate::sudoku::errors::{GenerateError, ParseRemovalOrderError};
use crate::sudoku::solver::{PuzzleFormula, apply_model};
use itertools::Itertools;
use log::{info, trace};
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::str::FromStr;

/// The order in which the clues of a completed tuple are tested for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RemovalOrder {
    /// Alternates between the front and the back of the tuple:
    /// `0, L-1, 1, L-2, ...`.
    #[default]
    Alternating,
    /// Cell by cell from the first board to the last.
    Sequential,
    /// A uniformly random permutation.
    Random,
}

impl RemovalOrder {
    /// The positions `0..len` in this order.
    pub fn indices(self, len: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        match self {
            Self::Alternating => {
                let middle = len.div_ceil(2);
                (0..middle).interleave((middle..len).rev()).collect()
            }
            Self::Sequential => (0..len).collect(),
            Self::Random => {
                let mut order: Vec<usize> = (0..len).collect();
                rng.shuffle(&mut order);
                order
            }
        }
    }
}

impl Display for RemovalOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Alternating => "alternating",
            Self::Sequential => "sequential",
            Self::Random => "random",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RemovalOrder {
    type Err = ParseRemovalOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alternating" => Ok(Self::Alternating),
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            _ => Err(ParseRemovalOrderError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub size: Size,
    /// Number of boards in the tuple.
    pub boards: usize,
    pub removal_order: RemovalOrder,
    /// Fixes the random choices. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            boards: 2,
            removal_order: RemovalOrder::default(),
            seed: None,
        }
    }
}

/// A filled cell of the completed tuple together with its value literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clue {
    pub board: usize,
    pub row: usize,
    pub col: usize,
    /// One based value.
    pub value: usize,
    pub literal: SudokuLiteral,
}

impl Display for Clue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "board {} ({}, {}) = {}",
            self.board, self.row, self.col, self.value
        )
    }
}

/// A clue position in the removal order. Retired slots keep their place but
/// no longer contribute an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueSlot {
    Active(Clue),
    Retired,
}

impl ClueSlot {
    #[must_use]
    pub const fn clue(&self) -> Option<&Clue> {
        match self {
            Self::Active(clue) => Some(clue),
            Self::Retired => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The maximal puzzle. Empty cells are 0.
    pub puzzle: Vec<Board>,
    /// The unique solution of `puzzle`.
    pub solution: Vec<Board>,
    /// The clues left in `puzzle`, in removal order.
    pub clues: Vec<Clue>,
    pub stats: SolutionStats,
}

#[derive(Debug, Clone)]
pub struct Generator<S: IncrementalSolver = Dpll> {
    config: GeneratorConfig,
    rng: fastrand::Rng,
    solver: PhantomData<S>,
}

impl<S: IncrementalSolver> Generator<S> {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self {
            config,
            rng,
            solver: PhantomData,
        }
    }

    /// Generates one maximal puzzle.
    ///
    /// # Errors
    ///
    /// `GenerateError::Unsatisfiable` if the random seed clues cannot be
    /// completed, as always happens with more boards than values.
    pub fn generate(&mut self) -> Result<GeneratedPuzzle, GenerateError> {
        if self.config.size.order() == 0 {
            return Err(GenerateError::ZeroOrder);
        }
        if self.config.boards == 0 {
            return Err(GenerateError::NoBoards);
        }

        let mut boards = self.seed_boards();
        let formula = PuzzleFormula::build(&boards)?;
        info!(
            "generating {} board(s) of {}, {} removal order",
            self.config.boards, self.config.size, self.config.removal_order
        );

        let mut solver = S::new(formula.cnf);
        if !solver.solve(&formula.assumptions) {
            solver.release();
            return Err(GenerateError::Unsatisfiable);
        }
        let Some(model) = solver.model() else {
            solver.release();
            return Err(GenerateError::Unsatisfiable);
        };
        apply_model(&mut boards, model);
        let solution = boards.clone();

        let mut slots = self.clue_slots(&boards);
        reduce(&mut solver, &mut boards, &mut slots);

        let clues: Vec<Clue> = slots.iter().filter_map(ClueSlot::clue).copied().collect();
        info!("kept {} of {} clues", clues.len(), slots.len());

        let stats = solver.stats();
        solver.release();

        Ok(GeneratedPuzzle {
            puzzle: boards,
            solution,
            clues,
            stats,
        })
    }

    fn seed_boards(&mut self) -> Vec<Board> {
        let size = self.config.size;
        let side = size.side();
        let mut boards = vec![Board::empty(size); self.config.boards];

        for value in 1..=side {
            loop {
                let board = self.rng.usize(..boards.len());
                let row = self.rng.usize(..side);
                let col = self.rng.usize(..side);
                if boards[board].get(row, col) == 0 {
                    boards[board].set(row, col, value);
                    break;
                }
            }
        }
        boards
    }

    /// One active slot per cell of the completed `boards`, in removal order.
    fn clue_slots(&mut self, boards: &[Board]) -> Vec<ClueSlot> {
        let side = self.config.size.side();
        let cells = side * side;

        self.config
            .removal_order
            .indices(boards.len() * cells, &mut self.rng)
            .into_iter()
            .map(|i| {
                let (board, row, col) = (i / cells, i % cells / side, i % side);
                let value = boards[board].get(row, col);
                ClueSlot::Active(Clue {
                    board,
                    row,
                    col,
                    value,
                    literal: encode(board, row, col, value - 1, side),
                })
            })
            .collect()
    }
}

/// Tests every active slot once, in order, and retires the clues that the
/// remaining ones force.
fn reduce<S: IncrementalSolver>(solver: &mut S, boards: &mut [Board], slots: &mut [ClueSlot]) {
    for i in 0..slots.len() {
        let ClueSlot::Active(clue) = slots[i] else {
            continue;
        };

        let assumptions: Vec<i32> = slots
            .iter()
            .enumerate()
            .filter_map(|(j, slot)| {
                slot.clue().map(|c| {
                    if i == j {
                        c.literal.negative()
                    } else {
                        c.literal.positive()
                    }
                })
            })
            .collect();

        if solver.solve(&assumptions) {
            trace!("keeping {clue}");
        } else {
            trace!("retiring {clue}");
            boards[clue.board].clear(clue.row, clue.col);
            slots[i] = ClueSlot::Retired;
        }
    }
}
