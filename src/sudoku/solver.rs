use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use crate::sat::solver::{IncrementalSolver, SolutionStats};
use crate::sudoku::board::Board;
use crate::sudoku::constraints::BoardConstraints;
use crate::sudoku::encoding::{MAX_LITERAL, Size, SudokuLiteral, decode};
use crate::sudoku::errors::SolveError;
use crate::sudoku::overlap::overlap_clauses;
use log::info;

/// The full formula of a board tuple: every board's clauses, the overlap
/// clauses, and the clue assumptions of every board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleFormula {
    pub cnf: Cnf,
    pub assumptions: Vec<i32>,
    size: Size,
    boards: usize,
}

impl PuzzleFormula {
    /// # Errors
    ///
    /// If `boards` is empty, the boards differ in size, or their literals
    /// would not fit a DIMACS `i32`.
    pub fn build(boards: &[Board]) -> Result<Self, SolveError> {
        let size = common_size(boards)?;
        let num_vars = literal_count(size, boards.len())?;
        let mut clauses = Vec::new();
        let mut assumptions = Vec::new();

        for (id, board) in boards.iter().enumerate() {
            let (board_clauses, board_assumptions) = BoardConstraints::build(board, id).into_parts();
            clauses.extend(board_clauses);
            assumptions.extend(board_assumptions);
        }
        clauses.extend(overlap_clauses(size, boards.len()));

        let mut cnf = Cnf::new(clauses);
        cnf.num_vars = num_vars;

        Ok(Self {
            cnf,
            assumptions,
            size,
            boards: boards.len(),
        })
    }

    #[must_use]
    pub const fn num_boards(&self) -> usize {
        self.boards
    }

    /// The formula in DIMACS form with the clues as unit clauses, so that it
    /// can be handed to any standalone solver.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut cnf = self.cnf.clone();
        cnf.extend(self.assumptions.iter().map(|&lit| vec![lit]));
        cnf.to_string()
    }
}

fn common_size(boards: &[Board]) -> Result<Size, SolveError> {
    let first = boards.first().ok_or(SolveError::NoBoards)?;
    if boards.iter().any(|b| b.size() != first.size()) {
        return Err(SolveError::MixedSizes);
    }
    Ok(first.size())
}

fn literal_count(size: Size, boards: usize) -> Result<usize, SolveError> {
    size.literals_per_board()
        .checked_mul(boards)
        .filter(|&n| n as u64 <= MAX_LITERAL)
        .ok_or(SolveError::TooLarge {
            boards,
            side: size.side(),
        })
}

/// Writes every positive literal of `model` into its board.
pub fn apply_model(boards: &mut [Board], model: &Solutions) {
    let Some(side) = boards.first().map(Board::side) else {
        return;
    };

    for literal in model.iter().copied().filter_map(SudokuLiteral::from_dimacs) {
        let p = decode(literal, side);
        if let Some(board) = boards.get_mut(p.board) {
            board.set(p.row, p.col, p.value + 1);
        }
    }
}

/// Solves the tuple in place.
///
/// # Errors
///
/// `SolveError::Unsatisfiable` if the clues admit no solution, in which case
/// the boards are left untouched.
pub fn solve_boards<S: IncrementalSolver>(boards: &mut [Board]) -> Result<SolutionStats, SolveError> {
    let formula = PuzzleFormula::build(boards)?;
    solve_formula::<S>(formula, boards)
}

/// Like [`solve_boards`], for a formula that has already been built from `boards`.
///
/// # Errors
///
/// `SolveError::Unsatisfiable` if the clues admit no solution.
pub fn solve_formula<S: IncrementalSolver>(
    formula: PuzzleFormula,
    boards: &mut [Board],
) -> Result<SolutionStats, SolveError> {
    info!(
        "solving {} board(s) of {}: {} variables, {} clauses, {} assumptions",
        formula.boards,
        formula.size,
        formula.cnf.num_vars,
        formula.cnf.len(),
        formula.assumptions.len()
    );

    let mut solver = S::new(formula.cnf);
    let outcome = if solver.solve(&formula.assumptions) {
        solver.model().map_or(Err(SolveError::Unsatisfiable), |model| {
            apply_model(boards, model);
            Ok(solver.stats())
        })
    } else {
        Err(SolveError::Unsatisfiable)
    };

    solver.release();
    outcome
}

/// Whether every board is a complete valid grid and no two boards share a
/// value in the same cell.
#[must_use]
pub fn verify_solution(boards: &[Board]) -> bool {
    if !boards.iter().all(Board::is_valid_solution) {
        return false;
    }
    if common_size(boards).is_err() {
        return false;
    }

    let side = boards[0].side();
    (0..side).all(|row| {
        (0..side).all(|col| {
            boards.iter().enumerate().all(|(i, a)| {
                boards[i + 1..]
                    .iter()
                    .all(|b| a.get(row, col) != b.get(row, col))
            })
        })
    })
}

/// Whether the clues of `boards` determine exactly one solution.
///
/// Finds a solution, forbids it with one extra clause, and checks that the
/// formula becomes unsatisfiable.
///
/// # Errors
///
/// If `boards` is empty or the boards differ in size.
pub fn has_unique_solution<S: IncrementalSolver>(boards: &[Board]) -> Result<bool, SolveError> {
    let formula = PuzzleFormula::build(boards)?;
    let mut solver = S::new(formula.cnf);

    if !solver.solve(&formula.assumptions) {
        solver.release();
        return Ok(false);
    }

    let blocking: Vec<i32> = solver
        .model()
        .map(|model| model.iter().filter(|&&lit| lit > 0).map(|&lit| -lit).collect())
        .unwrap_or_default();
    solver.add_clause(&blocking);

    let unique = !solver.solve(&formula.assumptions);
    solver.release();
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::dpll::Dpll;
    use crate::sudoku::board::{EXAMPLE_FOUR, EXAMPLE_NINE};

    #[test]
    fn test_solve_four_with_two_clues() {
        let mut boards = vec![Board::try_from(&EXAMPLE_FOUR).unwrap()];
        let stats = solve_boards::<Dpll>(&mut boards).unwrap();

        let board = &boards[0];
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(1, 1), 2);
        assert!(board.is_valid_solution());
        assert_eq!(stats.solve_calls, 1);
    }

    #[test]
    fn test_solve_nine() {
        let mut boards = vec![Board::try_from(&EXAMPLE_NINE).unwrap()];
        solve_boards::<Dpll>(&mut boards).unwrap();

        let first_row: Vec<usize> = boards[0].rows().next().unwrap().to_vec();
        assert_eq!(first_row, vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
        assert!(verify_solution(&boards));
    }

    #[test]
    fn test_solve_empty_pair() {
        let size = Size::new(2);
        let mut boards = vec![Board::empty(size), Board::empty(size)];
        solve_boards::<Dpll>(&mut boards).unwrap();
        assert!(verify_solution(&boards));
    }

    #[test]
    fn test_shared_clue_is_unsatisfiable() {
        let mut board = Board::empty(Size::new(2));
        board.set(0, 0, 1);
        let mut boards = vec![board.clone(), board.clone()];

        assert_eq!(
            solve_boards::<Dpll>(&mut boards),
            Err(SolveError::Unsatisfiable)
        );
        assert_eq!(boards, vec![board.clone(), board]);
    }

    #[test]
    fn test_contradicting_clues() {
        let mut board = Board::empty(Size::new(2));
        board.set(0, 0, 3);
        board.set(0, 3, 3);
        assert_eq!(
            solve_boards::<Dpll>(&mut [board]),
            Err(SolveError::Unsatisfiable)
        );
    }

    #[test]
    fn test_geometry_errors() {
        assert_eq!(solve_boards::<Dpll>(&mut []), Err(SolveError::NoBoards));
        let mut boards = vec![Board::empty(Size::new(2)), Board::empty(Size::new(3))];
        assert_eq!(
            solve_boards::<Dpll>(&mut boards),
            Err(SolveError::MixedSizes)
        );
    }

    #[test]
    fn test_literals_must_fit_dimacs() {
        // order 36: one board already needs 1296^3 > i32::MAX literals
        let result = PuzzleFormula::build(&[Board::empty(Size::new(36))]);
        assert_eq!(
            result,
            Err(SolveError::TooLarge {
                boards: 1,
                side: 1296
            })
        );

        // order 35 fits for one board but not for two
        let big = Size::new(35);
        assert!(literal_count(big, 1).is_ok());
        assert_eq!(
            PuzzleFormula::build(&[Board::empty(big), Board::empty(big)]),
            Err(SolveError::TooLarge {
                boards: 2,
                side: 1225
            })
        );
    }

    #[test]
    fn test_formula_shape() {
        let size = Size::new(2);
        let boards = vec![Board::try_from(&EXAMPLE_FOUR).unwrap(), Board::empty(size)];
        let formula = PuzzleFormula::build(&boards).unwrap();

        assert_eq!(formula.cnf.num_vars, 128);
        assert_eq!(formula.cnf.len(), 2 * 448 + 64);
        assert_eq!(formula.assumptions.len(), 8);
        assert_eq!(formula.num_boards(), 2);

        let dimacs = formula.to_dimacs();
        assert!(dimacs.starts_with("p cnf 128 968\n"));
        assert!(dimacs.ends_with("1 0\n-2 0\n-3 0\n-4 0\n-21 0\n22 0\n-23 0\n-24 0\n"));
    }

    #[test]
    fn test_apply_model_ignores_negative_literals() {
        let size = Size::new(2);
        let mut boards = vec![Board::empty(size), Board::empty(size)];
        apply_model(&mut boards, &vec![-1, 2, -3, 0, 65 + 4 * 4 + 3]);
        assert_eq!(boards[0].get(0, 0), 2);
        assert_eq!(boards[1].get(1, 0), 4);
        assert_eq!(boards[0].clue_count() + boards[1].clue_count(), 2);
    }

    #[test]
    fn test_verify_solution_checks_overlap() {
        const A: [[usize; 4]; 4] = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];
        const B: [[usize; 4]; 4] = [[2, 1, 4, 3], [4, 3, 2, 1], [1, 2, 3, 4], [3, 4, 1, 2]];
        let a = Board::try_from(&A).unwrap();
        let b = Board::try_from(&B).unwrap();

        assert!(verify_solution(&[a.clone(), b]));
        assert!(!verify_solution(&[a.clone(), a]));
    }

    #[test]
    fn test_uniqueness() {
        let nine = Board::try_from(&EXAMPLE_NINE).unwrap();
        assert_eq!(has_unique_solution::<Dpll>(&[nine]), Ok(true));

        let empty = Board::empty(Size::new(2));
        assert_eq!(has_unique_solution::<Dpll>(&[empty]), Ok(false));

        let mut clash = Board::empty(Size::new(2));
        clash.set(0, 0, 1);
        clash.set(0, 1, 1);
        assert_eq!(has_unique_solution::<Dpll>(&[clash]), Ok(false));
    }
}
