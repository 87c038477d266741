#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_sat::sat::dpll::Dpll;
use sudoku_sat::sat::solver::SolutionStats;
use sudoku_sat::sudoku::errors::{GenerateError, PuzzleIoError, SolveError};
use sudoku_sat::sudoku::generator::{GeneratedPuzzle, Generator, GeneratorConfig, RemovalOrder};
use sudoku_sat::sudoku::io::{expect_size, read_boards, write_boards};
use sudoku_sat::sudoku::solver::{
    PuzzleFormula, has_unique_solution, solve_formula, verify_solution,
};
use sudoku_sat::sudoku::{Board, Size};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface of the application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-sat",
    version,
    about = "Solve and generate Sudoku tuples with a SAT solver"
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve the boards of a CSV file, or of every `.csv` file under a directory.
    Solve {
        /// Path to a puzzle file or a directory of puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Expected puzzle order k (boards of side k*k). Taken from the file if omitted.
        #[arg(short, long)]
        order: Option<usize>,

        /// Write the formula, clues included, to `<path>.cnf` in DIMACS format.
        #[arg(short, long, default_value_t = false)]
        export_dimacs: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a maximal puzzle tuple with a unique solution.
    Generate {
        /// Puzzle order k (boards of side k*k).
        #[arg(short, long, default_value_t = 3)]
        order: usize,

        /// Number of boards in the tuple.
        #[arg(short, long, default_value_t = 2)]
        boards: usize,

        /// Where the puzzle is written as CSV. Existing content is replaced.
        #[arg(long, default_value = "puzzle_output.csv")]
        output: PathBuf,

        /// Order in which clues are tested for removal: alternating, sequential or random.
        #[arg(long, default_value_t = RemovalOrder::Alternating)]
        removal_order: RemovalOrder,

        /// Seed for the random choices, for reproducible puzzles.
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    pub(crate) const fn common(&self) -> Option<&CommonOptions> {
        match self {
            Self::Solve { common, .. } | Self::Generate { common, .. } => Some(common),
            Self::Completions { .. } => None,
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the result: solved boards must be valid, generated puzzles uniquely solvable.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleIoError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("{0} is neither a file nor a directory")]
    NotFound(PathBuf),
    #[error("unable to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("verification failed: {0}")]
    Verification(String),
}

/// Size figures of a formula for the statistics table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProblemSize {
    pub boards: usize,
    pub variables: usize,
    pub clauses: usize,
    pub literals: usize,
    pub clues: usize,
}

impl ProblemSize {
    fn of(formula: &PuzzleFormula, boards: &[Board]) -> Self {
        Self {
            boards: formula.num_boards(),
            variables: formula.cnf.num_vars,
            clauses: formula.cnf.len(),
            literals: formula.cnf.num_literals(),
            clues: boards.iter().map(Board::clue_count).sum(),
        }
    }
}

/// Solves a single file, or every `.csv` file under a directory.
///
/// # Errors
///
/// If the path does not exist or a puzzle cannot be read or verified.
pub(crate) fn solve_path(
    path: &Path,
    order: Option<usize>,
    export_dimacs: bool,
    common: &CommonOptions,
) -> Result<(), CliError> {
    if path.is_file() {
        return solve_file(path, order, export_dimacs, common);
    }
    if !path.is_dir() {
        return Err(CliError::NotFound(path.to_path_buf()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "csv") {
            log::debug!("skipping {}", file_path.display());
            continue;
        }
        solve_file(file_path, order, export_dimacs, common)?;
    }
    Ok(())
}

/// Reads, solves and reports one puzzle file.
///
/// # Errors
///
/// If the file cannot be read, its size differs from `order`, the DIMACS
/// export fails, or the solution does not verify.
pub(crate) fn solve_file(
    path: &Path,
    order: Option<usize>,
    export_dimacs: bool,
    common: &CommonOptions,
) -> Result<(), CliError> {
    println!("Solving: {}", path.display());
    let time = Instant::now();

    let mut boards = read_boards(path)?;
    if let Some(order) = order {
        expect_size(&boards, Size::new(order))?;
    }
    print_boards("Puzzle", &boards);

    let formula = PuzzleFormula::build(&boards)?;
    if export_dimacs {
        let dimacs_path = PathBuf::from(format!("{}.cnf", path.display()));
        std::fs::write(&dimacs_path, formula.to_dimacs()).map_err(|source| CliError::Export {
            path: dimacs_path.clone(),
            source,
        })?;
        println!("DIMACS written to: {}", dimacs_path.display());
    }

    let problem = ProblemSize::of(&formula, &boards);
    let parse_time = time.elapsed();

    let time = Instant::now();
    let result = solve_formula::<Dpll>(formula, &mut boards);
    let elapsed = time.elapsed();

    let search = match result {
        Ok(search) => search,
        Err(SolveError::Unsatisfiable) => {
            println!("No solution found");
            if common.stats {
                print_stats(parse_time, elapsed, &problem, None);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_boards("Solution", &boards);

    if common.verify {
        let ok = verify_solution(&boards);
        println!("Verified: {ok}");
        if !ok {
            return Err(CliError::Verification(format!(
                "{} is not a valid solution",
                path.display()
            )));
        }
    }

    if common.stats {
        print_stats(parse_time, elapsed, &problem, Some(&search));
    }
    Ok(())
}

/// Generates a puzzle tuple, prints it and writes it to `output`.
///
/// # Errors
///
/// If generation fails, the output cannot be written, or the puzzle does not
/// verify.
pub(crate) fn generate(
    config: GeneratorConfig,
    output: &Path,
    common: &CommonOptions,
) -> Result<(), CliError> {
    let time = Instant::now();
    let generated = Generator::<Dpll>::new(config).generate()?;
    let elapsed = time.elapsed();

    print_boards("Sudoku", &generated.puzzle);
    save_generated(&generated, output, common.verify)?;

    if common.stats {
        let formula = PuzzleFormula::build(&generated.puzzle)?;
        let problem = ProblemSize::of(&formula, &generated.puzzle);
        print_stats(Duration::ZERO, elapsed, &problem, Some(&generated.stats));
    }
    Ok(())
}

/// Writes the puzzle to `output`, after checking it when `verify` is set. A
/// puzzle that fails the check leaves `output` untouched.
fn save_generated(
    generated: &GeneratedPuzzle,
    output: &Path,
    verify: bool,
) -> Result<(), CliError> {
    if verify {
        let unique = verify_solution(&generated.solution)
            && has_unique_solution::<Dpll>(&generated.puzzle)?;
        println!("Verified: {unique}");
        if !unique {
            return Err(CliError::Verification(
                "generated puzzle is not uniquely solvable".to_string(),
            ));
        }
    }

    write_boards(output, &generated.puzzle)?;
    println!("Puzzle written to: {}", output.display());
    Ok(())
}

fn print_boards(title: &str, boards: &[Board]) {
    for (i, board) in boards.iter().enumerate() {
        println!("The {title} {} board is:\n", i + 1);
        println!("{board}");
    }
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> (f64, f64) {
    if epoch::advance().is_err() {
        return (0.0, 0.0);
    }
    let to_mib = |bytes: usize| bytes as f64 / (1024.0 * 1024.0);
    (
        stats::allocated::read().map_or(0.0, to_mib),
        stats::resident::read().map_or(0.0, to_mib),
    )
}

/// Prints a summary of problem and search statistics.
///
/// `search` is `None` when the clues admit no solution.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    problem: &ProblemSize,
    search: Option<&SolutionStats>,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let (allocated, resident) = memory_usage();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Boards", problem.boards);
    stat_line("Variables", problem.variables);
    stat_line("Clauses", problem.clauses);
    stat_line("Literals", problem.literals);
    stat_line("Clues", problem.clues);

    if let Some(s) = search {
        println!("========================[ Search Statistics ]========================");
        stat_line("Solve calls", s.solve_calls);
        stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
        stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
        stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    }
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if search.is_some() {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}
