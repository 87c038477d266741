//! # sudoku-sat
//!
//! Command-line front end for solving and generating Sudoku tuples: several
//! `k*k`-sided boards of the same order, all valid Sudoku, where no two
//! boards hold the same value in the same cell.
//!
//! ```sh
//! # Solve one puzzle file, or every .csv file under a directory
//! sudoku-sat solve --path puzzles/pair.csv
//!
//! # Also write the formula with its clues as DIMACS next to the file
//! sudoku-sat solve --path puzzles/pair.csv --export-dimacs
//!
//! # Generate a pair of 9x9 boards with a unique joint solution
//! sudoku-sat generate --order 3 --boards 2 --output puzzle_output.csv --seed 7
//!
//! # Shell completions
//! sudoku-sat completions zsh
//! ```
//!
//! `-d/--debug` turns on debug logging; `RUST_LOG` overrides the filter.
//! `--verify` and `--stats` (both default `true`) check the result and
//! print the statistics table.

use crate::command_line::cli::{Cli, CliError, Commands, generate, solve_path};
use clap::{CommandFactory, Parser};
use sudoku_sat::sudoku::encoding::Size;
use sudoku_sat::sudoku::generator::GeneratorConfig;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures of the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logger(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(s) = std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if debug {
        builder.parse_filters("sudoku_sat=debug");
    } else {
        builder.parse_filters("sudoku_sat=warn");
    }
    // a logger may already be installed
    builder.try_init().ok();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Solve {
            path,
            order,
            export_dimacs,
            common,
        } => solve_path(&path, order, export_dimacs, &common),
        Commands::Generate {
            order,
            boards,
            output,
            removal_order,
            seed,
            common,
        } => {
            let config = GeneratorConfig {
                size: Size::new(order),
                boards,
                removal_order,
                seed,
            };
            generate(config, &output, &common)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.command.common().is_some_and(|c| c.debug));

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
