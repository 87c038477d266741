#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku and Sudoku-tuple solving and generation on top of the SAT engine.

pub mod board;
pub mod constraints;
pub mod encoding;
pub mod errors;
pub mod generator;
pub mod io;
pub mod overlap;
pub mod solver;

pub use board::Board;
pub use encoding::Size;
pub use generator::{Generator, GeneratorConfig, RemovalOrder};
