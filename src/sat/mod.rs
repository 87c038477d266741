#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod cardinality;
pub mod clause;
pub mod cnf;
pub mod dpll;
pub mod literal;
pub mod phase_saving;
pub mod solver;
pub mod trail;
pub mod watch;
