//! # Sokoban A* solver
//!
//! Finds a shortest sequence of player moves that pushes every box onto a
//! target. Steps and pushes each cost one move.
//!
//! ## Modules
//! - `game`: board cells, directions, positions and the `Board` snapshot.
//! - `heuristic`: admissible move estimates (`ManhattanHeuristic`, `NullHeuristic`).
//! - `deadlocks`: corner deadlock detection for pushed boxes.
//! - `state`: search states, their duplicate-detection keys and successor generation.
//! - `solver`: the A* driver and its result types.
//! - `levels`: loading XSB level collections.

pub mod deadlocks;
pub mod game;
pub mod heuristic;
pub mod levels;
pub mod pqueue;
pub mod solver;
pub mod state;
pub mod zobrist;
