//! Win detection for Connect Four.
//!
//! `BoardState::outcome` delegates here. The scanner slides a four-cell
//! window along vertical, horizontal and both diagonal lines.

pub mod outcome;

pub use outcome::{Outcome, CONNECT};
