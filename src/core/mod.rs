//! Core game types: players, cells, the board, and the random source.

pub mod board;
pub mod player;
pub mod rng;

pub use board::{BoardError, BoardState};
pub use player::{Cell, PerPlayer, Player};
pub use rng::SearchRng;
