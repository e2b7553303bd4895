//! Sliding tile puzzle.
//!
//! One shared image is sliced into `difficulty × difficulty` tiles and the
//! slice order is shuffled across the board. The tile whose home position
//! is 0 is the blank: it renders no image, and clicking any other tile
//! swaps that tile with the blank, deliberately unconstrained by
//! adjacency, unlike the classic 15-puzzle. The board is solved when every
//! tile sits on its home position.
//!
//! `PuzzleBoard` is the pure state (reducer-style: `select` returns the
//! next state); `PuzzleEngine` owns a board plus the lazy generation,
//! generation token, and win-advance timer.

mod board;
mod engine;

pub use board::{PuzzleBoard, PuzzleTile, PuzzleTileView, SpriteStyle, SwapOutcome, BLANK_HOME};
pub use engine::PuzzleEngine;
