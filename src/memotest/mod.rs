//! Memory-matching game ("memotest").
//!
//! `difficulty × difficulty` face-down tiles, one pair id on exactly two
//! tiles each. Selecting a first tile reveals it; selecting a second
//! counts a try and compares: a match is discovered permanently and the
//! selection clears at once, a mismatch stays revealed until the hide
//! delay elapses. The level is won when every pair is discovered.
//!
//! `MemotestBoard` is the pure state (reducer-style `select`);
//! `MemotestEngine` adds lazy generation, the generation token, and the
//! hide/advance timers.

mod board;
mod engine;

pub use board::{MatchOutcome, MemotestBoard, MemotestTile, MemotestTileView, PairId, Selection};
pub use engine::MemotestEngine;
