//! Error types for engine configuration and selection.
//!
//! Configuration problems (bad difficulty, short image pool) surface from
//! engine constructors, never mid-game. Selection problems surface from
//! the offending call before any state is touched, so no error leaves a
//! board half-mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors reported by the game engines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    /// Board side length below the 2x2 minimum.
    InvalidDifficulty { difficulty: u8 },

    /// Memotest board with an odd number of tiles; `difficulty²` must be
    /// even so every tile has a partner.
    OddTileCount { difficulty: u8 },

    /// Image provider holds fewer descriptors than the engine requires
    /// (one for the puzzle, one per pair for the memotest).
    NotEnoughImages { required: usize, available: usize },

    /// Selected slot outside `0..slots`.
    SlotOutOfRange { slot: usize, slots: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDifficulty { difficulty } => {
                write!(f, "difficulty {} is below the 2x2 minimum", difficulty)
            }
            GameError::OddTileCount { difficulty } => {
                write!(
                    f,
                    "difficulty {} yields {} tiles, which cannot be paired",
                    difficulty,
                    (*difficulty as usize).pow(2)
                )
            }
            GameError::NotEnoughImages {
                required,
                available,
            } => {
                write!(
                    f,
                    "image provider has {} descriptors but {} are required",
                    available, required
                )
            }
            GameError::SlotOutOfRange { slot, slots } => {
                write!(f, "slot {} is out of range for a board of {} slots", slot, slots)
            }
        }
    }
}

impl std::error::Error for GameError {}
