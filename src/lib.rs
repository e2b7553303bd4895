//! # tile-games
//!
//! Game-state core for a level-based mini-game application: a level
//! sequencer and two per-level engines, a sliding tile puzzle and a
//! memory-matching game ("memotest"), played across a campaign of
//! increasing difficulty.
//!
//! ## Design Principles
//!
//! 1. **Explicit owned state**: Each engine is a plain value the view layer
//!    holds by reference. No shared ambient context, no globals.
//!
//! 2. **Reducer-style boards**: Board operations take the current state
//!    snapshot and return the next one. Backed by `im` persistent
//!    collections so snapshots are O(1) to produce.
//!
//! 3. **Token-guarded transitions**: Delayed transitions (mismatch hide,
//!    win advance) carry the generation token active when they were
//!    scheduled. A `reset()` bumps the token; stale timers become no-ops
//!    when they fire instead of resurrecting cleared state.
//!
//! 4. **Deterministic by seed**: All randomness flows through a seeded
//!    ChaCha8 RNG. Same seed, same boards.
//!
//! ## Modules
//!
//! - `core`: RNG, errors, scheduling primitives, image resources
//! - `levels`: Level configuration and the progression sequencer
//! - `puzzle`: Sliding tile puzzle engine
//! - `memotest`: Memory-matching engine
//! - `session`: Driver wiring sequencer, engines, images, and clock

pub mod core;
pub mod levels;
pub mod memotest;
pub mod puzzle;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, EngineEvent, GameError, GameRng, Generation, ImageCatalog, ImageDescriptor,
    ImageProvider, ManualClock, MonotonicClock, Scheduled, TimerQueue, MISMATCH_HIDE_DELAY,
    WIN_ADVANCE_DELAY,
};

pub use crate::levels::{GameKind, LevelConfig, LevelSequencer};

pub use crate::puzzle::{PuzzleBoard, PuzzleEngine, PuzzleTileView, SpriteStyle, SwapOutcome};

pub use crate::memotest::{
    MatchOutcome, MemotestBoard, MemotestEngine, MemotestTileView, PairId, Selection,
};

pub use crate::session::{ActiveGame, GameSession, SelectOutcome};
