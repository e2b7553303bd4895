//! Core building blocks shared by both game engines.
//!
//! Nothing in this module knows about puzzles or memotest boards; it
//! provides the collaborators the engines are built from:
//!
//! - `rng`: Deterministic shuffling
//! - `error`: Configuration and selection errors
//! - `schedule`: Generation tokens, timer queue, clocks
//! - `images`: Image descriptors and providers

pub mod error;
pub mod images;
pub mod rng;
pub mod schedule;

pub use error::GameError;
pub use images::{ImageCatalog, ImageDescriptor, ImageProvider};
pub use rng::GameRng;
pub use schedule::{
    Clock, EngineEvent, Generation, ManualClock, MonotonicClock, Scheduled, TimerQueue,
    MISMATCH_HIDE_DELAY, WIN_ADVANCE_DELAY,
};
