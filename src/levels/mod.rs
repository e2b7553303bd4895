//! Level configuration and the progression sequencer.
//!
//! A level is one `(game, difficulty)` pairing played to completion. The
//! sequencer owns the ordered level list and the current position; it
//! advances one step at a time and never goes back. Walking past the last
//! level is the terminal state, reported explicitly as `None` from
//! `current_level`; the view layer decides what to render there.

use serde::{Deserialize, Serialize};

/// Which game a level plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Sliding tile puzzle.
    Puzzle,
    /// Memory-matching game.
    Memotest,
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameKind::Puzzle => write!(f, "Puzzle"),
            GameKind::Memotest => write!(f, "Memotest"),
        }
    }
}

/// One level: a game and its board side length.
///
/// Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelConfig {
    game: GameKind,
    difficulty: u8,
}

impl LevelConfig {
    /// Create a level configuration.
    #[must_use]
    pub const fn new(game: GameKind, difficulty: u8) -> Self {
        Self { game, difficulty }
    }

    /// The game this level plays.
    #[must_use]
    pub const fn game(self) -> GameKind {
        self.game
    }

    /// Board side length for this level.
    #[must_use]
    pub const fn difficulty(self) -> u8 {
        self.difficulty
    }
}

/// Ordered level list plus the current position.
///
/// ## Example
///
/// ```
/// use tile_games::levels::{GameKind, LevelSequencer};
///
/// let mut levels = LevelSequencer::campaign();
/// assert_eq!(levels.current_level().unwrap().game(), GameKind::Puzzle);
///
/// levels.advance();
/// assert_eq!(levels.current_level().unwrap().game(), GameKind::Memotest);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelSequencer {
    levels: Vec<LevelConfig>,
    index: usize,
}

impl LevelSequencer {
    /// Create a sequencer over the given levels, starting at the first.
    #[must_use]
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        Self { levels, index: 0 }
    }

    /// The default campaign: each game at 2x2, then each at 4x4.
    #[must_use]
    pub fn campaign() -> Self {
        Self::new(vec![
            LevelConfig::new(GameKind::Puzzle, 2),
            LevelConfig::new(GameKind::Memotest, 2),
            LevelConfig::new(GameKind::Puzzle, 4),
            LevelConfig::new(GameKind::Memotest, 4),
        ])
    }

    /// The level at the current position.
    ///
    /// `None` once the position has moved past the last level: the
    /// explicit "no more levels" signal callers must handle.
    #[must_use]
    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.levels.get(self.index)
    }

    /// Move to the next position, unconditionally.
    ///
    /// No bounds check: advancing at the last level enters the terminal
    /// state. The position never decreases.
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Current position (0-based).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check whether the sequencer holds no levels at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check whether the position is past the last level.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.index >= self.levels.len()
    }

    /// All configured levels, in play order.
    #[must_use]
    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }
}
