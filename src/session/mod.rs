//! Session driver: sequencer, engines, images, and clock wired together.
//!
//! The sequencer says which level is current; the session instantiates the
//! matching engine (exhaustive dispatch on `GameKind`), feeds it the clock
//! time on every selection, and drains its delayed transitions on `tick`.
//! Each `AdvanceLevel` event advances the sequencer one step. Events fire
//! independently, so a board re-solved inside the win window advances
//! twice, exactly like two independent win timers. Past the last level the
//! session is `Finished`: selections and ticks become no-ops and the view
//! renders its terminal placeholder.

use crate::core::{Clock, EngineEvent, GameError, GameRng, ImageProvider};
use crate::levels::{GameKind, LevelConfig, LevelSequencer};
use crate::memotest::{MatchOutcome, MemotestEngine};
use crate::puzzle::{PuzzleEngine, SwapOutcome};

use serde::{Deserialize, Serialize};

/// The engine currently being played, if any.
#[derive(Clone, Debug)]
pub enum ActiveGame {
    /// A sliding tile puzzle level.
    Puzzle(PuzzleEngine),

    /// A memory-matching level.
    Memotest(MemotestEngine),

    /// No more levels.
    Finished,
}

/// Outcome of a session-level selection, tagged by the active game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Outcome from the puzzle engine.
    Puzzle(SwapOutcome),

    /// Outcome from the memotest engine.
    Memotest(MatchOutcome),

    /// The session is finished; nothing happened.
    Finished,
}

/// One play-through of a level sequence.
///
/// ## Example
///
/// ```
/// use tile_games::core::{ImageCatalog, ManualClock};
/// use tile_games::levels::LevelSequencer;
/// use tile_games::session::GameSession;
///
/// let session = GameSession::new(
///     LevelSequencer::campaign(),
///     ImageCatalog::stock(),
///     ManualClock::new(),
///     42,
/// )
/// .unwrap();
///
/// assert_eq!(session.level_index(), 0);
/// assert!(!session.is_finished());
/// ```
#[derive(Debug)]
pub struct GameSession<P, C> {
    sequencer: LevelSequencer,
    provider: P,
    clock: C,
    rng: GameRng,
    active: ActiveGame,
}

impl<P: ImageProvider, C: Clock> GameSession<P, C> {
    /// Create a session at the first level.
    ///
    /// Every level in the sequence is validated against the provider up
    /// front, so a campaign that would fail at level three fails here
    /// instead of mid-play. The seed fixes every board layout of the
    /// session.
    pub fn new(
        sequencer: LevelSequencer,
        provider: P,
        clock: C,
        seed: u64,
    ) -> Result<Self, GameError> {
        let mut rng = GameRng::new(seed);

        // The engine constructors own the validation rules; a dry build of
        // each level surfaces campaign-wide configuration errors now.
        for level in sequencer.levels() {
            Self::build_engine(Some(*level), &provider, &mut GameRng::new(0))?;
        }

        let active = Self::build_engine(sequencer.current_level().copied(), &provider, &mut rng)?;

        Ok(Self {
            sequencer,
            provider,
            clock,
            rng,
            active,
        })
    }

    /// The level being played, or `None` past the end.
    #[must_use]
    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.sequencer.current_level()
    }

    /// Position in the level sequence (0-based; may exceed the last index
    /// in the terminal state).
    #[must_use]
    pub fn level_index(&self) -> usize {
        self.sequencer.index()
    }

    /// Check whether the sequence is exhausted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.active, ActiveGame::Finished)
    }

    /// The active engine.
    #[must_use]
    pub fn active(&self) -> &ActiveGame {
        &self.active
    }

    /// The active engine, mutably, for game-specific view calls like
    /// `presentation()` or `is_flipped()`.
    pub fn active_mut(&mut self) -> &mut ActiveGame {
        &mut self.active
    }

    /// The session clock; tests advance a `ManualClock` through this.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Tries recorded by the active engine. Zero when finished.
    #[must_use]
    pub fn tries(&self) -> u32 {
        match &self.active {
            ActiveGame::Puzzle(engine) => engine.tries(),
            ActiveGame::Memotest(engine) => engine.tries(),
            ActiveGame::Finished => 0,
        }
    }

    /// Select a slot on the active engine at the clock's current time.
    ///
    /// A no-op returning [`SelectOutcome::Finished`] once the sequence is
    /// exhausted.
    pub fn select_slot(&mut self, slot: usize) -> Result<SelectOutcome, GameError> {
        let now = self.clock.now();

        match &mut self.active {
            ActiveGame::Puzzle(engine) => {
                Ok(SelectOutcome::Puzzle(engine.select_slot(slot, now)?))
            }
            ActiveGame::Memotest(engine) => {
                Ok(SelectOutcome::Memotest(engine.select_slot(slot, now)?))
            }
            ActiveGame::Finished => Ok(SelectOutcome::Finished),
        }
    }

    /// Reset the active engine: fresh shuffle, zero tries, stale timers.
    pub fn reset_level(&mut self) {
        match &mut self.active {
            ActiveGame::Puzzle(engine) => engine.reset(),
            ActiveGame::Memotest(engine) => engine.reset(),
            ActiveGame::Finished => {}
        }
    }

    /// Drain the active engine's due transitions and apply level advances.
    ///
    /// Each `AdvanceLevel` event moves the sequencer one step; the engine
    /// for the resulting level replaces the active one.
    pub fn tick(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();

        let events = match &mut self.active {
            ActiveGame::Puzzle(engine) => engine.tick(now),
            ActiveGame::Memotest(engine) => engine.tick(now),
            ActiveGame::Finished => Vec::new(),
        };

        if events.is_empty() {
            return Ok(());
        }

        for event in events {
            match event {
                EngineEvent::AdvanceLevel => self.sequencer.advance(),
            }
        }

        self.active = Self::build_engine(
            self.sequencer.current_level().copied(),
            &self.provider,
            &mut self.rng,
        )?;

        Ok(())
    }

    fn build_engine(
        level: Option<LevelConfig>,
        provider: &P,
        rng: &mut GameRng,
    ) -> Result<ActiveGame, GameError> {
        let Some(config) = level else {
            return Ok(ActiveGame::Finished);
        };

        let engine_rng = GameRng::new(rng.gen_seed());

        match config.game() {
            GameKind::Puzzle => Ok(ActiveGame::Puzzle(PuzzleEngine::new(
                config.difficulty(),
                provider,
                engine_rng,
            )?)),
            GameKind::Memotest => Ok(ActiveGame::Memotest(MemotestEngine::new(
                config.difficulty(),
                provider,
                engine_rng,
            )?)),
        }
    }
}
