//! Puzzle engine: lazy board ownership, win scheduling, reset.

use std::time::Duration;

use crate::core::{
    EngineEvent, GameError, GameRng, Generation, ImageDescriptor, ImageProvider, TimerQueue,
    WIN_ADVANCE_DELAY,
};

use super::board::{PuzzleBoard, PuzzleTileView, SwapOutcome};

/// Delayed transition owned by the puzzle engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PuzzleTransition {
    /// Win delay elapsed; surface an advance to the driver.
    Advance,
}

/// Sliding tile puzzle engine for one level.
///
/// The board is generated lazily on first access and exactly once per
/// generation: further accesses reuse it until `reset()` discards it.
/// Winning schedules a level advance after [`WIN_ADVANCE_DELAY`]; the event
/// is surfaced by `tick` and carries the generation token active at the
/// win, so a reset in the interim makes it a no-op.
///
/// ## Example
///
/// ```
/// use tile_games::core::{GameRng, ImageCatalog};
/// use tile_games::puzzle::PuzzleEngine;
///
/// let catalog = ImageCatalog::stock();
/// let mut engine = PuzzleEngine::new(4, &catalog, GameRng::new(42)).unwrap();
///
/// let rows = engine.presentation();
/// assert_eq!(rows.len(), 4);
/// assert_eq!(engine.tries(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleEngine {
    difficulty: u8,
    image: ImageDescriptor,
    rng: GameRng,
    board: Option<PuzzleBoard>,
    generation: Generation,
    timers: TimerQueue<PuzzleTransition>,
}

impl PuzzleEngine {
    /// Create an engine for a `difficulty × difficulty` board.
    ///
    /// The puzzle slices a single shared image, descriptor 0 of the
    /// provider. Fails if the provider is empty or the difficulty is below
    /// 2; configuration problems never surface mid-game.
    pub fn new(
        difficulty: u8,
        provider: &(impl ImageProvider + ?Sized),
        rng: GameRng,
    ) -> Result<Self, GameError> {
        if difficulty < 2 {
            return Err(GameError::InvalidDifficulty { difficulty });
        }

        let image = provider
            .get(0)
            .ok_or(GameError::NotEnoughImages {
                required: 1,
                available: provider.len(),
            })?
            .clone();

        Ok(Self {
            difficulty,
            image,
            rng,
            board: None,
            generation: Generation::default(),
            timers: TimerQueue::new(),
        })
    }

    /// Board side length.
    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Current generation token.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Swaps performed this generation. Zero before the first access.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.board.as_ref().map_or(0, PuzzleBoard::tries)
    }

    /// Check whether the board has been generated for this generation.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.board.is_some()
    }

    /// Pending delayed transitions, live or stale.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.timers.pending_count()
    }

    /// The board, generating it on first access.
    pub fn board(&mut self) -> &PuzzleBoard {
        self.ensure_board()
    }

    /// Tiles chunked into `difficulty` rows, generating the board on first
    /// access.
    pub fn presentation(&mut self) -> Vec<Vec<PuzzleTileView>> {
        self.ensure_board().rows()
    }

    /// Select the tile at `slot` at time `now`.
    ///
    /// Selecting the blank is a no-op; any other tile swaps with the blank
    /// and counts one try. A swap that solves the board schedules a level
    /// advance at `now + WIN_ADVANCE_DELAY` under the current generation.
    pub fn select_slot(&mut self, slot: usize, now: Duration) -> Result<SwapOutcome, GameError> {
        let generation = self.generation;

        let board = self.ensure_board();
        let (next, outcome) = board.select(slot)?;
        *board = next;

        if outcome == SwapOutcome::Solved {
            self.timers
                .schedule(now, WIN_ADVANCE_DELAY, generation, PuzzleTransition::Advance);
        }

        Ok(outcome)
    }

    /// Fire every delayed transition due at `now`.
    ///
    /// Transitions scheduled before a reset are dropped without firing.
    pub fn tick(&mut self, now: Duration) -> Vec<EngineEvent> {
        self.timers
            .fire_due(now, self.generation)
            .into_iter()
            .map(|transition| match transition {
                PuzzleTransition::Advance => EngineEvent::AdvanceLevel,
            })
            .collect()
    }

    /// Discard the board and invalidate pending transitions.
    ///
    /// Bumps the generation token; the next access regenerates a freshly
    /// shuffled board with `tries` back at zero. Queued timers stay until
    /// their fire time but no longer do anything.
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        self.board = None;
    }

    fn ensure_board(&mut self) -> &mut PuzzleBoard {
        let difficulty = self.difficulty;
        self.board
            .get_or_insert_with(|| PuzzleBoard::generate(difficulty, self.image.clone(), &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ImageDescriptor;
    use crate::puzzle::BLANK_HOME;

    fn images() -> Vec<ImageDescriptor> {
        vec![ImageDescriptor::new("shared", "https://example.com/a.jpg")]
    }

    fn engine(difficulty: u8, seed: u64) -> PuzzleEngine {
        PuzzleEngine::new(difficulty, images().as_slice(), GameRng::new(seed)).unwrap()
    }

    /// Solve the board by always selecting the tile that belongs on the
    /// blank's current slot. Selection sort over swaps. Boards that come
    /// out of the shuffle already solved get unsolved first so the win is
    /// always produced by a swap.
    fn solve(engine: &mut PuzzleEngine, now: Duration) {
        if engine.board().is_solved() {
            let blank_slot = engine
                .board()
                .homes()
                .position(|h| h == BLANK_HOME)
                .unwrap();
            let slots = engine.board().slot_count();
            engine.select_slot((blank_slot + 1) % slots, now).unwrap();
        }

        loop {
            if engine.board().is_solved() {
                return;
            }

            let homes: Vec<_> = engine.board().homes().collect();
            let blank_slot = homes.iter().position(|&h| h == BLANK_HOME).unwrap();

            // Tile that belongs where the blank sits; if the blank is
            // already home, park any misplaced tile on it first.
            let target = homes
                .iter()
                .position(|&h| h as usize == blank_slot && h != BLANK_HOME)
                .or_else(|| {
                    homes
                        .iter()
                        .enumerate()
                        .position(|(slot, &h)| h != BLANK_HOME && h as usize != slot)
                })
                .unwrap();

            engine.select_slot(target, now).unwrap();
        }
    }

    #[test]
    fn test_configuration_errors() {
        let err = PuzzleEngine::new(1, images().as_slice(), GameRng::new(0)).unwrap_err();
        assert_eq!(err, GameError::InvalidDifficulty { difficulty: 1 });

        let empty: Vec<ImageDescriptor> = Vec::new();
        let err = PuzzleEngine::new(2, empty.as_slice(), GameRng::new(0)).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughImages {
                required: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_board_generates_once() {
        let mut engine = engine(4, 42);
        assert!(!engine.is_generated());

        let first: Vec<_> = engine.board().homes().collect();
        let second: Vec<_> = engine.board().homes().collect();

        assert!(engine.is_generated());
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_regenerates_with_fresh_shuffle() {
        let mut engine = engine(4, 42);
        let before: Vec<_> = engine.board().homes().collect();

        engine.select_slot(0, Duration::ZERO).unwrap();
        engine.reset();

        assert!(!engine.is_generated());
        assert_eq!(engine.tries(), 0);
        assert_eq!(engine.generation(), Generation::new(1));

        // Next access reshuffles from the advanced RNG stream.
        let after: Vec<_> = engine.board().homes().collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_solve_schedules_advance_after_win_delay() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        solve(&mut engine, now);
        assert_eq!(engine.pending_transitions(), 1);

        // Before the delay: nothing fires.
        assert!(engine.tick(now + Duration::from_secs(2)).is_empty());

        // At the delay: the advance surfaces.
        let events = engine.tick(now + WIN_ADVANCE_DELAY);
        assert_eq!(events, vec![EngineEvent::AdvanceLevel]);
        assert!(engine.tick(now + WIN_ADVANCE_DELAY).is_empty());
    }

    #[test]
    fn test_reset_invalidates_pending_advance() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        solve(&mut engine, now);
        engine.reset();

        // The stale advance comes due but must not fire.
        let events = engine.tick(now + WIN_ADVANCE_DELAY);
        assert!(events.is_empty());
        assert_eq!(engine.pending_transitions(), 0);
    }

    #[test]
    fn test_two_engines_have_independent_generations() {
        let mut first = engine(2, 1);
        let mut second = engine(2, 2);
        let now = Duration::ZERO;

        solve(&mut first, now);
        solve(&mut second, now);

        // Resetting one engine must not cancel the other's pending win.
        first.reset();

        assert!(first.tick(now + WIN_ADVANCE_DELAY).is_empty());
        assert_eq!(
            second.tick(now + WIN_ADVANCE_DELAY),
            vec![EngineEvent::AdvanceLevel]
        );
    }

    #[test]
    fn test_tries_counts_only_swaps() {
        let mut engine = engine(2, 42);
        let homes: Vec<_> = engine.board().homes().collect();
        let blank_slot = homes.iter().position(|&h| h == BLANK_HOME).unwrap();
        let other_slot = (blank_slot + 1) % 4;

        engine.select_slot(blank_slot, Duration::ZERO).unwrap();
        assert_eq!(engine.tries(), 0);

        engine.select_slot(other_slot, Duration::ZERO).unwrap();
        assert_eq!(engine.tries(), 1);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut engine = engine(2, 42);
        let err = engine.select_slot(99, Duration::ZERO).unwrap_err();
        assert_eq!(err, GameError::SlotOutOfRange { slot: 99, slots: 4 });
    }

    #[test]
    fn test_same_seed_same_board() {
        let mut a = engine(4, 9);
        let mut b = engine(4, 9);

        assert_eq!(
            a.board().homes().collect::<Vec<_>>(),
            b.board().homes().collect::<Vec<_>>()
        );
    }
}
