//! Memotest engine: lazy board ownership, hide/advance timers, reset.

use std::time::Duration;

use crate::core::{
    EngineEvent, GameError, GameRng, Generation, ImageDescriptor, ImageProvider, TimerQueue,
    MISMATCH_HIDE_DELAY, WIN_ADVANCE_DELAY,
};

use super::board::{MatchOutcome, MemotestBoard, MemotestTileView};

/// Delayed transition owned by the memotest engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemotestTransition {
    /// Mismatch delay elapsed; flip the revealed pair back over.
    HideMismatch,

    /// Win delay elapsed; surface an advance to the driver.
    Advance,
}

/// Memory-matching engine for one level.
///
/// Two timer classes run through the same generation-guarded queue: the
/// short mismatch-hide delay and the long win-advance delay. `reset()`
/// bumps the generation so both become no-ops if still pending.
///
/// ## Example
///
/// ```
/// use tile_games::core::{GameRng, ImageCatalog};
/// use tile_games::memotest::MemotestEngine;
///
/// let catalog = ImageCatalog::stock();
/// let mut engine = MemotestEngine::new(4, &catalog, GameRng::new(42)).unwrap();
///
/// assert_eq!(engine.board().pairs(), 8);
/// assert_eq!(engine.tries(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct MemotestEngine {
    difficulty: u8,
    images: Vec<ImageDescriptor>,
    rng: GameRng,
    board: Option<MemotestBoard>,
    generation: Generation,
    timers: TimerQueue<MemotestTransition>,
}

impl MemotestEngine {
    /// Create an engine for a `difficulty × difficulty` board.
    ///
    /// Requires an even tile count (`difficulty²`) and one provider image
    /// per pair, checked here so configuration problems never surface
    /// mid-game. Pair `p` shows the provider's descriptor `p`.
    pub fn new(
        difficulty: u8,
        provider: &(impl ImageProvider + ?Sized),
        rng: GameRng,
    ) -> Result<Self, GameError> {
        if difficulty < 2 {
            return Err(GameError::InvalidDifficulty { difficulty });
        }

        let slots = (difficulty as usize).pow(2);
        if slots % 2 != 0 {
            return Err(GameError::OddTileCount { difficulty });
        }

        let required = slots / 2;
        let images: Vec<_> = (0..required)
            .filter_map(|index| provider.get(index).cloned())
            .collect();
        if images.len() < required {
            return Err(GameError::NotEnoughImages {
                required,
                available: provider.len(),
            });
        }

        Ok(Self {
            difficulty,
            images,
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

    /// Pair comparisons attempted this generation. Zero before the first
    /// access.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.board.as_ref().map_or(0, MemotestBoard::tries)
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
    pub fn board(&mut self) -> &MemotestBoard {
        self.ensure_board()
    }

    /// Tiles chunked into `difficulty` rows, generating the board on first
    /// access.
    pub fn presentation(&mut self) -> Vec<Vec<MemotestTileView>> {
        self.ensure_board().rows()
    }

    /// Query whether the tile at `slot` is face-up, generating the board
    /// on first access. Never mutates selection state.
    pub fn is_flipped(&mut self, slot: usize) -> Result<bool, GameError> {
        self.ensure_board().is_flipped(slot)
    }

    /// Select the tile at `slot` at time `now`.
    ///
    /// A mismatch schedules a hide at `now + MISMATCH_HIDE_DELAY`; the
    /// match that discovers the final pair schedules a level advance at
    /// `now + WIN_ADVANCE_DELAY`. Both carry the current generation.
    pub fn select_slot(&mut self, slot: usize, now: Duration) -> Result<MatchOutcome, GameError> {
        let generation = self.generation;

        let board = self.ensure_board();
        let (next, outcome) = board.select(slot)?;
        let won = next.is_won();
        *board = next;

        match outcome {
            MatchOutcome::Mismatched => {
                self.timers.schedule(
                    now,
                    MISMATCH_HIDE_DELAY,
                    generation,
                    MemotestTransition::HideMismatch,
                );
            }
            MatchOutcome::Matched { .. } if won => {
                self.timers.schedule(
                    now,
                    WIN_ADVANCE_DELAY,
                    generation,
                    MemotestTransition::Advance,
                );
            }
            _ => {}
        }

        Ok(outcome)
    }

    /// Fire every delayed transition due at `now`.
    ///
    /// Hide transitions flip a still-revealed mismatch back over; advance
    /// transitions are handed to the driver. Stale transitions (scheduled
    /// before a reset) are dropped without firing.
    pub fn tick(&mut self, now: Duration) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        for transition in self.timers.fire_due(now, self.generation) {
            match transition {
                MemotestTransition::HideMismatch => {
                    if let Some(board) = self.board.as_mut() {
                        *board = board.conceal_mismatch();
                    }
                }
                MemotestTransition::Advance => events.push(EngineEvent::AdvanceLevel),
            }
        }

        events
    }

    /// Discard all selection, discovery, and layout state.
    ///
    /// Bumps the generation token; the next access regenerates a freshly
    /// shuffled layout with `tries` back at zero. Queued timers stay until
    /// their fire time but no longer do anything.
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        self.board = None;
    }

    fn ensure_board(&mut self) -> &mut MemotestBoard {
        let difficulty = self.difficulty;
        self.board
            .get_or_insert_with(|| MemotestBoard::generate(difficulty, &self.images, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memotest::{PairId, Selection};

    fn images(count: usize) -> Vec<ImageDescriptor> {
        (0..count)
            .map(|n| ImageDescriptor::new(format!("img-{}", n), format!("https://example.com/{}.jpg", n)))
            .collect()
    }

    fn engine(difficulty: u8, seed: u64) -> MemotestEngine {
        let pairs = (difficulty as usize).pow(2) / 2;
        MemotestEngine::new(difficulty, images(pairs).as_slice(), GameRng::new(seed)).unwrap()
    }

    /// Slots of both tiles of `pair` on the engine's board.
    fn slots_of(engine: &mut MemotestEngine, pair: PairId) -> (usize, usize) {
        let board = engine.board();
        let slots: Vec<_> = (0..board.slot_count())
            .filter(|&slot| board.tile(slot).unwrap().pair == pair)
            .collect();
        (slots[0], slots[1])
    }

    /// Discover every pair at time `now`.
    fn win(engine: &mut MemotestEngine, now: Duration) {
        for pair in 0..engine.board().pairs() as u16 {
            let (a, b) = slots_of(engine, PairId::new(pair));
            engine.select_slot(a, now).unwrap();
            engine.select_slot(b, now).unwrap();
        }
        assert!(engine.board().is_won());
    }

    #[test]
    fn test_configuration_errors() {
        // 3x3 = 9 tiles: unpairable
        let err = MemotestEngine::new(3, images(8).as_slice(), GameRng::new(0)).unwrap_err();
        assert_eq!(err, GameError::OddTileCount { difficulty: 3 });

        // 4x4 needs 8 pairs; provider has 3
        let err = MemotestEngine::new(4, images(3).as_slice(), GameRng::new(0)).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughImages {
                required: 8,
                available: 3
            }
        );

        let err = MemotestEngine::new(0, images(8).as_slice(), GameRng::new(0)).unwrap_err();
        assert_eq!(err, GameError::InvalidDifficulty { difficulty: 0 });
    }

    #[test]
    fn test_mismatch_hides_after_delay() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        let (a, _) = slots_of(&mut engine, PairId::new(0));
        let (c, _) = slots_of(&mut engine, PairId::new(1));

        engine.select_slot(a, now).unwrap();
        let outcome = engine.select_slot(c, now).unwrap();
        assert_eq!(outcome, MatchOutcome::Mismatched);
        assert!(engine.is_flipped(a).unwrap());
        assert!(engine.is_flipped(c).unwrap());

        // Before the hide delay both stay revealed.
        engine.tick(now + Duration::from_millis(500));
        assert!(engine.is_flipped(a).unwrap());

        // After it, both flip back over.
        engine.tick(now + MISMATCH_HIDE_DELAY);
        assert!(!engine.is_flipped(a).unwrap());
        assert!(!engine.is_flipped(c).unwrap());
        assert_eq!(engine.board().selection(), Selection::Empty);
    }

    #[test]
    fn test_win_schedules_advance() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        win(&mut engine, now);
        assert_eq!(engine.pending_transitions(), 1);

        assert!(engine.tick(now + Duration::from_secs(2)).is_empty());
        assert_eq!(
            engine.tick(now + WIN_ADVANCE_DELAY),
            vec![EngineEvent::AdvanceLevel]
        );
    }

    #[test]
    fn test_reset_clears_everything_and_invalidates_timers() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        win(&mut engine, now);
        engine.reset();

        assert_eq!(engine.tries(), 0);
        assert!(!engine.is_generated());
        assert_eq!(engine.generation(), Generation::new(1));

        // The stale advance must not fire.
        assert!(engine.tick(now + WIN_ADVANCE_DELAY).is_empty());

        // Fresh board: nothing discovered.
        assert!(engine.board().discovered().is_empty());
    }

    #[test]
    fn test_stale_hide_does_not_touch_new_board() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        let (a, _) = slots_of(&mut engine, PairId::new(0));
        let (c, _) = slots_of(&mut engine, PairId::new(1));
        engine.select_slot(a, now).unwrap();
        engine.select_slot(c, now).unwrap();

        engine.reset();

        // Reveal a first tile on the regenerated board, then let the stale
        // hide timer come due: the new selection must survive.
        let (a2, _) = slots_of(&mut engine, PairId::new(0));
        engine.select_slot(a2, now + Duration::from_millis(600)).unwrap();

        engine.tick(now + MISMATCH_HIDE_DELAY);
        assert_eq!(engine.board().selection(), Selection::One { first: a2 });
    }

    #[test]
    fn test_tries_increment_on_comparisons_only() {
        let mut engine = engine(2, 42);
        let now = Duration::ZERO;

        let (a, b) = slots_of(&mut engine, PairId::new(0));

        engine.select_slot(a, now).unwrap();
        assert_eq!(engine.tries(), 0);

        engine.select_slot(b, now).unwrap();
        assert_eq!(engine.tries(), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = engine(4, 9);
        let mut b = engine(4, 9);

        let layout_a: Vec<_> = (0..16).map(|s| a.board().tile(s).unwrap().pair).collect();
        let layout_b: Vec<_> = (0..16).map(|s| b.board().tile(s).unwrap().pair).collect();

        assert_eq!(layout_a, layout_b);
    }
}
