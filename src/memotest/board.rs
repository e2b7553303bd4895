//! Memotest board state and the selection state machine.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, ImageDescriptor};

/// Identifier shared by exactly two tiles on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId(pub u16);

impl PairId {
    /// Create a new pair id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// One face-down tile. Its slot is its index in the board's tile sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemotestTile {
    /// The pair this tile belongs to.
    pub pair: PairId,

    /// Image shown while the tile is flipped.
    pub image: ImageDescriptor,
}

/// Selection state machine over tile picks.
///
/// `Comparing` is only held after a mismatch, while both tiles stay
/// revealed waiting for the hide delay; a match clears back to `Empty`
/// synchronously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// No tile pending.
    #[default]
    Empty,

    /// One tile revealed, waiting for its candidate partner.
    One {
        /// Slot of the revealed tile.
        first: usize,
    },

    /// Two mismatched tiles revealed until the hide delay fires.
    Comparing {
        /// Slot picked first.
        first: usize,
        /// Slot picked second.
        second: usize,
    },
}

/// Result of a `select` on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Selection not acted on: a mismatch is still revealed, or the slot
    /// is already face-up.
    Ignored,

    /// First tile of a pair attempt revealed.
    Revealed,

    /// Second tile matched the first; the pair is discovered for good.
    Matched {
        /// The discovered pair.
        pair: PairId,
    },

    /// Second tile did not match; both stay revealed until hidden.
    Mismatched,
}

/// Memotest state: tile layout, selection, discovered pairs, tries.
///
/// Reducer-style like the puzzle board: `select` and `conceal_mismatch`
/// return the next state. Discovered pairs only ever grow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemotestBoard {
    difficulty: u8,
    tiles: Vector<MemotestTile>,
    selection: Selection,
    discovered: ImHashSet<PairId>,
    tries: u32,
}

impl MemotestBoard {
    /// Generate a freshly shuffled board.
    ///
    /// `images[p]` is the face of pair `p`; callers validate difficulty,
    /// parity, and image count (engine constructors do).
    #[must_use]
    pub fn generate(difficulty: u8, images: &[ImageDescriptor], rng: &mut GameRng) -> Self {
        let slots = (difficulty as usize).pow(2);
        debug_assert!(slots % 2 == 0, "memotest boards need an even tile count");
        debug_assert!(images.len() >= slots / 2, "one image per pair required");

        let mut pair_ids = Vec::with_capacity(slots);
        for pair in 0..(slots / 2) as u16 {
            pair_ids.push(pair);
            pair_ids.push(pair);
        }

        let tiles = rng
            .shuffled(pair_ids)
            .into_iter()
            .map(|pair| MemotestTile {
                pair: PairId::new(pair),
                image: images[pair as usize].clone(),
            })
            .collect();

        Self {
            difficulty,
            tiles,
            selection: Selection::Empty,
            discovered: ImHashSet::new(),
            tries: 0,
        }
    }

    /// Board side length.
    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Number of slots (`difficulty²`).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Pair comparisons attempted so far.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Current selection state.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Pairs discovered so far.
    #[must_use]
    pub fn discovered(&self) -> &ImHashSet<PairId> {
        &self.discovered
    }

    /// The tile at `slot`, if in range.
    #[must_use]
    pub fn tile(&self, slot: usize) -> Option<&MemotestTile> {
        self.tiles.get(slot)
    }

    /// Check whether every pair has been discovered.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.discovered.len() == self.pairs()
    }

    /// Pure query: is the tile at `slot` currently face-up?
    ///
    /// True for the selected slot(s) and for every tile whose pair is
    /// discovered.
    pub fn is_flipped(&self, slot: usize) -> Result<bool, GameError> {
        let tile = self.tile(slot).ok_or(GameError::SlotOutOfRange {
            slot,
            slots: self.slot_count(),
        })?;

        let selected = match self.selection {
            Selection::Empty => false,
            Selection::One { first } => slot == first,
            Selection::Comparing { first, second } => slot == first || slot == second,
        };

        Ok(selected || self.discovered.contains(&tile.pair))
    }

    /// Apply a selection: the reducer for this board.
    ///
    /// Face-up tiles (selected or discovered) and any selection made while
    /// a mismatch is still revealed are ignored. A first pick reveals; a
    /// second pick counts a try and either discovers the pair
    /// (synchronously clearing the selection) or leaves both revealed for
    /// the hide delay. Fails before touching anything if `slot` is out of
    /// range.
    pub fn select(&self, slot: usize) -> Result<(Self, MatchOutcome), GameError> {
        if self.is_flipped(slot)? {
            return Ok((self.clone(), MatchOutcome::Ignored));
        }

        match self.selection {
            Selection::Comparing { .. } => Ok((self.clone(), MatchOutcome::Ignored)),

            Selection::Empty => {
                let mut next = self.clone();
                next.selection = Selection::One { first: slot };
                Ok((next, MatchOutcome::Revealed))
            }

            Selection::One { first } => {
                let mut next = self.clone();
                next.tries += 1;

                let first_pair = self.tiles[first].pair;
                let second_pair = self.tiles[slot].pair;

                if first_pair == second_pair {
                    next.discovered.insert(first_pair);
                    next.selection = Selection::Empty;
                    Ok((next, MatchOutcome::Matched { pair: first_pair }))
                } else {
                    next.selection = Selection::Comparing {
                        first,
                        second: slot,
                    };
                    Ok((next, MatchOutcome::Mismatched))
                }
            }
        }
    }

    /// Flip a revealed mismatch back over.
    ///
    /// No-op unless a mismatch is currently revealed; discovered pairs are
    /// untouched.
    #[must_use]
    pub fn conceal_mismatch(&self) -> Self {
        let mut next = self.clone();
        if matches!(next.selection, Selection::Comparing { .. }) {
            next.selection = Selection::Empty;
        }
        next
    }

    /// Tiles chunked into `difficulty` rows of views, in slot order.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<MemotestTileView>> {
        let side = self.difficulty as usize;

        (0..side)
            .map(|row| {
                (0..side)
                    .map(|col| {
                        let slot = row * side + col;
                        let tile = &self.tiles[slot];

                        MemotestTileView {
                            slot,
                            pair: tile.pair,
                            image: tile.image.clone(),
                            // Slot is in range by construction
                            flipped: self.is_flipped(slot).unwrap_or(false),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Render data for one tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemotestTileView {
    /// Slot of the tile.
    pub slot: usize,

    /// Pair the tile belongs to.
    pub pair: PairId,

    /// Face image; the view layer shows it only while `flipped`.
    pub image: ImageDescriptor,

    /// Whether the tile is currently face-up.
    pub flipped: bool,
}
