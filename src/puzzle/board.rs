//! Puzzle board state and the swap reducer.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, ImageDescriptor};

/// Home position of the blank tile. Never rendered with an image.
pub const BLANK_HOME: u16 = 0;

/// One tile on the board.
///
/// A tile's current slot is its index in the board's tile sequence; `home`
/// is the slot it belongs on when the puzzle is solved. The home values of
/// a board are always a permutation of `0..difficulty²`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTile {
    /// Solved position of this tile.
    pub home: u16,
}

impl PuzzleTile {
    /// Create a tile with the given home position.
    #[must_use]
    pub const fn new(home: u16) -> Self {
        Self { home }
    }

    /// Check whether this is the blank tile.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.home == BLANK_HOME
    }
}

/// Result of a `select` on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// The blank tile itself was selected; nothing changed.
    Ignored,

    /// The selected tile swapped with the blank.
    Swapped,

    /// The swap put every tile on its home position.
    Solved,
}

/// Background offsets for rendering one tile's slice of the shared image.
///
/// Percent values follow the CSS background convention: the image is
/// scaled to `100 * difficulty` percent of the tile and offset to the
/// tile's home row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteStyle {
    /// `background-size` as a percentage of the tile.
    pub size_pct: u32,

    /// Horizontal `background-position` percentage.
    pub x_pct: u32,

    /// Vertical `background-position` percentage.
    pub y_pct: u32,
}

impl SpriteStyle {
    /// Offsets for the slice belonging to `home` on a board of the given
    /// side length.
    #[must_use]
    pub fn for_home(home: u16, difficulty: u8) -> Self {
        let side = u32::from(difficulty);
        let row = u32::from(home) / side;
        let col = u32::from(home) % side;

        Self {
            size_pct: 100 * side,
            x_pct: 100 * col,
            y_pct: 100 * row,
        }
    }
}

/// Render data for one tile: its slot, home, image slice, and offsets.
///
/// The blank tile carries no image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTileView {
    /// Slot the tile currently occupies.
    pub slot: usize,

    /// Solved position of the tile.
    pub home: u16,

    /// Image to slice, `None` for the blank.
    pub image: Option<ImageDescriptor>,

    /// Background offsets for the tile's slice.
    pub style: SpriteStyle,
}

/// Sliding puzzle state: tile order, shared image, and the try counter.
///
/// Reducer-style: `select` does not mutate the receiver, it returns the
/// next state. The `im` vector makes that next state an O(1) structural
/// copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleBoard {
    difficulty: u8,
    tiles: Vector<PuzzleTile>,
    image: ImageDescriptor,
    tries: u32,
}

impl PuzzleBoard {
    /// Generate a freshly shuffled board.
    ///
    /// Callers validate `difficulty` (engine constructors reject anything
    /// below 2).
    #[must_use]
    pub fn generate(difficulty: u8, image: ImageDescriptor, rng: &mut GameRng) -> Self {
        debug_assert!(difficulty >= 2, "boards below 2x2 are degenerate");

        let slots = (difficulty as usize).pow(2);
        let homes = rng.shuffled((0..slots as u16).collect());

        Self {
            difficulty,
            tiles: homes.into_iter().map(PuzzleTile::new).collect(),
            image,
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

    /// Swaps performed so far.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Home positions in slot order.
    pub fn homes(&self) -> impl Iterator<Item = u16> + '_ {
        self.tiles.iter().map(|tile| tile.home)
    }

    /// The tile at `slot`, if in range.
    #[must_use]
    pub fn tile(&self, slot: usize) -> Option<PuzzleTile> {
        self.tiles.get(slot).copied()
    }

    /// Check whether every tile sits on its home position.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(slot, tile)| tile.home as usize == slot)
    }

    /// Apply a selection: the reducer for this board.
    ///
    /// Selecting the blank tile's slot changes nothing. Any other slot
    /// swaps its tile with the blank, wherever the blank is, and counts
    /// one try. Fails before touching anything if `slot` is out of range.
    pub fn select(&self, slot: usize) -> Result<(Self, SwapOutcome), GameError> {
        let tile = self.tile(slot).ok_or(GameError::SlotOutOfRange {
            slot,
            slots: self.slot_count(),
        })?;

        if tile.is_blank() {
            return Ok((self.clone(), SwapOutcome::Ignored));
        }

        // The home values are a permutation, so the blank is always present.
        let blank_slot = self
            .tiles
            .iter()
            .position(|tile| tile.is_blank())
            .expect("puzzle board has no blank tile");

        let mut next = self.clone();
        let clicked = next.tiles.set(slot, PuzzleTile::new(BLANK_HOME));
        let _ = next.tiles.set(blank_slot, clicked);
        next.tries += 1;

        let outcome = if next.is_solved() {
            SwapOutcome::Solved
        } else {
            SwapOutcome::Swapped
        };

        Ok((next, outcome))
    }

    /// Tiles chunked into `difficulty` rows of `difficulty` views, in slot
    /// order, with the blank's image withheld.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<PuzzleTileView>> {
        let side = self.difficulty as usize;

        (0..side)
            .map(|row| {
                (0..side)
                    .map(|col| {
                        let slot = row * side + col;
                        let tile = self.tiles[slot];

                        PuzzleTileView {
                            slot,
                            home: tile.home,
                            image: (!tile.is_blank()).then(|| self.image.clone()),
                            style: SpriteStyle::for_home(tile.home, self.difficulty),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
