//! Tile identifiers and canonical tile ordering.
//!
//! Tiles are kept as the mjai strings they arrive as (`"1m"`, `"5pr"`,
//! `"E"`, ...). Logs may contain identifiers outside the closed domain
//! (`"?"` for hidden tiles, typos); those are carried through untouched and
//! sort after every known tile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Honor tiles in sort order: winds E S W N, then dragons P (white),
/// F (green), C (red).
const HONORS: [&str; 7] = ["E", "S", "W", "N", "P", "F", "C"];

/// Sort key of tiles outside the known domain.
pub const UNKNOWN_SORT_KEY: u8 = u8::MAX;

/// A tile identifier. Not unique: a hand may hold several equal tiles.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(String);

impl Tile {
    pub fn new(id: impl Into<String>) -> Self {
        Tile(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical ordering key.
    ///
    /// Keys are spaced by two so each red five lands directly after its
    /// plain five: manzu `0..=16`, pinzu `18..=34`, souzu `36..=52`, honors
    /// `54..=66`. Unknown identifiers map to [`UNKNOWN_SORT_KEY`].
    pub fn sort_key(&self) -> u8 {
        if let Some(pos) = HONORS.iter().position(|h| *h == self.0) {
            return (27 + pos as u8) * 2;
        }
        match self.suited() {
            Some((suit, rank, red)) => (suit * 9 + rank - 1) * 2 + red as u8,
            None => UNKNOWN_SORT_KEY,
        }
    }

    /// True for identifiers in the closed 37-tile domain.
    pub fn is_known(&self) -> bool {
        self.sort_key() != UNKNOWN_SORT_KEY
    }

    /// True for the red-five variants.
    pub fn is_aka(&self) -> bool {
        matches!(self.suited(), Some((_, _, true)))
    }

    /// The plain tile of the same rank (`"5mr"` becomes `"5m"`).
    pub fn deaka(&self) -> Tile {
        if self.is_aka() {
            Tile(self.0[..2].to_string())
        } else {
            self.clone()
        }
    }

    /// Rank equivalence: equal after removing the red-five distinction.
    pub fn same_kind(&self, other: &Tile) -> bool {
        self == other || self.deaka() == other.deaka()
    }

    /// `(suit, rank, red)` for suited tiles, suit 0 = m, 1 = p, 2 = s.
    fn suited(&self) -> Option<(u8, u8, bool)> {
        let bytes = self.0.as_bytes();
        let red = match bytes.len() {
            2 => false,
            3 if bytes[2] == b'r' && bytes[0] == b'5' => true,
            _ => return None,
        };
        let rank = match bytes[0] {
            b @ b'1'..=b'9' => b - b'0',
            _ => return None,
        };
        let suit = match bytes[1] {
            b'm' => 0,
            b'p' => 1,
            b's' => 2,
            _ => return None,
        };
        Some((suit, rank, red))
    }
}

impl From<&str> for Tile {
    fn from(s: &str) -> Self {
        Tile(s.to_string())
    }
}

impl From<String> for Tile {
    fn from(s: String) -> Self {
        Tile(s)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable ascending sort by [`Tile::sort_key`].
pub fn sort_hand(hand: &mut [Tile]) {
    hand.sort_by_key(Tile::sort_key);
}

/// Sort everything except the final tile, which stays last.
///
/// Used right after a draw so the drawn tile remains visually separate.
pub fn sort_hand_pinning_last(hand: &mut [Tile]) {
    if hand.len() <= 1 {
        return;
    }
    let last = hand.len() - 1;
    sort_hand(&mut hand[..last]);
}

/// Remove the first tile equal to `tile`. Returns false when absent.
pub fn remove_first(tiles: &mut Vec<Tile>, tile: &Tile) -> bool {
    match tiles.iter().position(|t| t == tile) {
        Some(pos) => {
            tiles.remove(pos);
            true
        }
        None => false,
    }
}
