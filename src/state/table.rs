//! Per-seat and table-wide state records.

use super::meld::Meld;
use crate::tile::Tile;
use crate::types::{default_names, RoundLabel, Seat, SEATS};
use serde::{Deserialize, Serialize};

/// Score of every seat before the first round starts.
pub const STARTING_SCORE: i32 = 25000;

/// One discarded tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardEntry {
    pub tile: Tile,
    /// The discard that declared riichi.
    pub is_riichi: bool,
    pub is_tsumogiri: bool,
    /// Claimed by another seat's call. Never cleared once set.
    pub is_called: bool,
}

impl DiscardEntry {
    pub fn new(tile: Tile, is_riichi: bool, is_tsumogiri: bool) -> Self {
        Self {
            tile,
            is_riichi,
            is_tsumogiri,
            is_called: false,
        }
    }
}

/// State of one seat within the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Concealed tiles in display order.
    pub hand: Vec<Tile>,
    /// Called groups in call order.
    pub melds: Vec<Meld>,
    pub discards: Vec<DiscardEntry>,
    pub score: i32,
    pub name: String,
    /// The last hand tile is a fresh draw pinned at the end.
    pub drawn: bool,
    /// A riichi discard has been made this round.
    pub riichi: bool,
    /// `reach` seen, waiting for the seat's next discard.
    pub pending_riichi: bool,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            hand: Vec::new(),
            melds: Vec::new(),
            discards: Vec::new(),
            score,
            name: name.into(),
            drawn: false,
            riichi: false,
            pending_riichi: false,
        }
    }

    /// Tiles held by the seat: hand plus every meld member.
    pub fn tile_count(&self) -> usize {
        self.hand.len() + self.melds.iter().map(Meld::tile_count).sum::<usize>()
    }

    /// The pinned draw, if any.
    pub fn drawn_tile(&self) -> Option<&Tile> {
        if self.drawn {
            self.hand.last()
        } else {
            None
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new("", STARTING_SCORE)
    }
}

/// Fully reconstructed table at one log index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub players: [PlayerState; SEATS],
    /// Round-opening indicator first, then kan-revealed ones in reveal order.
    pub dora_markers: Vec<Tile>,
    pub round: RoundLabel,
    pub dealer: Seat,
    pub honba: u8,
    pub kyotaku: u32,
    pub names: [String; SEATS],
}

impl TableSnapshot {
    /// Blank table before any event.
    pub fn new(starting_score: i32) -> Self {
        let names = default_names();
        Self {
            players: Seat::ALL.map(|seat| PlayerState::new(names[seat.index()].clone(), starting_score)),
            dora_markers: Vec::new(),
            round: RoundLabel::default(),
            dealer: Seat::default(),
            honba: 0,
            kyotaku: 0,
            names,
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut PlayerState {
        &mut self.players[seat.index()]
    }

    /// Current score of every seat.
    pub fn scores(&self) -> [i32; SEATS] {
        Seat::ALL.map(|seat| self.players[seat.index()].score)
    }
}

impl Default for TableSnapshot {
    fn default() -> Self {
        Self::new(STARTING_SCORE)
    }
}
