//! Viewpoint transform and render-ready views.
//!
//! Rotation puts the viewed seat at display position 0; positions 1, 2, 3
//! follow in turn order.

use crate::log::Event;
use crate::queries::{is_tsumo, revealed_hands, round_counters, round_result, RoundResult};
use crate::state::{Meld, MeldKind, PlayerState, TableSnapshot};
use crate::tile::{sort_hand, Tile};
use crate::types::{Direction, RoundLabel, Seat, SEATS};
use serde::{Deserialize, Serialize};

/// Rotate a seat-indexed array so `viewed` lands at position 0.
///
/// `rotate(v, s)[k] == v[(k + s) mod 4]`.
pub fn rotate<T: Clone>(values: &[T; SEATS], viewed: Seat) -> [T; SEATS] {
    std::array::from_fn(|k| values[(k + viewed.index()) % SEATS].clone())
}

/// Display position of `seat` when `viewed` sits at position 0.
pub fn display_index(seat: Seat, viewed: Seat) -> usize {
    viewed.offset_to(seat) as usize
}

/// A snapshot rotated for one viewed seat, plus the point queries a
/// renderer needs at the same index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub index: usize,
    pub viewed: Seat,
    pub players: [PlayerState; SEATS],
    pub names: [String; SEATS],
    pub scores: [i32; SEATS],
    /// Display position of the dealer.
    pub dealer_index: usize,
    pub revealed: [bool; SEATS],
    pub tsumo: [bool; SEATS],
    pub round: RoundLabel,
    pub honba: u8,
    pub kyotaku: u32,
    pub dora_markers: Vec<Tile>,
    pub result: Option<RoundResult>,
}

impl TableView {
    /// Build the view of `snapshot`, which must be the fold of
    /// `events[..=index]`.
    pub fn new(
        events: &[Event],
        snapshot: &TableSnapshot,
        index: usize,
        viewed: Seat,
        show_all_hands: bool,
    ) -> Self {
        let tsumo = Seat::ALL.map(|seat| is_tsumo(events, index, seat));
        let counters = round_counters(events, index);
        Self {
            index,
            viewed,
            players: rotate(&snapshot.players, viewed),
            names: rotate(&snapshot.names, viewed),
            scores: rotate(&snapshot.scores(), viewed),
            dealer_index: display_index(snapshot.dealer, viewed),
            revealed: rotate(&revealed_hands(events, index, viewed, show_all_hands), viewed),
            tsumo: rotate(&tsumo, viewed),
            round: snapshot.round.clone(),
            honba: counters.honba,
            kyotaku: counters.kyotaku,
            dora_markers: snapshot.dora_markers.clone(),
            result: round_result(events, index),
        }
    }

    /// Seat shown at display position `k`.
    pub fn seat_at(&self, k: usize) -> Seat {
        Seat::ALL[(k + self.viewed.index()) % SEATS]
    }
}

/// One tile slot of a laid-out meld.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaidTile {
    pub tile: Tile,
    /// Turned sideways to mark the called tile.
    pub sideways: bool,
    pub face_down: bool,
    /// Kakan tile stacked on this one.
    pub stacked: Option<Tile>,
}

impl LaidTile {
    fn upright(tile: Tile) -> Self {
        Self {
            tile,
            sideways: false,
            face_down: false,
            stacked: None,
        }
    }
}

/// Display order of a meld's tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldLayout {
    pub tiles: Vec<LaidTile>,
}

impl MeldLayout {
    /// Lay out a meld.
    ///
    /// Own tiles are sorted; the called tile goes sideways at the slot for
    /// its direction (previous: first, opposite: middle, next: last). A
    /// kakan tile stacks on the sideways tile. A four-tile ankan shows its
    /// outer tiles face down.
    pub fn of(meld: &Meld) -> Self {
        let mut own = meld.tiles.clone();
        sort_hand(&mut own);
        let mut tiles: Vec<LaidTile> = own.into_iter().map(LaidTile::upright).collect();

        if meld.kind == MeldKind::Ankan {
            if tiles.len() == 4 {
                tiles[0].face_down = true;
                tiles[3].face_down = true;
            }
            return Self { tiles };
        }

        match (&meld.called_tile, meld.from) {
            (Some(called), Some(from)) => {
                let slot = match from {
                    Direction::Previous => 0,
                    Direction::Opposite => tiles.len() / 2,
                    Direction::Next => tiles.len(),
                };
                tiles.insert(
                    slot,
                    LaidTile {
                        tile: called.clone(),
                        sideways: true,
                        face_down: false,
                        stacked: meld.upgrade_tile.clone(),
                    },
                );
            }
            (called, _) => {
                tiles.extend(called.iter().cloned().map(LaidTile::upright));
                tiles.extend(meld.upgrade_tile.iter().cloned().map(LaidTile::upright));
            }
        }
        Self { tiles }
    }

    /// Position of the sideways tile, if any.
    pub fn sideways_index(&self) -> Option<usize> {
        self.tiles.iter().position(|t| t.sideways)
    }
}
