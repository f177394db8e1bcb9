//! Meld resolution for call events.

use super::table::{DiscardEntry, PlayerState};
use crate::log::CallEvent;
use crate::tile::{remove_first, sort_hand, Tile};
use crate::types::{Direction, Seat};
use serde::{Deserialize, Serialize};

/// Kind of a called group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    Chi,
    Pon,
    Daiminkan,
    /// A pon upgraded in place with a fourth tile.
    Kakan,
    /// Concealed kan: no call direction.
    Ankan,
}

/// A called group of tiles.
///
/// `tiles` keeps the tiles as the log listed them, excluding the called
/// tile. Display ordering is computed separately (see `view::MeldLayout`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    #[serde(rename = "type")]
    pub kind: MeldKind,
    pub tiles: Vec<Tile>,
    pub called_tile: Option<Tile>,
    pub from: Option<Direction>,
    /// Fourth tile added by a kakan.
    pub upgrade_tile: Option<Tile>,
}

impl Meld {
    /// Number of physical tiles in the group.
    pub fn tile_count(&self) -> usize {
        match self.kind {
            MeldKind::Ankan => self.tiles.len(),
            _ => {
                self.tiles.len()
                    + self.called_tile.is_some() as usize
                    + self.upgrade_tile.is_some() as usize
            }
        }
    }

    /// Whether a kakan on `tile` can upgrade this group.
    fn accepts_upgrade(&self, tile: &Tile) -> bool {
        matches!(self.kind, MeldKind::Pon | MeldKind::Kakan)
            && (self.tiles.iter().any(|t| t.same_kind(tile))
                || self.called_tile.as_ref().is_some_and(|t| t.same_kind(tile)))
    }
}

/// Apply a call by `actor` to that seat's hand and melds.
///
/// Chi, pon and daiminkan append a new open group and drop `consumed` from
/// the hand. Ankan appends a concealed group. Kakan upgrades the most recent
/// matching pon in place; with no match it changes nothing. Returns whether
/// the seat's state changed.
pub fn resolve_call(kind: MeldKind, call: &CallEvent, actor: Seat, player: &mut PlayerState) -> bool {
    match kind {
        MeldKind::Chi | MeldKind::Pon | MeldKind::Daiminkan => {
            let from = Seat::from_field(call.target).and_then(|t| Direction::between(actor, t));
            let tiles = call.consumed.clone().unwrap_or_default();
            remove_tiles(&mut player.hand, &tiles, actor);
            player.melds.push(Meld {
                kind,
                tiles,
                called_tile: call.pai.clone(),
                from,
                upgrade_tile: None,
            });
        }
        MeldKind::Ankan => {
            let tiles = match (&call.consumed, &call.pai) {
                (Some(consumed), _) => consumed.clone(),
                (None, Some(pai)) => vec![pai.clone()],
                (None, None) => {
                    tracing::debug!(actor = %actor, "ankan without tiles ignored");
                    return false;
                }
            };
            remove_tiles(&mut player.hand, &tiles, actor);
            player.melds.push(Meld {
                kind,
                tiles,
                called_tile: call.pai.clone(),
                from: None,
                upgrade_tile: None,
            });
        }
        MeldKind::Kakan => {
            let Some(pai) = &call.pai else {
                tracing::debug!(actor = %actor, "kakan without pai ignored");
                return false;
            };
            let Some(meld) = player.melds.iter_mut().rev().find(|m| m.accepts_upgrade(pai)) else {
                tracing::debug!(actor = %actor, tile = %pai, "kakan has no pon to upgrade");
                return false;
            };
            meld.kind = MeldKind::Kakan;
            meld.upgrade_tile = Some(pai.clone());
            remove_tiles(&mut player.hand, std::slice::from_ref(pai), actor);
        }
    }

    player.drawn = false;
    sort_hand(&mut player.hand);
    true
}

/// Mark the most recent unclaimed discard of `tile` as called.
///
/// Scans from the end of the pile; returns false when nothing matches.
pub fn claim_discard(discards: &mut [DiscardEntry], tile: &Tile) -> bool {
    match discards
        .iter_mut()
        .rev()
        .find(|d| !d.is_called && d.tile == *tile)
    {
        Some(entry) => {
            entry.is_called = true;
            true
        }
        None => false,
    }
}

fn remove_tiles(hand: &mut Vec<Tile>, tiles: &[Tile], actor: Seat) {
    for tile in tiles {
        if !remove_first(hand, tile) {
            tracing::debug!(actor = %actor, tile = %tile, "called tile not in hand");
        }
    }
}
