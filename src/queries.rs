//! Point queries over `(events, index)`.
//!
//! Each query is a bounded linear scan around `index` and never reads past
//! it. An index beyond the log is clamped to the last event.

use crate::log::Event;
use crate::tile::Tile;
use crate::types::{default_names, Seat, SEATS};
use serde::{Deserialize, Serialize};

/// Honba and riichi-stick counts of the round containing an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCounters {
    pub honba: u8,
    pub kyotaku: u32,
}

/// How a round ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Hora {
        actor: Option<Seat>,
        target: Option<Seat>,
        pai: Option<Tile>,
        ura_markers: Vec<Tile>,
        deltas: Vec<i32>,
        /// Self-draw win (`actor == target`).
        tsumo: bool,
    },
    Ryukyoku {
        reason: Option<String>,
        tenpai: [bool; SEATS],
        deltas: Vec<i32>,
    },
}

/// Terminal result of a round, with display names resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Index of the `hora`/`ryukyoku` event.
    pub index: usize,
    pub outcome: Outcome,
    pub names: [String; SEATS],
}

fn clamp(events: &[Event], index: usize) -> Option<usize> {
    if events.is_empty() {
        None
    } else {
        Some(index.min(events.len() - 1))
    }
}

/// Index of the result event for the position at `index`.
///
/// The event itself when it is `hora`/`ryukyoku`; for `end_kyoku`, the
/// nearest earlier result within the same round. Otherwise `None`.
pub fn result_index(events: &[Event], index: usize) -> Option<usize> {
    let index = clamp(events, index)?;
    match &events[index] {
        e if e.is_round_result() => Some(index),
        Event::EndKyoku => events[..index]
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, e)| !e.is_round_start())
            .find(|(_, e)| e.is_round_result())
            .map(|(i, _)| i),
        _ => None,
    }
}

/// Terminal round result visible at `index`.
pub fn round_result(events: &[Event], index: usize) -> Option<RoundResult> {
    let at = result_index(events, index)?;
    let outcome = match &events[at] {
        Event::Hora {
            actor,
            target,
            pai,
            ura_markers,
            deltas,
        } => Outcome::Hora {
            actor: Seat::from_field(*actor),
            target: Seat::from_field(*target),
            pai: pai.clone(),
            ura_markers: ura_markers.clone().unwrap_or_default(),
            deltas: deltas.clone().unwrap_or_default(),
            tsumo: actor.is_some() && actor == target,
        },
        Event::Ryukyoku {
            reason,
            tenpais,
            deltas,
        } => Outcome::Ryukyoku {
            reason: reason.clone(),
            tenpai: tenpais.as_ref().map(|t| t.mask()).unwrap_or_default(),
            deltas: deltas.clone().unwrap_or_default(),
        },
        _ => return None,
    };
    Some(RoundResult {
        index: at,
        outcome,
        names: names_at(events, index),
    })
}

/// Display names from the latest `start_game` at or before `index`.
///
/// Defaults to seat numbers; missing entries keep their default.
pub fn names_at(events: &[Event], index: usize) -> [String; SEATS] {
    let mut names = default_names();
    let Some(index) = clamp(events, index) else {
        return names;
    };
    let latest = events[..=index].iter().rev().find_map(|e| match e {
        Event::StartGame { names: Some(names) } => Some(names),
        _ => None,
    });
    if let Some(given) = latest {
        for (slot, name) in names.iter_mut().zip(given) {
            *slot = name.clone();
        }
    }
    names
}

/// Which seats' concealed hands are shown at `index`.
///
/// The viewed seat always is. At a round result the winner (hora) or every
/// tenpai seat (ryukyoku) is too. `show_all` reveals everything.
pub fn revealed_hands(events: &[Event], index: usize, viewed: Seat, show_all: bool) -> [bool; SEATS] {
    if show_all {
        return [true; SEATS];
    }
    let mut mask = [false; SEATS];
    mask[viewed.index()] = true;
    if let Some(result) = round_result(events, index) {
        match result.outcome {
            Outcome::Hora {
                actor: Some(actor), ..
            } => mask[actor.index()] = true,
            Outcome::Ryukyoku { tenpai, .. } => {
                for (slot, t) in mask.iter_mut().zip(tenpai) {
                    *slot |= t;
                }
            }
            Outcome::Hora { actor: None, .. } => {}
        }
    }
    mask
}

fn is_self_draw_win(event: &Event, seat: Seat) -> bool {
    matches!(
        event,
        Event::Hora { actor: Some(a), target: Some(t), .. }
            if Seat::from_field(Some(*a)) == Some(seat) && Seat::from_field(Some(*t)) == Some(seat)
    )
}

/// Whether `seat` is holding a fresh self-drawn tile at `index`.
///
/// True on that seat's `tsumo`, on its self-draw `hora`, and on the
/// `end_kyoku` following such a `hora`.
pub fn is_tsumo(events: &[Event], index: usize, seat: Seat) -> bool {
    let Some(index) = clamp(events, index) else {
        return false;
    };
    match &events[index] {
        Event::Tsumo { .. } => events[index].actor() == Some(seat),
        e @ Event::Hora { .. } => is_self_draw_win(e, seat),
        Event::EndKyoku => {
            result_index(events, index).is_some_and(|at| is_self_draw_win(&events[at], seat))
        }
        _ => false,
    }
}

/// Honba and kyotaku of the nearest `start_kyoku` at or before `index`.
pub fn round_counters(events: &[Event], index: usize) -> RoundCounters {
    let Some(index) = clamp(events, index) else {
        return RoundCounters::default();
    };
    events[..=index]
        .iter()
        .rev()
        .find_map(|e| match e {
            Event::StartKyoku { honba, kyotaku, .. } => Some(RoundCounters {
                honba: honba.unwrap_or(0),
                kyotaku: kyotaku.unwrap_or(0),
            }),
            _ => None,
        })
        .unwrap_or_default()
}
