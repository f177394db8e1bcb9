//! Event application.

use super::meld::{claim_discard, resolve_call, MeldKind};
use super::table::{DiscardEntry, PlayerState, TableSnapshot};
use crate::log::{CallEvent, Event};
use crate::tile::{remove_first, sort_hand, sort_hand_pinning_last};
use crate::types::{RoundLabel, Seat};

/// Apply one event to a table in place.
///
/// Semantic anomalies (missing fields, out-of-range seats, tiles absent from
/// a hand) leave the affected part of the table untouched.
pub fn apply_event(table: &mut TableSnapshot, event: &Event) {
    tracing::trace!(kind = event.kind(), "apply event");

    match event {
        Event::StartGame { names } => {
            if let Some(names) = names {
                for (slot, name) in table.names.iter_mut().zip(names) {
                    *slot = name.clone();
                }
                for (player, name) in table.players.iter_mut().zip(&table.names) {
                    player.name = name.clone();
                }
            }
        }

        Event::StartKyoku {
            bakaze,
            kyoku,
            honba,
            kyotaku,
            oya,
            scores,
            dora_marker,
            tehais,
        } => {
            table.round = RoundLabel::new(bakaze.clone(), *kyoku);
            table.dealer = Seat::from_field(*oya).unwrap_or_default();
            table.honba = honba.unwrap_or(0);
            table.kyotaku = kyotaku.unwrap_or(0);
            table.dora_markers = dora_marker.iter().cloned().collect();

            for seat in Seat::ALL {
                let i = seat.index();
                let score = scores
                    .as_ref()
                    .and_then(|s| s.get(i).copied())
                    .unwrap_or(table.players[i].score);
                let mut player = PlayerState::new(table.names[i].clone(), score);
                if let Some(hand) = tehais.as_ref().and_then(|t| t.get(i)) {
                    player.hand = hand.clone();
                    sort_hand(&mut player.hand);
                }
                table.players[i] = player;
            }
        }

        Event::Dora { dora_marker } => {
            if let Some(marker) = dora_marker {
                table.dora_markers.push(marker.clone());
            }
        }

        Event::Tsumo { pai, .. } => {
            let (Some(seat), Some(pai)) = (actor_of(event), pai) else {
                return;
            };
            let player = table.player_mut(seat);
            player.hand.push(pai.clone());
            sort_hand_pinning_last(&mut player.hand);
            player.drawn = true;
        }

        Event::Reach { .. } => {
            if let Some(seat) = actor_of(event) {
                table.player_mut(seat).pending_riichi = true;
            }
        }

        Event::Dahai { pai, tsumogiri, .. } => {
            let (Some(seat), Some(pai)) = (actor_of(event), pai) else {
                return;
            };
            let player = table.player_mut(seat);
            let is_riichi = player.pending_riichi;
            player
                .discards
                .push(DiscardEntry::new(pai.clone(), is_riichi, *tsumogiri));
            player.pending_riichi = false;
            player.riichi |= is_riichi;
            if !remove_first(&mut player.hand, pai) {
                tracing::debug!(actor = %seat, tile = %pai, "discarded tile not in hand");
            }
            sort_hand(&mut player.hand);
            player.drawn = false;
        }

        Event::Chi(call) => apply_call(table, MeldKind::Chi, call),
        Event::Pon(call) => apply_call(table, MeldKind::Pon, call),
        Event::Daiminkan(call) => apply_call(table, MeldKind::Daiminkan, call),
        Event::Ankan(call) => apply_call(table, MeldKind::Ankan, call),
        Event::Kakan(call) => apply_call(table, MeldKind::Kakan, call),

        Event::Hora { deltas, .. } | Event::Ryukyoku { deltas, .. } => {
            if let Some(deltas) = deltas {
                for (player, delta) in table.players.iter_mut().zip(deltas) {
                    player.score = player.score.saturating_add(*delta);
                }
            }
        }

        Event::Other => {
            tracing::debug!("ignoring event of unknown type");
        }

        Event::ReachAccepted { .. } | Event::EndKyoku | Event::EndGame => {}
    }
}

fn actor_of(event: &Event) -> Option<Seat> {
    let seat = event.actor();
    if seat.is_none() {
        tracing::debug!(kind = event.kind(), actor = ?event.actor_field(), "event without a valid actor ignored");
    }
    seat
}

fn apply_call(table: &mut TableSnapshot, kind: MeldKind, call: &CallEvent) {
    let Some(actor) = Seat::from_field(call.actor) else {
        tracing::debug!(?kind, actor = ?call.actor, "call without a valid actor ignored");
        return;
    };

    if !resolve_call(kind, call, actor, table.player_mut(actor)) {
        return;
    }

    let (Some(target), Some(pai)) = (Seat::from_field(call.target), &call.pai) else {
        return;
    };
    if target == actor {
        return;
    }
    if !claim_discard(&mut table.player_mut(target).discards, pai) {
        tracing::debug!(?kind, target = %target, tile = %pai, "no unclaimed discard matches call");
    }
}
