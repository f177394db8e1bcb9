//! mjai event records.

use crate::tile::Tile;
use crate::types::{Seat, SEATS};
use serde::{Deserialize, Serialize};

/// Seat number as written in a log, before range checking.
///
/// Kept wide so a negative or huge seat only disables its own event.
pub type RawSeat = i64;

/// One line of an mjai log, keyed by its `type` field.
///
/// Every payload field is optional: a missing field turns the event into a
/// no-op (or a partial effect) during replay instead of failing the load.
/// Unrecognised `type` values parse as [`Event::Other`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StartGame {
        #[serde(default)]
        names: Option<Vec<String>>,
    },

    StartKyoku {
        #[serde(default)]
        bakaze: Option<Tile>,
        #[serde(default)]
        kyoku: Option<u8>,
        #[serde(default)]
        honba: Option<u8>,
        #[serde(default, alias = "kyoutaku")]
        kyotaku: Option<u32>,
        #[serde(default)]
        oya: Option<RawSeat>,
        #[serde(default)]
        scores: Option<Vec<i32>>,
        #[serde(default)]
        dora_marker: Option<Tile>,
        #[serde(default)]
        tehais: Option<Vec<Vec<Tile>>>,
    },

    Tsumo {
        #[serde(default)]
        actor: Option<RawSeat>,
        #[serde(default)]
        pai: Option<Tile>,
    },

    Dahai {
        #[serde(default)]
        actor: Option<RawSeat>,
        #[serde(default)]
        pai: Option<Tile>,
        #[serde(default)]
        tsumogiri: bool,
    },

    Reach {
        #[serde(default)]
        actor: Option<RawSeat>,
    },

    ReachAccepted {
        #[serde(default)]
        actor: Option<RawSeat>,
    },

    Chi(CallEvent),

    Pon(CallEvent),

    #[serde(alias = "kan")]
    Daiminkan(CallEvent),

    Ankan(CallEvent),

    Kakan(CallEvent),

    Dora {
        #[serde(default)]
        dora_marker: Option<Tile>,
    },

    Hora {
        #[serde(default)]
        actor: Option<RawSeat>,
        #[serde(default)]
        target: Option<RawSeat>,
        #[serde(default)]
        pai: Option<Tile>,
        #[serde(default, alias = "uradora_markers")]
        ura_markers: Option<Vec<Tile>>,
        #[serde(default, alias = "delta")]
        deltas: Option<Vec<i32>>,
    },

    Ryukyoku {
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        tenpais: Option<TenpaiSet>,
        #[serde(default, alias = "delta")]
        deltas: Option<Vec<i32>>,
    },

    EndKyoku,

    EndGame,

    #[serde(other)]
    Other,
}

/// Payload shared by the five call types.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    #[serde(default)]
    pub actor: Option<RawSeat>,
    #[serde(default)]
    pub target: Option<RawSeat>,
    #[serde(default)]
    pub pai: Option<Tile>,
    #[serde(default)]
    pub consumed: Option<Vec<Tile>>,
}

/// Tenpai seats of an exhaustive draw.
///
/// Logs write this either as four booleans or as a list of seat numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TenpaiSet {
    Flags(Vec<bool>),
    Seats(Vec<RawSeat>),
}

impl TenpaiSet {
    /// Per-seat tenpai flags. Entries beyond four seats are ignored.
    pub fn mask(&self) -> [bool; SEATS] {
        let mut mask = [false; SEATS];
        match self {
            TenpaiSet::Flags(flags) => {
                for (slot, &flag) in mask.iter_mut().zip(flags) {
                    *slot = flag;
                }
            }
            TenpaiSet::Seats(seats) => {
                for seat in seats.iter().filter_map(|&n| Seat::from_field(Some(n))) {
                    mask[seat.index()] = true;
                }
            }
        }
        mask
    }
}

impl Event {
    /// The `type` discriminator as written in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::StartGame { .. } => "start_game",
            Event::StartKyoku { .. } => "start_kyoku",
            Event::Tsumo { .. } => "tsumo",
            Event::Dahai { .. } => "dahai",
            Event::Reach { .. } => "reach",
            Event::ReachAccepted { .. } => "reach_accepted",
            Event::Chi(_) => "chi",
            Event::Pon(_) => "pon",
            Event::Daiminkan(_) => "daiminkan",
            Event::Ankan(_) => "ankan",
            Event::Kakan(_) => "kakan",
            Event::Dora { .. } => "dora",
            Event::Hora { .. } => "hora",
            Event::Ryukyoku { .. } => "ryukyoku",
            Event::EndKyoku => "end_kyoku",
            Event::EndGame => "end_game",
            Event::Other => "other",
        }
    }

    /// Raw `actor` field, if the event type carries one.
    pub fn actor_field(&self) -> Option<RawSeat> {
        match self {
            Event::Tsumo { actor, .. }
            | Event::Dahai { actor, .. }
            | Event::Reach { actor }
            | Event::ReachAccepted { actor }
            | Event::Hora { actor, .. } => *actor,
            Event::Chi(call)
            | Event::Pon(call)
            | Event::Daiminkan(call)
            | Event::Ankan(call)
            | Event::Kakan(call) => call.actor,
            _ => None,
        }
    }

    /// Acting seat, `None` when absent or out of range.
    pub fn actor(&self) -> Option<Seat> {
        Seat::from_field(self.actor_field())
    }

    /// The call payload for chi/pon/daiminkan/ankan/kakan.
    pub fn call(&self) -> Option<&CallEvent> {
        match self {
            Event::Chi(call)
            | Event::Pon(call)
            | Event::Daiminkan(call)
            | Event::Ankan(call)
            | Event::Kakan(call) => Some(call),
            _ => None,
        }
    }

    pub fn is_round_start(&self) -> bool {
        matches!(self, Event::StartKyoku { .. })
    }

    /// `hora` or `ryukyoku`.
    pub fn is_round_result(&self) -> bool {
        matches!(self, Event::Hora { .. } | Event::Ryukyoku { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_start_kyoku_fields() {
        let event = parse(json!({
            "type": "start_kyoku",
            "bakaze": "E",
            "kyoku": 1,
            "honba": 2,
            "kyotaku": 1,
            "oya": 0,
            "scores": [25000, 25000, 25000, 25000],
            "dora_marker": "1p",
            "tehais": [["1m"], ["2m"], ["3m"], ["4m"]]
        }));
        match event {
            Event::StartKyoku { bakaze, kyoku, honba, kyotaku, oya, dora_marker, tehais, .. } => {
                assert_eq!(bakaze, Some(Tile::from("E")));
                assert_eq!(kyoku, Some(1));
                assert_eq!(honba, Some(2));
                assert_eq!(kyotaku, Some(1));
                assert_eq!(oya, Some(0));
                assert_eq!(dora_marker, Some(Tile::from("1p")));
                assert_eq!(tehais.unwrap().len(), 4);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_field_aliases() {
        let event = parse(json!({"type": "start_kyoku", "kyoutaku": 3}));
        assert!(matches!(event, Event::StartKyoku { kyotaku: Some(3), .. }));

        let event = parse(json!({"type": "hora", "actor": 1, "target": 2, "delta": [0, 1000, -1000, 0]}));
        assert!(matches!(event, Event::Hora { deltas: Some(_), .. }));

        let event = parse(json!({"type": "kan", "actor": 0, "target": 2, "pai": "E", "consumed": ["E", "E", "E"]}));
        assert!(matches!(event, Event::Daiminkan(_)));
    }

    #[test]
    fn test_unknown_type_is_other() {
        let event = parse(json!({"type": "none"}));
        assert_eq!(event, Event::Other);
        assert_eq!(event.kind(), "other");
    }

    #[test]
    fn test_missing_fields_default() {
        let event = parse(json!({"type": "dahai"}));
        assert_eq!(event, Event::Dahai { actor: None, pai: None, tsumogiri: false });
        assert_eq!(event.actor(), None);

        for actor in [-1, 300, 70000] {
            let event = parse(json!({"type": "tsumo", "actor": actor, "pai": "1m"}));
            assert_eq!(event.actor_field(), Some(actor));
            assert_eq!(event.actor(), None);
        }
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result = serde_json::from_value::<Event>(json!({"type": "tsumo", "actor": "east"}));
        assert!(result.is_err());
        let result = serde_json::from_value::<Event>(json!({"actor": 0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_call_accessors() {
        let event = parse(json!({"type": "pon", "actor": 2, "target": 0, "pai": "5p", "consumed": ["5p", "5pr"]}));
        assert_eq!(event.kind(), "pon");
        assert_eq!(event.actor().map(|s| s.index()), Some(2));
        let call = event.call().unwrap();
        assert_eq!(call.target, Some(0));
        assert_eq!(call.consumed.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_out_of_range_actor() {
        let event = parse(json!({"type": "reach", "actor": 9}));
        assert_eq!(event.actor_field(), Some(9));
        assert_eq!(event.actor(), None);
    }

    #[test]
    fn test_tenpai_set_forms() {
        let flags = TenpaiSet::Flags(vec![true, false, true, false]);
        assert_eq!(flags.mask(), [true, false, true, false]);

        let seats = TenpaiSet::Seats(vec![3, 1, 8, -1]);
        assert_eq!(seats.mask(), [false, true, false, true]);

        let event = parse(json!({"type": "ryukyoku", "tenpais": [false, true, false, false]}));
        match event {
            Event::Ryukyoku { tenpais: Some(set), .. } => {
                assert_eq!(set.mask(), [false, true, false, false])
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
