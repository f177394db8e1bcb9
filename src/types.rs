//! Core types shared across the replay engine.

use crate::error::ReplayError;
use crate::log::RawSeat;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of seats at the table.
pub const SEATS: usize = 4;

/// One of the four fixed player positions.
///
/// Distinct from dealer or turn order: seat 0 is always the first entry of
/// `start_game.names` and `start_kyoku.tehais`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    /// All seats in table order.
    pub const ALL: [Seat; SEATS] = [Seat(0), Seat(1), Seat(2), Seat(3)];

    /// Create a seat, rejecting numbers outside `0..4`.
    pub fn new(n: u8) -> Result<Self, ReplayError> {
        Self::try_from(n)
    }

    /// Seat for a raw event field, `None` when absent or out of range.
    pub fn from_field(n: Option<RawSeat>) -> Option<Self> {
        let n = u8::try_from(n?).ok()?;
        Self::try_from(n).ok()
    }

    /// Index into seat-indexed arrays.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Turn-order offset from `self` to `other`, in `0..4`.
    pub fn offset_to(self, other: Seat) -> u8 {
        (other.0 + SEATS as u8 - self.0) % SEATS as u8
    }
}

impl TryFrom<u8> for Seat {
    type Error = ReplayError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        if (n as usize) < SEATS {
            Ok(Seat(n))
        } else {
            Err(ReplayError::SeatOutOfRange(n))
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.0
    }
}

impl Default for Seat {
    fn default() -> Self {
        Seat(0)
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat({})", self.0)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a called tile came from, relative to the caller.
///
/// The offset is `(target - actor + 4) mod 4`. This is the only place the
/// offset-to-label mapping is defined; meld construction and display layout
/// both go through [`Direction::from_offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Offset 1.
    Previous,
    /// Offset 2.
    Opposite,
    /// Offset 3.
    Next,
}

impl Direction {
    /// Label for a turn-order offset. Offset 0 (self) has no direction.
    pub fn from_offset(offset: u8) -> Option<Self> {
        match offset % SEATS as u8 {
            1 => Some(Direction::Previous),
            2 => Some(Direction::Opposite),
            3 => Some(Direction::Next),
            _ => None,
        }
    }

    /// Direction of `target` as seen by `actor`.
    pub fn between(actor: Seat, target: Seat) -> Option<Self> {
        Self::from_offset(actor.offset_to(target))
    }
}

/// Round label such as `E1`: prevailing wind plus kyoku number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLabel {
    pub bakaze: Option<Tile>,
    pub kyoku: Option<u8>,
}

impl RoundLabel {
    pub fn new(bakaze: Option<Tile>, kyoku: Option<u8>) -> Self {
        Self { bakaze, kyoku }
    }

    /// True before the first `start_kyoku`.
    pub fn is_empty(&self) -> bool {
        self.bakaze.is_none() && self.kyoku.is_none()
    }
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(bakaze) = &self.bakaze {
            write!(f, "{}", bakaze)?;
        }
        if let Some(kyoku) = self.kyoku {
            write!(f, "{}", kyoku)?;
        }
        Ok(())
    }
}

/// Default display names: the seat numbers.
pub fn default_names() -> [String; SEATS] {
    Seat::ALL.map(|seat| seat.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_bounds() {
        assert_eq!(Seat::new(3).unwrap().index(), 3);
        assert!(matches!(Seat::new(4), Err(ReplayError::SeatOutOfRange(4))));
        assert_eq!(Seat::from_field(Some(7)), None);
        assert_eq!(Seat::from_field(None), None);
        assert_eq!(Seat::from_field(Some(-1)), None);
        assert_eq!(Seat::from_field(Some(260)), None);
        assert_eq!(Seat::from_field(Some(2)), Some(Seat(2)));
    }

    #[test]
    fn test_seat_offsets() {
        let s0 = Seat::ALL[0];
        let s3 = Seat::ALL[3];
        assert_eq!(s0.offset_to(s3), 3);
        assert_eq!(s3.offset_to(s0), 1);
        assert_eq!(s0.offset_to(s0), 0);
    }

    #[test]
    fn test_direction_mapping() {
        let actor = Seat::ALL[0];
        assert_eq!(Direction::between(actor, Seat::ALL[1]), Some(Direction::Previous));
        assert_eq!(Direction::between(actor, Seat::ALL[2]), Some(Direction::Opposite));
        assert_eq!(Direction::between(actor, Seat::ALL[3]), Some(Direction::Next));
        assert_eq!(Direction::between(actor, actor), None);

        // Wraps around the table.
        assert_eq!(Direction::between(Seat::ALL[3], Seat::ALL[0]), Some(Direction::Previous));
        assert_eq!(Direction::between(Seat::ALL[2], Seat::ALL[1]), Some(Direction::Next));
    }

    #[test]
    fn test_round_label_display() {
        let label = RoundLabel::new(Some(Tile::from("E")), Some(1));
        assert_eq!(label.to_string(), "E1");
        assert_eq!(RoundLabel::default().to_string(), "");
        assert!(RoundLabel::default().is_empty());
    }

    #[test]
    fn test_seat_serde() {
        let seat: Seat = serde_json::from_str("2").unwrap();
        assert_eq!(seat.index(), 2);
        assert!(serde_json::from_str::<Seat>("9").is_err());
        assert_eq!(serde_json::to_string(&seat).unwrap(), "2");
    }
}
