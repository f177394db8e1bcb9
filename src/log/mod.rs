//! Game log input: the event union and newline-delimited JSON loading.
//!
//! A log is accepted whole or not at all. Once accepted, every event is
//! structurally valid; field-level oddities are left for the accumulator
//! to absorb.

mod event;
mod game_log;

pub use event::{CallEvent, Event, RawSeat, TenpaiSet};
pub use game_log::GameLog;
