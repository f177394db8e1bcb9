//! Table state and the event fold.
//!
//! A [`TableSnapshot`] is rebuilt by applying events one at a time with
//! [`apply_event`]. Calls go through the meld resolver, which also links
//! claimed discards back to the seat that threw them.

mod apply;
mod meld;
mod table;

pub use apply::apply_event;
pub use meld::{claim_discard, resolve_call, Meld, MeldKind};
pub use table::{DiscardEntry, PlayerState, TableSnapshot, STARTING_SCORE};
