//! # Paifu
//!
//! Deterministic replay of four-player riichi mahjong logs in mjai format.
//!
//! ## Core Concepts
//!
//! - **Log**: newline-delimited JSON events, accepted whole or rejected
//! - **Snapshot**: the table (hands, melds, discards, scores, round
//!   metadata) after folding the log prefix `0..=index`
//! - **Queries**: round result, revealed hands, self-draw flag and
//!   honba/kyotaku, answered by short scans around an index
//! - **View**: a snapshot rotated so a chosen seat sits at position 0
//!
//! ## Example
//!
//! ```ignore
//! use paifu::{Replay, Seat};
//!
//! let replay = Replay::parse(&std::fs::read_to_string("game.jsonl")?)?;
//!
//! // Table after the 40th event
//! let table = replay.snapshot(39)?;
//! println!("{} dealer={}", table.round, table.dealer);
//!
//! // Same position, seen from seat 2
//! let view = replay.view(39, Seat::new(2)?)?;
//! ```

pub mod error;
pub mod log;
pub mod navigate;
pub mod queries;
pub mod replay;
pub mod state;
pub mod tile;
pub mod types;
pub mod view;

// Re-exports
pub use error::{ReplayError, Result};
pub use log::{CallEvent, Event, GameLog, RawSeat, TenpaiSet};
pub use queries::{Outcome, RoundCounters, RoundResult};
pub use replay::{snapshot, snapshot_with_score, Replay, ReplayConfig};
pub use state::{apply_event, DiscardEntry, Meld, MeldKind, PlayerState, TableSnapshot};
pub use tile::Tile;
pub use types::*;
pub use view::{display_index, rotate, LaidTile, MeldLayout, TableView};
