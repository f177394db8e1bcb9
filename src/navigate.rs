//! Index navigation over a loaded log.
//!
//! All functions return indices inside `0..events.len()`; `None` means there
//! is nowhere to go and the caller should stay put.

use crate::log::Event;
use crate::types::Seat;

/// Clamp an arbitrary position to the log.
pub fn clamp(events: &[Event], index: usize) -> usize {
    index.min(events.len().saturating_sub(1))
}

pub fn step_back(index: usize) -> usize {
    index.saturating_sub(1)
}

pub fn step_forward(events: &[Event], index: usize) -> usize {
    clamp(events, index.saturating_add(1))
}

/// Indices of every `start_kyoku`.
pub fn round_starts(events: &[Event]) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_round_start())
        .map(|(i, _)| i)
        .collect()
}

/// Nearest `start_kyoku` strictly before `index`.
pub fn prev_round(events: &[Event], index: usize) -> Option<usize> {
    let end = index.min(events.len());
    events[..end].iter().rposition(Event::is_round_start)
}

/// Nearest `start_kyoku` strictly after `index`.
pub fn next_round(events: &[Event], index: usize) -> Option<usize> {
    let start = index.saturating_add(1).min(events.len());
    events[start..]
        .iter()
        .position(Event::is_round_start)
        .map(|i| start + i)
}

/// Nearest event before `index` acted by `seat`.
pub fn prev_turn(events: &[Event], index: usize, seat: Seat) -> Option<usize> {
    let end = index.min(events.len());
    events[..end].iter().rposition(|e| e.actor() == Some(seat))
}

/// Nearest event after `index` acted by `seat`.
pub fn next_turn(events: &[Event], index: usize, seat: Seat) -> Option<usize> {
    let start = index.saturating_add(1).min(events.len());
    events[start..]
        .iter()
        .position(|e| e.actor() == Some(seat))
        .map(|i| start + i)
}
