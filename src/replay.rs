//! Replay engine: log prefix in, table snapshot out.
//!
//! [`snapshot`] is the pure fold. [`Replay`] wraps a loaded log with an LRU
//! of earlier snapshots so scrubbing does not refold from event 0 every
//! time; a cached answer is always identical to the plain fold.

use crate::error::{ReplayError, Result};
use crate::log::{Event, GameLog};
use crate::navigate;
use crate::queries::{self, RoundCounters, RoundResult};
use crate::state::{apply_event, TableSnapshot, STARTING_SCORE};
use crate::types::{Seat, SEATS};
use crate::view::TableView;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

/// Fold `events[..=index]` from a blank table.
///
/// Indices past the end fold the whole log. Never reads beyond `index`.
pub fn snapshot(events: &[Event], index: usize) -> TableSnapshot {
    snapshot_with_score(events, index, STARTING_SCORE)
}

/// [`snapshot`] with a custom pre-game score.
pub fn snapshot_with_score(events: &[Event], index: usize, starting_score: i32) -> TableSnapshot {
    let end = index.saturating_add(1).min(events.len());
    let mut table = TableSnapshot::new(starting_score);
    fold(&mut table, events, 0..end);
    table
}

fn fold(table: &mut TableSnapshot, events: &[Event], range: Range<usize>) {
    for event in &events[range] {
        apply_event(table, event);
    }
}

/// Replay configuration.
#[derive(Clone, Debug)]
pub struct ReplayConfig {
    /// Number of snapshots kept for reuse (0 disables caching).
    pub snapshot_cache_size: usize,

    /// Reveal every seat's hand regardless of viewpoint.
    pub show_all_hands: bool,

    /// Score of every seat before the first round.
    pub starting_score: i32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            snapshot_cache_size: 256,
            show_all_hands: false,
            starting_score: STARTING_SCORE,
        }
    }
}

impl ReplayConfig {
    pub fn with_snapshot_cache_size(mut self, size: usize) -> Self {
        self.snapshot_cache_size = size;
        self
    }

    pub fn with_show_all_hands(mut self, show: bool) -> Self {
        self.show_all_hands = show;
        self
    }

    pub fn with_starting_score(mut self, score: i32) -> Self {
        self.starting_score = score;
        self
    }
}

/// A loaded log ready for random-access queries.
pub struct Replay {
    log: GameLog,
    config: ReplayConfig,
    /// Snapshots by event index.
    cache: Option<Mutex<LruCache<usize, Arc<TableSnapshot>>>>,
}

impl Replay {
    pub fn new(log: GameLog, config: ReplayConfig) -> Self {
        let cache = NonZeroUsize::new(config.snapshot_cache_size)
            .map(|size| Mutex::new(LruCache::new(size)));
        Self { log, config, cache }
    }

    /// Parse and load a pasted log with default configuration.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(GameLog::parse(text)?, ReplayConfig::default()))
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn events(&self) -> &[Event] {
        self.log.events()
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn set_show_all_hands(&mut self, show: bool) {
        self.config.show_all_hands = show;
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Clamp a caller position to the log.
    pub fn clamp(&self, index: usize) -> usize {
        navigate::clamp(self.events(), index)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ReplayError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    /// Table state after applying `events[..=index]`.
    pub fn snapshot(&self, index: usize) -> Result<Arc<TableSnapshot>> {
        self.check_index(index)?;

        let Some(cache) = &self.cache else {
            return Ok(Arc::new(snapshot_with_score(
                self.events(),
                index,
                self.config.starting_score,
            )));
        };

        // Resume from the closest cached snapshot at or before `index`.
        let base = {
            let mut cache = cache.lock();
            if let Some(hit) = cache.get(&index) {
                tracing::trace!(index, "snapshot cache hit");
                return Ok(Arc::clone(hit));
            }
            cache
                .iter()
                .filter(|(at, _)| **at < index)
                .max_by_key(|(at, _)| **at)
                .map(|(at, snap)| (*at, Arc::clone(snap)))
        };

        let (mut table, start) = match base {
            Some((at, snap)) => ((*snap).clone(), at + 1),
            None => (TableSnapshot::new(self.config.starting_score), 0),
        };
        tracing::trace!(index, resumed_from = start, "snapshot cache miss");
        fold(&mut table, self.events(), start..index + 1);

        let table = Arc::new(table);
        cache.lock().put(index, Arc::clone(&table));
        Ok(table)
    }

    /// Snapshot rotated for `viewed`, with every point query resolved.
    pub fn view(&self, index: usize, viewed: Seat) -> Result<TableView> {
        let snapshot = self.snapshot(index)?;
        Ok(TableView::new(
            self.events(),
            &snapshot,
            index,
            viewed,
            self.config.show_all_hands,
        ))
    }

    pub fn round_result(&self, index: usize) -> Result<Option<RoundResult>> {
        self.check_index(index)?;
        Ok(queries::round_result(self.events(), index))
    }

    pub fn revealed_hands(&self, index: usize, viewed: Seat) -> Result<[bool; SEATS]> {
        self.check_index(index)?;
        Ok(queries::revealed_hands(
            self.events(),
            index,
            viewed,
            self.config.show_all_hands,
        ))
    }

    pub fn is_tsumo(&self, index: usize, seat: Seat) -> Result<bool> {
        self.check_index(index)?;
        Ok(queries::is_tsumo(self.events(), index, seat))
    }

    pub fn round_counters(&self, index: usize) -> Result<RoundCounters> {
        self.check_index(index)?;
        Ok(queries::round_counters(self.events(), index))
    }

    /// Drop every cached snapshot.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Number of cached snapshots.
    pub fn cached_snapshots(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.lock().len())
    }
}
