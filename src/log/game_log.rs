//! Loading newline-delimited JSON logs.

use super::event::Event;
use crate::error::{ReplayError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// An accepted, immutable event sequence indexed `0..len`.
///
/// Keeps the raw text of each accepted line next to its parsed event so a
/// log pane can show the line at the current index.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    events: Vec<Event>,
    lines: Vec<String>,
}

impl GameLog {
    /// Parse a pasted log. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut log = Self::default();
        for (n, line) in text.lines().enumerate() {
            log.push_line(n + 1, line)?;
        }
        log.finish()
    }

    /// Parse a log from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut log = Self::default();
        for (n, line) in reader.lines().enumerate() {
            log.push_line(n + 1, &line?)?;
        }
        log.finish()
    }

    /// Parse a log file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a log from already-structured events.
    ///
    /// Raw lines are regenerated from the events. An [`Event::Other`] has
    /// no record of the type it was parsed from and is written back as
    /// `{"type":"other"}`.
    pub fn from_events(events: Vec<Event>) -> Result<Self> {
        let lines = events
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { events, lines })
    }

    fn push_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let event: Event =
            serde_json::from_str(trimmed).map_err(|e| ReplayError::MalformedLine {
                line: line_no,
                message: e.to_string(),
            })?;
        self.events.push(event);
        self.lines.push(trimmed.to_string());
        Ok(())
    }

    fn finish(self) -> Result<Self> {
        if self.events.is_empty() {
            return Err(ReplayError::EmptyLog);
        }
        tracing::info!(
            events = self.events.len(),
            rounds = self.events.iter().filter(|e| e.is_round_start()).count(),
            "loaded game log"
        );
        Ok(self)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Raw text of the event at `index`.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl FromStr for GameLog {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "{\"type\":\"start_game\"}\n\n   \n{\"type\":\"end_game\"}\n";
        let log = GameLog::parse(text).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.line(1), Some("{\"type\":\"end_game\"}"));
        assert_eq!(log.get(1), Some(&Event::EndGame));
    }

    #[test]
    fn test_malformed_line_rejects_whole_log() {
        let text = "{\"type\":\"start_game\"}\n\n{not json}\n{\"type\":\"end_game\"}";
        match GameLog::parse(text) {
            Err(ReplayError::MalformedLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed line error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_log() {
        assert!(matches!(GameLog::parse(""), Err(ReplayError::EmptyLog)));
        assert!(matches!(GameLog::parse("\n  \n"), Err(ReplayError::EmptyLog)));
    }

    #[test]
    fn test_non_object_line() {
        assert!(matches!(
            GameLog::parse("42"),
            Err(ReplayError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_from_reader() {
        let data = b"{\"type\":\"start_game\",\"names\":[\"a\",\"b\",\"c\",\"d\"]}\n{\"type\":\"end_game\"}\n";
        let log = GameLog::from_reader(&data[..]).unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_from_events_regenerates_lines() {
        let log = GameLog::from_events(vec![Event::EndKyoku, Event::Other]).unwrap();
        assert_eq!(log.line(0), Some("{\"type\":\"end_kyoku\"}"));
        assert_eq!(log.line(1), Some("{\"type\":\"other\"}"));
        assert_eq!(log.len(), 2);
    }
}
