//! Bounded, timestamped debug log shown in the screen's debug panel.

use std::collections::VecDeque;

use chrono::Local;

/// How many entries the panel keeps. Older entries are evicted.
pub const DEFAULT_CAPACITY: usize = 5;

/// Destination for the screen's debug messages.
///
/// The screen logs through this trait so tests can observe (or silence)
/// the entries without a terminal.
pub trait DebugSink {
    fn log(&mut self, message: &str);
    fn entries(&self) -> Vec<String>;
    fn clear(&mut self);
}

/// Fixed-capacity log keeping the most recent entries, newest first.
pub struct RingLog {
    capacity: usize,
    entries: VecDeque<String>,
}

impl RingLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }
}

impl Default for RingLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl DebugSink for RingLog {
    fn log(&mut self, message: &str) {
        tracing::debug!(message);
        let stamped = format!("{}: {}", Local::now().format("%H:%M:%S"), message);
        self.entries.push_front(stamped);
        self.entries.truncate(self.capacity);
    }

    fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let mut log = RingLog::new(5);
        for i in 0..7 {
            log.log(&format!("entry {i}"));
        }
        let entries = log.entries();
        assert_eq!(entries.len(), 5);
        assert!(entries[0].ends_with("entry 6"));
        assert!(entries[4].ends_with("entry 2"));
    }

    #[test]
    fn entries_are_timestamped() {
        let mut log = RingLog::default();
        log.log("hello");
        let entries = log.entries();
        // "HH:MM:SS: hello"
        assert!(entries[0].ends_with(": hello"));
        assert_eq!(entries[0].as_bytes()[2], b':');
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = RingLog::default();
        log.log("hello");
        log.clear();
        assert!(log.entries().is_empty());
    }

}
