//! Bounded, newest-first battle log.

use std::collections::VecDeque;

/// Number of lines kept when no capacity is configured.
pub const DEFAULT_LOG_CAPACITY: usize = 60;

/// Append-only log of rendered lines, newest first, holding at most
/// `capacity` entries. Older lines fall off the end.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        self.lines.truncate(self.capacity);
    }

    /// Drops every line and seeds the log with `opening`.
    pub fn restart(&mut self, opening: impl Into<String>) {
        self.lines.clear();
        self.push(opening);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent line.
    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    /// Lines newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = BattleLog::default();
        log.push("first");
        log.push("second");
        assert_eq!(log.latest(), Some("second"));
        assert_eq!(log.to_vec(), vec!["second", "first"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = BattleLog::default();
        for i in 0..75 {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.len(), DEFAULT_LOG_CAPACITY);
        assert_eq!(log.latest(), Some("line 74"));
        assert_eq!(log.iter().last(), Some("line 15"));
    }

    #[test]
    fn test_restart_leaves_only_opening() {
        let mut log = BattleLog::with_capacity(5);
        log.push("a");
        log.push("b");
        log.restart("opening");
        assert_eq!(log.to_vec(), vec!["opening"]);
    }
}
