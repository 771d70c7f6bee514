//! Message History
//!
//! Recently spoken messages, newest first.

use std::collections::VecDeque;

/// Maximum number of remembered messages
pub const HISTORY_LIMIT: usize = 50;

/// Most-recent-first message history without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHistory {
    entries: VecDeque<String>,
}

impl MessageHistory {
    pub fn new() -> Self { Self::default() }

    /// Restore from a saved list (newest first), applying the same rules
    pub fn from_saved(saved: Vec<String>) -> Self {
        let mut history = Self::new();
        for message in saved.into_iter().rev() {
            history.add(&message);
        }
        history
    }

    /// Record a message; repeats move to the front. Returns false for empty input.
    pub fn add(&mut self, message: &str) -> bool {
        if message.is_empty() {
            return false;
        }
        self.entries.retain(|m| m != message);
        self.entries.push_front(message.to_string());
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    pub fn clear(&mut self) { self.entries.clear(); }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn latest(&self) -> Option<&str> { self.entries.front().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_without_duplicates() {
        let mut history = MessageHistory::new();
        history.add("물 주세요");
        history.add("아파요");
        history.add("물 주세요");
        assert_eq!(history.to_vec(), ["물 주세요", "아파요"]);
    }

    #[test]
    fn test_empty_messages_are_ignored() {
        let mut history = MessageHistory::new();
        assert!(!history.add(""));
        assert!(history.is_empty());
    }

    #[test]
    fn test_limit() {
        let mut history = MessageHistory::new();
        for i in 0..60 {
            history.add(&format!("메시지 {i}"));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest(), Some("메시지 59"));
    }

    #[test]
    fn test_restore_keeps_order() {
        let saved = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let history = MessageHistory::from_saved(saved.clone());
        assert_eq!(history.to_vec(), saved);
    }
}
