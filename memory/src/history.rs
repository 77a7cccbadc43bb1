//! Bounded FIFO history of conversation transcripts.

use std::collections::VecDeque;

/// Default number of transcript turns retained. Kept small so prompts stay
/// short and the answer call stays fast.
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 5;

/// Fixed-capacity rolling buffer retaining only the most recent transcripts.
///
/// Insertion appends and then discards the oldest entries until at most
/// `capacity` remain. Entries keep their original relative order, oldest
/// first. Empty transcripts (silence or a transcription that produced nothing)
/// are stored like any other entry and count toward the cap.
#[derive(Debug, Clone)]
pub struct TranscriptHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl TranscriptHistory {
    /// Creates an empty history retaining at most `capacity` entries.
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends a transcript, evicting the oldest entries beyond the cap.
    pub fn push(&mut self, transcript: impl Into<String>) {
        self.entries.push_back(transcript.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Owned copy of the entries, oldest to newest.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all retained transcripts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TranscriptHistory {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: History never exceeds its capacity; after N+k pushes exactly the
    /// last N remain, in original relative order.**
    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut history = TranscriptHistory::new(5);
        for i in 1..=8 {
            history.push(format!("turn {i}"));
        }
        assert_eq!(history.len(), 5);
        let entries: Vec<&str> = history.entries().collect();
        assert_eq!(entries, ["turn 4", "turn 5", "turn 6", "turn 7", "turn 8"]);
    }

    /// **Test: Empty transcripts are stored and count toward the cap.**
    #[test]
    fn empty_transcripts_count_toward_cap() {
        let mut history = TranscriptHistory::new(3);
        history.push("a");
        history.push("");
        history.push("");
        history.push("b");
        let entries: Vec<&str> = history.entries().collect();
        assert_eq!(entries, ["", "", "b"]);
    }

    /// **Test: Zero capacity is clamped to one.**
    #[test]
    fn zero_capacity_is_clamped() {
        let mut history = TranscriptHistory::new(0);
        history.push("only");
        history.push("kept");
        assert_eq!(history.capacity(), 1);
        let entries: Vec<&str> = history.entries().collect();
        assert_eq!(entries, ["kept"]);
    }

    /// **Test: clear empties the history; subsequent pushes start fresh.**
    #[test]
    fn clear_resets_history() {
        let mut history = TranscriptHistory::default();
        history.push("old");
        history.clear();
        assert!(history.is_empty());
        history.push("new");
        assert_eq!(history.snapshot(), ["new"]);
    }
}
