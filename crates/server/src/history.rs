//! Browsable log of past recommendation batches.
//!
//! The log is owned by whoever drives the session (the CLI, a UI); the
//! recommenders never read it.

use std::collections::VecDeque;

/// Ordered batches with a cursor.
///
/// `push` always moves the cursor to the newest entry. `previous` and `next`
/// stop at the ends instead of wrapping around.
#[derive(Debug, Clone)]
pub struct RecommendationLog<T> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: Option<usize>,
}

impl<T> RecommendationLog<T> {
    /// Unbounded log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            capacity: None,
        }
    }

    /// Keep at most `capacity` batches, dropping the oldest first.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            cursor: None,
            capacity: Some(capacity.max(1)),
        }
    }

    /// Append a batch and make it current.
    pub fn push(&mut self, batch: T) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(batch);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// The batch under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Step back one batch. Returns `None` (and stays put) at the oldest.
    pub fn previous(&mut self) -> Option<&T> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    /// Step forward one batch. Returns `None` (and stays put) at the newest.
    pub fn next(&mut self) -> Option<&T> {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                self.entries.get(i + 1)
            }
            _ => None,
        }
    }

    /// 0-based cursor position, oldest first.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for RecommendationLog<T> {
    fn default() -> Self {
        Self::new()
    }
}
