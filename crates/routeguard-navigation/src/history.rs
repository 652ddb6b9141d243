//! Bounded navigation history
//!
//! A fixed arena of slots indexed as a ring. Pushing into a full history overwrites the
//! oldest slot, so eviction is strictly FIFO and the length never exceeds the capacity.
//! Histories are plain values: each dispatcher (or test) owns its own.

use parking_lot::Mutex;
use routeguard_core::{Result, RouteguardError};
use std::sync::Arc;

/// Default number of remembered paths.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Ring buffer of recently visited paths, oldest first.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    slots: Vec<Option<String>>,
    /// Slot index of the oldest entry.
    head: usize,
    len: usize,
}

impl NavigationHistory {
    /// Create an empty history holding at most `capacity` paths.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RouteguardError::invalid(
                "navigation history capacity must be at least 1",
            ));
        }
        Ok(Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        })
    }

    /// Append `path`, evicting the oldest entry when full.
    pub fn push(&mut self, path: impl Into<String>) {
        let capacity = self.capacity();
        let path = path.into();
        if self.len < capacity {
            let tail = (self.head + self.len) % capacity;
            self.slots[tail] = Some(path);
            self.len += 1;
        } else {
            self.slots[self.head] = Some(path);
            self.head = (self.head + 1) % capacity;
        }
    }

    /// Entry before the current top, if at least two entries exist.
    pub fn previous(&self) -> Option<&str> {
        if self.len < 2 {
            return None;
        }
        self.get(self.len - 2)
    }

    /// Most recent entry.
    pub fn current(&self) -> Option<&str> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Entry at logical position `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&str> {
        if index >= self.len {
            return None;
        }
        self.slots[(self.head + index) % self.capacity()].as_deref()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Number of stored paths.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of stored paths.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Owned copy of the entries, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self {
            slots: vec![None; DEFAULT_HISTORY_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

/// History shared between a dispatcher and its callers.
///
/// Accessors return owned values so the lock is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<Mutex<NavigationHistory>>,
}

impl SharedHistory {
    /// Wrap an existing history.
    pub fn new(history: NavigationHistory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    /// Empty shared history with the given capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        NavigationHistory::new(capacity).map(Self::new)
    }

    /// Append `path`.
    pub fn push(&self, path: impl Into<String>) {
        self.inner.lock().push(path);
    }

    /// Entry before the current top.
    pub fn previous(&self) -> Option<String> {
        self.inner.lock().previous().map(str::to_string)
    }

    /// Most recent entry.
    pub fn current(&self) -> Option<String> {
        self.inner.lock().current().map(str::to_string)
    }

    /// Forget everything.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Number of stored paths.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Entries, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn previous_is_second_to_last() {
        let mut history = NavigationHistory::default();
        assert_eq!(history.previous(), None);
        for path in ["/a", "/b", "/c"] {
            history.push(path);
        }
        assert_eq!(history.previous(), Some("/b"));
        assert_eq!(history.current(), Some("/c"));
    }

    #[test]
    fn single_entry_has_no_previous() {
        let mut history = NavigationHistory::default();
        history.push("/only");
        assert_eq!(history.previous(), None);
        assert_eq!(history.current(), Some("/only"));
    }

    #[test]
    fn overflow_evicts_oldest_in_order() {
        let mut history = NavigationHistory::new(50).unwrap();
        for i in 0..55 {
            history.push(format!("/p{i}"));
        }
        let expected: Vec<String> = (5..55).map(|i| format!("/p{i}")).collect();
        assert_eq!(history.len(), 50);
        assert_eq!(history.to_vec(), expected);
        assert_eq!(history.previous(), Some("/p53"));
    }

    #[test]
    fn clear_resets() {
        let mut history = NavigationHistory::new(2).unwrap();
        history.push("/a");
        history.push("/b");
        history.push("/c");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
        history.push("/d");
        assert_eq!(history.to_vec(), vec!["/d".to_string()]);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(NavigationHistory::new(0).is_err());
    }

    #[test]
    fn shared_history_hands_out_owned_values() {
        let shared = SharedHistory::with_capacity(3).unwrap();
        let other = shared.clone();
        shared.push("/a");
        other.push("/b");
        assert_eq!(shared.previous().as_deref(), Some("/a"));
        assert_eq!(other.snapshot(), vec!["/a".to_string(), "/b".to_string()]);
    }

    proptest! {
        #[test]
        fn keeps_newest_capacity_entries(capacity in 1usize..16, pushes in 0usize..64) {
            let mut history = NavigationHistory::new(capacity).unwrap();
            for i in 0..pushes {
                history.push(i.to_string());
            }
            let start = pushes.saturating_sub(capacity);
            let expected: Vec<String> = (start..pushes).map(|i| i.to_string()).collect();
            prop_assert!(history.len() <= capacity);
            prop_assert_eq!(history.to_vec(), expected);
        }
    }
}
