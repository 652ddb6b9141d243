//! Route table: path prefix → requirements.

use routeguard_core::platform::{prefix_matches, strip_query};
use routeguard_core::{RouteEntry, RouteRequirements};

use crate::gate::AccessGate;

/// Requirements per route, matched by longest path prefix.
///
/// Paths no entry matches are public.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table from configured entries.
    pub fn from_entries(entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.path, entry.requirements);
        }
        table
    }

    /// Add or replace the requirements for `path`.
    pub fn insert(&mut self, path: impl Into<String>, requirements: RouteRequirements) {
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => entry.requirements = requirements,
            None => self.entries.push(RouteEntry { path, requirements }),
        }
    }

    /// Builder form of `insert`.
    pub fn route(mut self, path: impl Into<String>, requirements: RouteRequirements) -> Self {
        self.insert(path, requirements);
        self
    }

    /// Entry governing `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        let path = strip_query(path);
        self.entries
            .iter()
            .filter(|entry| prefix_matches(&entry.path, path))
            .max_by_key(|entry| entry.path.trim_end_matches('/').len())
    }

    /// Requirements governing `path`; public when unmatched.
    pub fn requirements_for(&self, path: &str) -> RouteRequirements {
        self.lookup(path)
            .map(|entry| entry.requirements.clone())
            .unwrap_or_else(RouteRequirements::public)
    }

    /// Fresh gate for `path`.
    pub fn gate(&self, path: &str) -> AccessGate {
        AccessGate::new(path, self.requirements_for(path))
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no routes are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
