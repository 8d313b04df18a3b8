//! Session memory: a bounded window of recent user inputs plus an unbounded
//! long-term fact store.
//!
//! The short-term window is strict FIFO with capacity [`SHORT_TERM_CAPACITY`];
//! the long-term store is keyed, last write wins. Both are total functions
//! over their inputs with no failure modes.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// Number of recent inputs retained verbatim; older entries are evicted FIFO.
pub const SHORT_TERM_CAPACITY: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryBank {
    short_term: VecDeque<String>,
    long_term: HashMap<String, String>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a recent input, evicting the oldest entry past capacity.
    pub fn remember(&mut self, item: impl Into<String>) {
        self.short_term.push_back(item.into());
        while self.short_term.len() > SHORT_TERM_CAPACITY {
            self.short_term.pop_front();
        }
    }

    /// Recent inputs, most recent last.
    pub fn recall(&self) -> impl Iterator<Item = &str> {
        self.short_term.iter().map(String::as_str)
    }

    /// Store a long-term fact under `key`; last write wins.
    pub fn store_fact(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.long_term.insert(key.into(), value.into());
    }

    /// Look up a long-term fact by key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.long_term.get(key).map(String::as_str)
    }
}
