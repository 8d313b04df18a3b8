//! Accumulated facts and per-topic beliefs.
//!
//! Facts are a deduplicated set (insertion order irrelevant); beliefs are a
//! keyed map with unique topics. Both are written every turn and currently
//! not consulted by prompt composition.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    facts: HashSet<String>,
    beliefs: HashMap<String, String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent set insertion.
    pub fn add_fact(&mut self, fact: impl Into<String>) {
        self.facts.insert(fact.into());
    }

    pub fn contains_fact(&self, fact: &str) -> bool {
        self.facts.contains(fact)
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn facts(&self) -> impl Iterator<Item = &str> {
        self.facts.iter().map(String::as_str)
    }

    /// Record a belief about `topic`; topics are unique, last write wins.
    pub fn add_belief(&mut self, topic: impl Into<String>, belief: impl Into<String>) {
        self.beliefs.insert(topic.into(), belief.into());
    }

    pub fn belief(&self, topic: &str) -> Option<&str> {
        self.beliefs.get(topic).map(String::as_str)
    }
}
