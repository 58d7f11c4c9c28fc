//! Bidirectional mapping between caller-facing node names and adjacency-store indices.
//!
//! `rustc_hash::FxHashMap` is used throughout for the same reason `dugong-graphlib` reaches for
//! it over `std::collections::HashMap`: names are short strings hashed on every lookup, and the
//! keys never come from an untrusted network boundary so the DoS resistance of SipHash buys
//! nothing here.

use crate::node::NONE;
use rustc_hash::{FxHashMap, FxHashSet};

/// `name -> index` and `index -> name`, kept in sync by construction: every mutator either
/// updates both maps or neither. Also mirrors edge existence by name pair, so the facade can
/// reject a duplicate `add_edge` before it ever touches the adjacency store.
#[derive(Debug, Default)]
pub struct NameRegistry {
    by_name: FxHashMap<String, usize>,
    by_index: Vec<Option<String>>,
    edges_present: FxHashSet<(String, String)>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.by_index.get(index)?.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registers `name` at `index`. Caller must have already checked `!contains(name)`.
    pub fn insert(&mut self, name: &str, index: usize) {
        if index >= self.by_index.len() {
            self.by_index.resize(index + 1, None);
        }
        self.by_index[index] = Some(name.to_string());
        self.by_name.insert(name.to_string(), index);
    }

    /// Removes the entry at `index`, if any.
    pub fn remove_index(&mut self, index: usize) {
        if let Some(slot) = self.by_index.get_mut(index) {
            if let Some(name) = slot.take() {
                self.by_name.remove(&name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_index.iter().filter_map(|s| s.as_deref())
    }

    pub fn edge_present(&self, src: &str, dst: &str) -> bool {
        self.edges_present.contains(&(src.to_string(), dst.to_string()))
    }

    pub fn mark_edge_present(&mut self, src: &str, dst: &str) {
        self.edges_present.insert((src.to_string(), dst.to_string()));
    }

    pub fn unmark_edge_present(&mut self, src: &str, dst: &str) {
        self.edges_present.remove(&(src.to_string(), dst.to_string()));
    }

    /// Renumbers every entry according to `mapping` (as returned by
    /// `store::AdjacencyStore::compact_nodes`), dropping entries whose old index maps to
    /// `node::NONE`.
    pub fn remap(&mut self, mapping: &[usize]) {
        let mut new_by_index = vec![None; self.by_index.len()];
        for (old_ix, name) in self.by_index.iter().enumerate() {
            let Some(name) = name else { continue };
            let new_ix = mapping[old_ix];
            if new_ix == NONE {
                continue;
            }
            if new_ix >= new_by_index.len() {
                new_by_index.resize(new_ix + 1, None);
            }
            new_by_index[new_ix] = Some(name.clone());
        }
        new_by_index.truncate(mapping.iter().filter(|&&m| m != NONE).count());

        self.by_name.clear();
        for (ix, name) in new_by_index.iter().enumerate() {
            if let Some(name) = name {
                self.by_name.insert(name.clone(), ix);
            }
        }
        self.by_index = new_by_index;
    }
}
