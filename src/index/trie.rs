//! Prefix tree over document titles
//!
//! Terms are keyed by their lower-cased characters; the terminal node keeps
//! the original casing so suggestions come back exactly as the title was
//! stored. The structure is an acyclic ownership tree rooted at `Trie.root`.

use std::collections::HashMap;

/// A single node in the prefix tree
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Set when a complete term ends at this node
    is_terminal: bool,
    /// The original (non-lowered) term; present iff `is_terminal`
    value: Option<String>,
}

/// Prefix index supporting insert, membership, and bounded enumeration
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Creates an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms stored
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no terms have been inserted
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a term, keyed case-insensitively
    ///
    /// Re-inserting an existing term is idempotent.
    pub fn insert(&mut self, term: &str) {
        let mut current = &mut self.root;
        for ch in term.to_lowercase().chars() {
            current = current.children.entry(ch).or_default();
        }
        if !current.is_terminal {
            self.len += 1;
        }
        current.is_terminal = true;
        current.value = Some(term.to_string());
    }

    /// Returns true iff the exact term (case-insensitive) was inserted
    pub fn contains(&self, term: &str) -> bool {
        match self.walk(term) {
            Some(node) => node.is_terminal,
            None => false,
        }
    }

    /// Collects up to `limit` stored terms starting with `prefix`
    ///
    /// An absent prefix path yields an empty result. The count is capped
    /// strictly at `limit`; enumeration order within the subtree is
    /// unspecified.
    pub fn autocomplete(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut results = Vec::new();

        if limit == 0 {
            return results;
        }

        if let Some(node) = self.walk(prefix) {
            Self::collect(node, limit, &mut results);
        }

        results
    }

    /// Walks the lower-cased key path, returning the node it ends at
    fn walk(&self, term: &str) -> Option<&TrieNode> {
        let mut current = &self.root;
        for ch in term.to_lowercase().chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    /// Depth-first collection of terminal values under a node
    ///
    /// Descends past terminal nodes so longer terms sharing a prefix with a
    /// shorter stored term are still reachable.
    fn collect(node: &TrieNode, limit: usize, results: &mut Vec<String>) {
        if results.len() >= limit {
            return;
        }

        if node.is_terminal {
            if let Some(value) = &node.value {
                results.push(value.clone());
            }
        }

        for child in node.children.values() {
            if results.len() >= limit {
                return;
            }
            Self::collect(child, limit, results);
        }
    }
}
