//! Visited-namespace cache for one resolution call
//!
//! The cache lives on the stack of a single top-level call and is threaded
//! through the recursive import path. It is never shared between calls.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeSet;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Namespaces loaded during the call
    pub loaded: usize,
    /// Load requests answered by the cache
    pub hits: usize,
}

/// Set of namespaces already loaded during one resolution call
#[derive(Debug, Default)]
pub struct ImportCache {
    visited: BTreeSet<String>,
    hits: usize,
}

impl ImportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a namespace as loaded. Returns `false` if it was already visited.
    pub fn begin(&mut self, namespace: &str) -> bool {
        if self.visited.contains(namespace) {
            self.hits += 1;
            return false;
        }
        self.visited.insert(namespace.to_string());
        true
    }

    /// Loaded namespaces in sorted order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            loaded: self.visited.len(),
            hits: self.hits,
        }
    }
}
