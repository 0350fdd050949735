use std::collections::HashMap;

use crate::domain::{Article, FetchKey};

/// Session-scoped cache of fetched collections, keyed by the full
/// fetch-parameter tuple.
///
/// Unbounded on purpose: one entry per distinct key a user visits in a
/// session. A present-but-empty collection is a hit, not a miss; a
/// legitimately empty result must not be re-fetched on every access.
#[derive(Debug, Default)]
pub struct ArticleCache {
    entries: HashMap<FetchKey, Vec<Article>>,
}

impl ArticleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &FetchKey) -> Option<&[Article]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn put(&mut self, key: FetchKey, articles: Vec<Article>) {
        self.entries.insert(key, articles);
    }

    pub fn contains(&self, key: &FetchKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
