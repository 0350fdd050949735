//! Persistent set of bookmarked articles, keyed by URL.
//!
//! The full article is stored, not just the URL, so a bookmark stays
//! displayable after the provider's feed has moved on. Every toggle
//! writes the whole set back before returning; a failed write is
//! logged and the in-memory set stays authoritative for the session.

use std::sync::Arc;

use crate::domain::Article;
use crate::store::{keys, KvStore};

pub struct BookmarkStore {
    kv: Arc<dyn KvStore>,
    articles: Vec<Article>,
}

impl BookmarkStore {
    /// Load the persisted set. An unreadable or corrupt set degrades
    /// to empty rather than failing startup.
    pub fn load(kv: Arc<dyn KvStore>) -> Self {
        let articles = match kv.get(keys::BOOKMARKS) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(articles) => articles,
                Err(e) => {
                    tracing::warn!("discarding unreadable bookmark set: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read bookmarks: {}", e);
                Vec::new()
            }
        };
        Self { kv, articles }
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.articles.iter().any(|a| a.url == url)
    }

    /// Toggle membership by URL: an article already in the set is
    /// removed, anything else is added. Returns whether the article is
    /// bookmarked after the call.
    pub fn toggle(&mut self, article: &Article) -> bool {
        let bookmarked = if self.is_bookmarked(&article.url) {
            self.articles.retain(|a| a.url != article.url);
            false
        } else {
            self.articles.push(article.clone());
            true
        };
        self.persist();
        bookmarked
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.articles) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("failed to serialize bookmark set: {}", e);
                return;
            }
        };
        if let Err(e) = self.kv.set(keys::BOOKMARKS, &serialized) {
            tracing::error!("bookmark write failed, keeping in-memory set: {}", e);
        }
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{GazetteError, Result};
    use crate::store::SqliteKvStore;

    fn article(url: &str, title: &str) -> Article {
        Article {
            url: url.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_is_idempotent_pairwise() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        let mut store = BookmarkStore::load(kv);
        let a = article("https://example.com/a", "A");

        store.toggle(&a);
        store.toggle(&a);

        assert_eq!(store.len(), 0);
        assert!(!store.is_bookmarked(&a.url));
    }

    #[test]
    fn test_identity_is_the_url() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        let mut store = BookmarkStore::load(kv);

        let original = article("https://example.com/a", "Original title");
        let edited = article("https://example.com/a", "Edited title");

        assert!(store.toggle(&original));
        // Same URL, different title: same bookmark
        assert!(store.is_bookmarked(&edited.url));
        assert!(!store.toggle(&edited));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        let mut store = BookmarkStore::load(kv);
        let a = article("https://example.com/a", "A");
        let b = article("https://example.com/b", "B");

        store.toggle(&a);
        store.toggle(&b);
        store.toggle(&a);
        store.toggle(&a);

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_survives_reload() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());

        let mut store = BookmarkStore::load(kv.clone());
        store.toggle(&article("https://example.com/a", "A"));
        store.toggle(&article("https://example.com/b", "B"));

        let reloaded = BookmarkStore::load(kv);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.is_bookmarked("https://example.com/a"));
        assert_eq!(reloaded.all()[1].title, "B");
    }

    #[test]
    fn test_corrupt_persisted_set_degrades_to_empty() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        kv.set(keys::BOOKMARKS, "not json").unwrap();

        let store = BookmarkStore::load(kv);
        assert!(store.is_empty());
    }

    struct FailingKv;

    impl KvStore for FailingKv {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(GazetteError::Other("disk full".to_string()))
        }
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut store = BookmarkStore::load(Arc::new(FailingKv));
        let a = article("https://example.com/a", "A");

        assert!(store.toggle(&a));
        assert!(store.is_bookmarked(&a.url));
        assert_eq!(store.len(), 1);
    }
}
