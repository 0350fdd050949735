//! Feed orchestration: fetch parameters, cache consultation,
//! publication, pagination.
//!
//! The controller is an explicit state machine. Parameter setters only
//! mutate state; [`FeedController::sync`] owns the decision to serve
//! from cache or go to the provider, and every completed fetch passes
//! through the stale-response guard in [`FeedController::complete`]
//! before it is published.

pub mod cache;

use std::sync::Arc;

use crate::domain::{Article, FetchKey};
use crate::provider::HeadlineProvider;

pub use cache::ArticleCache;

/// Category vocabulary offered by the UI. "general" is the default
/// mode and renders as "Top Headlines".
pub const CATEGORIES: &[&str] = &[
    "general",
    "business",
    "technology",
    "sports",
    "entertainment",
    "health",
    "science",
];

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One entry in the pagination footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// Windowed page display: first and last page always shown, a
/// contiguous window around the current page, and any gap wider than
/// one page collapsed into a single ellipsis. A gap of exactly one
/// page is shown as the page itself.
pub fn page_window(total: usize, current: usize) -> Vec<PageEntry> {
    if total == 0 {
        return Vec::new();
    }

    let mut marks = vec![1, total];
    for page in current.saturating_sub(1)..=current + 1 {
        if (1..=total).contains(&page) {
            marks.push(page);
        }
    }
    marks.sort_unstable();
    marks.dedup();

    let mut entries = Vec::new();
    let mut prev = 0;
    for &page in &marks {
        match page - prev {
            1 => {}
            2 => entries.push(PageEntry::Page(prev + 1)),
            _ => entries.push(PageEntry::Ellipsis),
        }
        entries.push(PageEntry::Page(page));
        prev = page;
    }
    entries
}

pub struct FeedController {
    provider: Arc<dyn HeadlineProvider>,
    cache: ArticleCache,
    category: String,
    query: String,
    country: String,
    page: usize,
    page_size: usize,
    require_image: bool,
    articles: Vec<Article>,
    loaded: bool,
}

impl FeedController {
    pub fn new(provider: Arc<dyn HeadlineProvider>, country: &str) -> Self {
        Self::with_page_size(provider, country, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(
        provider: Arc<dyn HeadlineProvider>,
        country: &str,
        page_size: usize,
    ) -> Self {
        Self {
            provider,
            cache: ArticleCache::new(),
            category: "general".to_string(),
            query: String::new(),
            country: country.to_string(),
            page: 1,
            page_size,
            require_image: false,
            articles: Vec::new(),
            loaded: false,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the category filter. A non-empty category clears any search
    /// query: the two are mutually exclusive modes. Resets to page 1.
    /// Returns whether the fetch parameters changed.
    pub fn set_category(&mut self, category: &str) -> bool {
        if self.category == category && self.query.is_empty() {
            return false;
        }
        self.category = category.to_string();
        if !self.category.is_empty() {
            self.query.clear();
        }
        self.page = 1;
        true
    }

    /// Set the free-text query. A non-empty query clears the category.
    /// Resets to page 1. Returns whether the fetch parameters changed.
    pub fn set_search_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        if !self.query.is_empty() {
            self.category.clear();
        }
        self.page = 1;
        true
    }

    pub fn set_country(&mut self, country: &str) -> bool {
        if self.country == country {
            return false;
        }
        self.country = country.to_string();
        self.page = 1;
        true
    }

    pub fn current_key(&self) -> FetchKey {
        FetchKey::new(&self.category, &self.query, &self.country)
    }

    /// Run one fetch cycle for the current parameters: a cache hit
    /// publishes immediately with no provider call; a miss goes to the
    /// provider and stores the result under the key.
    pub async fn sync(&mut self) {
        let key = self.current_key();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("cache hit for {}", key);
            let articles = cached.to_vec();
            self.complete(key, articles);
            return;
        }

        let articles = self.provider.fetch(&key).await;
        self.cache.put(key.clone(), articles.clone());
        self.complete(key, articles);
    }

    /// User-triggered reload: always calls the provider, overwrites
    /// the cache entry for the current key, and republishes.
    pub async fn refresh(&mut self) {
        let key = self.current_key();
        let articles = self.provider.fetch(&key).await;
        self.cache.put(key.clone(), articles.clone());
        self.complete(key, articles);
    }

    /// Publish a completed fetch. A response whose originating key no
    /// longer matches the active parameters was superseded by a newer
    /// request; it is discarded, never published.
    pub fn complete(&mut self, key: FetchKey, articles: Vec<Article>) {
        if key != self.current_key() {
            tracing::debug!("discarding stale response for {}", key);
            return;
        }
        tracing::info!("published {} articles for {}", articles.len(), key);
        self.articles = articles;
        self.loaded = true;
    }

    /// Whether any fetch cycle has published yet. Lets surfaces
    /// distinguish "still loading" from a first-class empty result.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The full current collection, provider rank order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Require a thumbnail image on every listed article. The filter
    /// applies before pagination, so page counts follow it.
    pub fn set_require_image(&mut self, require: bool) {
        if self.require_image != require {
            self.require_image = require;
            self.page = 1;
        }
    }

    /// Collection after the optional image filter; relative order is
    /// preserved.
    pub fn visible(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| !self.require_image || a.has_image())
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    /// Move to a page, clamped into the valid range.
    pub fn set_page(&mut self, page: usize) {
        let max = self.total_pages().max(1);
        self.page = page.clamp(1, max);
    }

    /// The slice of the filtered collection for the current page.
    pub fn current_page(&self) -> Vec<Article> {
        let start = (self.page - 1) * self.page_size;
        self.visible()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect()
    }

    pub fn page_window(&self) -> Vec<PageEntry> {
        page_window(self.total_pages(), self.page)
    }
}
