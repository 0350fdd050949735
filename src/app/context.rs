use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GazetteError, Result};
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::feed::FeedController;
use crate::prefs::Preferences;
use crate::provider::{HeadlineProvider, NewsApiProvider};
use crate::store::SqliteKvStore;

/// Wires the services together: one kv store, one provider, one set
/// of preferences, constructed once at startup and handed to
/// consumers by reference.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteKvStore>,
    pub provider: Arc<dyn HeadlineProvider>,
    pub prefs: Preferences,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteKvStore::new(&db_path)?);
        Self::with_store(store, config)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteKvStore::in_memory()?);
        Self::with_store(store, config)
    }

    fn with_store(store: Arc<SqliteKvStore>, config: Config) -> Result<Self> {
        let provider: Arc<dyn HeadlineProvider> = Arc::new(NewsApiProvider::new(&config.provider)?);
        let prefs = Preferences::new(store.clone());

        Ok(Self {
            config,
            store,
            provider,
            prefs,
        })
    }

    /// A feed controller seeded with the persisted country preference
    /// and the configured defaults.
    pub fn controller(&self) -> FeedController {
        let country = self.prefs.country(&self.config.feed.default_country);
        let mut controller = FeedController::with_page_size(
            self.provider.clone(),
            &country,
            self.config.feed.page_size,
        );
        controller.set_category(&self.config.feed.default_category);
        controller
    }

    pub fn bookmarks(&self) -> BookmarkStore {
        BookmarkStore::load(self.store.clone())
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GazetteError::Config("Could not find data directory".into()))?;
        let gazette_dir = data_dir.join("gazette");
        std::fs::create_dir_all(&gazette_dir)?;
        Ok(gazette_dir.join("gazette.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_context_wires_services() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();

        let controller = ctx.controller();
        assert_eq!(controller.category(), "general");
        assert_eq!(controller.country(), "us");

        assert!(ctx.bookmarks().is_empty());
    }

    #[test]
    fn test_controller_picks_up_country_preference() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        ctx.prefs.set_country("de");

        let controller = ctx.controller();
        assert_eq!(controller.country(), "de");
    }
}
