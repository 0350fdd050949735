pub mod newsapi;

use async_trait::async_trait;

use crate::domain::{Article, FetchKey};

pub use newsapi::NewsApiProvider;

/// Port for the external headline capability.
///
/// Implementations own the degrade-to-empty policy: transport and
/// provider failures come back as an empty collection, never as an
/// error the feed has to handle. An empty result is a first-class
/// state, not a failure.
#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    async fn fetch(&self, key: &FetchKey) -> Vec<Article>;
}
