use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::Result;
use crate::config::ProviderConfig;
use crate::domain::{Article, FetchKey};
use crate::provider::HeadlineProvider;

/// Countries the top-headlines capability accepts. Anything else is
/// silently replaced with [`DEFAULT_COUNTRY`]; callers must not assume
/// the country used matches the one requested.
pub const SUPPORTED_COUNTRIES: &[&str] = &["au", "br", "ca", "de", "fr", "gb", "in", "jp", "us"];

pub const DEFAULT_COUNTRY: &str = "us";

pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    base_url: Url,
    page_size: u32,
    fallback_queries: BTreeMap<String, String>,
}

impl NewsApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("gazette/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: Url::parse(&config.base_url)?,
            page_size: config.page_size,
            fallback_queries: config.fallback_queries.clone(),
        })
    }

    pub fn normalize_country(country: &str) -> &str {
        if SUPPORTED_COUNTRIES.contains(&country) {
            country
        } else {
            DEFAULT_COUNTRY
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }

    async fn top_headlines(&self, key: &FetchKey) -> Result<Vec<Article>> {
        let url = self.endpoint("top-headlines")?;
        let country = Self::normalize_country(&key.country);

        let mut params: Vec<(&str, String)> = vec![
            ("apiKey", self.api_key.clone()),
            ("country", country.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if !key.category.is_empty() {
            params.push(("category", key.category.clone()));
        }
        if !key.query.is_empty() {
            params.push(("q", key.query.clone()));
        }

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: HeadlinesResponse = response.json().await?;
        Ok(body.articles)
    }

    async fn everything(&self, query: &str) -> Result<Vec<Article>> {
        let url = self.endpoint("everything")?;

        let params: Vec<(&str, String)> = vec![
            ("apiKey", self.api_key.clone()),
            ("q", query.to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: HeadlinesResponse = response.json().await?;
        Ok(body.articles)
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiProvider {
    async fn fetch(&self, key: &FetchKey) -> Vec<Article> {
        let articles = match self.top_headlines(key).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("headline fetch failed for {}: {}", key, e);
                return Vec::new();
            }
        };

        let country = Self::normalize_country(&key.country);
        if !articles.is_empty() || country == DEFAULT_COUNTRY {
            return articles;
        }

        // One-shot broadening: top-headlines coverage for non-default
        // countries is spotty, so retry once against full-text search
        // with the configured query term. Never cascades further.
        let Some(term) = self.fallback_queries.get(country) else {
            return articles;
        };

        tracing::info!("empty headlines for {}, falling back to everything q={:?}", key, term);
        match self.everything(term).await {
            Ok(fallback) => fallback,
            Err(e) => {
                tracing::warn!("fallback fetch failed for {}: {}", key, e);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_country_passes_supported() {
        assert_eq!(NewsApiProvider::normalize_country("de"), "de");
        assert_eq!(NewsApiProvider::normalize_country("us"), "us");
    }

    #[test]
    fn test_normalize_country_substitutes_default() {
        assert_eq!(NewsApiProvider::normalize_country("zz"), "us");
        assert_eq!(NewsApiProvider::normalize_country(""), "us");
        // Case matters: codes are lowercase on the wire
        assert_eq!(NewsApiProvider::normalize_country("DE"), "us");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let mut config = ProviderConfig::default();
        config.base_url = "https://example.org/v2/".to_string();
        let provider = NewsApiProvider::new(&config).unwrap();
        assert_eq!(
            provider.endpoint("top-headlines").unwrap().as_str(),
            "https://example.org/v2/top-headlines"
        );
    }

    #[test]
    fn test_response_parses_articles() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"url": "https://example.com/a", "title": "A"},
                {"url": "https://example.com/b", "title": "B"}
            ]
        }"#;
        let body: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.articles.len(), 2);
        assert_eq!(body.articles[0].url, "https://example.com/a");
    }

    #[test]
    fn test_response_tolerates_missing_articles() {
        let body: HeadlinesResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(body.articles.is_empty());
    }

    #[test]
    fn test_default_fallback_table_covers_supported_countries() {
        let config = ProviderConfig::default();
        for country in SUPPORTED_COUNTRIES {
            if *country != DEFAULT_COUNTRY {
                assert!(
                    config.fallback_queries.contains_key(*country),
                    "missing fallback query for {}",
                    country
                );
            }
        }
    }
}
