use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One headline as returned by the provider.
///
/// `url` is the sole identity key: bookmarking, deduplication and
/// "same article" comparisons all go through it. Two articles with
/// equal URLs are the same article even when the provider has edited
/// the other fields between fetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url_to_image: Option<String>,
    pub source: Option<Source>,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Article {
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("General")
    }

    /// First non-empty of description/content. The provider sends
    /// empty strings as well as nulls; both count as absent.
    pub fn text_body(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.content.as_deref().filter(|s| !s.trim().is_empty()))
    }

    pub fn has_image(&self) -> bool {
        self.url_to_image
            .as_deref()
            .map(|u| !u.is_empty())
            .unwrap_or(false)
    }

    /// Reel eligibility: an image plus some descriptive text.
    pub fn is_reel_eligible(&self) -> bool {
        self.has_image() && self.text_body().is_some()
    }

    /// Text handed to the narrator: title, then body, with HTML
    /// entities decoded so the narrator is never given `&amp;`-style
    /// artifacts to read out.
    pub fn narration_text(&self) -> String {
        let body = self.text_body().unwrap_or("");
        let raw = format!("{}. {}", self.title, body);
        html_escape::decode_html_entities(raw.trim_end()).into_owned()
    }
}
