//! Persisted user preferences: theme and country.
//!
//! Both are read once at startup and written back synchronously on
//! every change. A failed write is logged and the in-memory value
//! stays authoritative for the session.

use std::sync::Arc;

use crate::store::{keys, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub struct Preferences {
    kv: Arc<dyn KvStore>,
}

impl Preferences {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn theme(&self) -> Theme {
        match self.kv.get(keys::THEME) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.kv.set(keys::THEME, theme.as_str()) {
            tracing::error!("failed to persist theme preference: {}", e);
        }
    }

    pub fn country(&self, default: &str) -> String {
        match self.kv.get(keys::COUNTRY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => default.to_string(),
            Err(e) => {
                tracing::warn!("failed to read country preference: {}", e);
                default.to_string()
            }
        }
    }

    pub fn set_country(&self, country: &str) {
        if let Err(e) = self.kv.set(keys::COUNTRY, country) {
            tracing::error!("failed to persist country preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteKvStore;

    #[test]
    fn test_theme_defaults_to_light() {
        let prefs = Preferences::new(Arc::new(SqliteKvStore::in_memory().unwrap()));
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_round_trip() {
        let prefs = Preferences::new(Arc::new(SqliteKvStore::in_memory().unwrap()));
        prefs.set_theme(Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_value_falls_back() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        kv.set(keys::THEME, "solarized").unwrap();
        let prefs = Preferences::new(kv);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_country_round_trip_with_default() {
        let prefs = Preferences::new(Arc::new(SqliteKvStore::in_memory().unwrap()));
        assert_eq!(prefs.country("us"), "us");
        prefs.set_country("de");
        assert_eq!(prefs.country("us"), "de");
    }

    #[test]
    fn test_theme_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
