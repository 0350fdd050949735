//! # Gazette
//!
//! A terminal-first news reader: category and search browsing of
//! headlines, a narrated "reels" reading mode, bookmarks, and feed
//! analytics.
//!
//! ## Architecture
//!
//! Gazette is built around one shared article collection:
//!
//! ```text
//! Provider → Cache → FeedController → { grid, reels, analytics }
//! ```
//!
//! - [`provider`]: HTTP adapter for the headline API, with a
//!   country allowlist and a one-shot full-text fallback
//! - [`feed`]: fetch-parameter state machine, article cache,
//!   pagination
//! - [`reels`]: narrated reading mode as an explicit state machine
//! - [`analytics`]: pure aggregation (words, sources, days)
//! - [`bookmarks`]: persistent bookmark set keyed by URL
//! - [`store`]: key-value persistence on SQLite
//!
//! ## Quick Start
//!
//! ```bash
//! # Print a page of technology headlines
//! gazette headlines --category technology
//!
//! # Search
//! gazette search "rust language"
//!
//! # Launch the TUI
//! gazette tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all
/// services: kv store, headline provider, preferences.
pub mod app;

/// Pure aggregation over article collections: word frequencies,
/// source/category distributions, 7-day series.
pub mod analytics;

/// Persistent bookmark set with toggle-by-URL semantics.
pub mod bookmarks;

/// Command-line interface using clap.
///
/// Subcommands: `headlines`, `search`, `bookmarks`, `analytics`,
/// `tui`.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gazette/config.toml`: provider credentials,
/// fallback query table, feed defaults.
pub mod config;

/// Core domain models: [`Article`](domain::Article) and the
/// [`FetchKey`](domain::FetchKey) cache key.
pub mod domain;

/// Feed orchestration: parameter state machine, cache consultation,
/// stale-response guard, pagination.
pub mod feed;

/// Persisted theme and country preferences.
pub mod prefs;

/// Headline provider port and the NewsAPI-style adapter.
pub mod provider;

/// The narrated reels reading mode.
pub mod reels;

/// Key-value persistence layer on SQLite.
pub mod store;

/// Terminal user interface built with ratatui.
///
/// Views: Headlines, Reels, Bookmarks, Analytics. Keybindings:
/// j/k navigate, n/p pages, c cycles categories, `/` searches,
/// b bookmarks, Space toggles narration, q quits.
pub mod tui;
