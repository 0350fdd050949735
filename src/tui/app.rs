use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{self, DayCount, LabelCount};
use crate::app::AppContext;
use crate::bookmarks::BookmarkStore;
use crate::domain::Article;
use crate::feed::{FeedController, CATEGORIES};
use crate::prefs::Theme;
use crate::reels::{LoggingNarrator, ReelsEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Headlines,
    Reels,
    Bookmarks,
    Analytics,
}

impl View {
    pub const ALL: [View; 4] = [View::Headlines, View::Reels, View::Bookmarks, View::Analytics];

    pub fn next(self) -> Self {
        match self {
            View::Headlines => View::Reels,
            View::Reels => View::Bookmarks,
            View::Bookmarks => View::Analytics,
            View::Analytics => View::Headlines,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Headlines => "Headlines",
            View::Reels => "Reels",
            View::Bookmarks => "Bookmarks",
            View::Analytics => "Analytics",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

pub struct TuiApp {
    pub ctx: Arc<AppContext>,
    pub view: View,
    pub controller: FeedController,
    pub bookmarks: BookmarkStore,
    pub reels: ReelsEngine,
    pub theme: Theme,
    pub selected: usize,
    pub search_input: Option<String>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub needs_sync: bool,
    pub needs_refresh: bool,
    pub sources: Vec<LabelCount>,
    pub keywords: Vec<LabelCount>,
    pub week: Vec<DayCount>,
}

impl TuiApp {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let controller = ctx.controller();
        let bookmarks = ctx.bookmarks();
        let theme = ctx.prefs.theme();
        Self {
            ctx,
            view: View::Headlines,
            controller,
            bookmarks,
            reels: ReelsEngine::new(Arc::new(LoggingNarrator)),
            theme,
            selected: 0,
            search_input: None,
            status_message: None,
            should_quit: false,
            needs_sync: false,
            needs_refresh: false,
            sources: Vec::new(),
            keywords: Vec::new(),
            week: Vec::new(),
        }
    }

    pub fn category_index(&self) -> usize {
        CATEGORIES
            .iter()
            .position(|c| *c == self.controller.category())
            .unwrap_or(0)
    }

    pub fn next_category(&mut self) {
        let index = (self.category_index() + 1) % CATEGORIES.len();
        if self.controller.set_category(CATEGORIES[index]) {
            self.selected = 0;
            self.needs_sync = true;
        }
    }

    pub fn prev_category(&mut self) {
        let index = (self.category_index() + CATEGORIES.len() - 1) % CATEGORIES.len();
        if self.controller.set_category(CATEGORIES[index]) {
            self.selected = 0;
            self.needs_sync = true;
        }
    }

    pub fn move_up(&mut self) {
        match self.view {
            View::Headlines | View::Bookmarks => {
                self.selected = self.selected.saturating_sub(1);
            }
            View::Reels => self.reels.previous(),
            View::Analytics => {}
        }
    }

    pub fn move_down(&mut self) {
        let len = match self.view {
            View::Headlines => self.controller.current_page().len(),
            View::Bookmarks => self.bookmarks.len(),
            View::Reels => {
                self.reels.next();
                return;
            }
            View::Analytics => return,
        };
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.view == View::Headlines {
            self.controller.set_page(self.controller.page() + 1);
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.view == View::Headlines {
            self.controller.set_page(self.controller.page().saturating_sub(1));
            self.selected = 0;
        }
    }

    pub fn selected_article(&self) -> Option<Article> {
        match self.view {
            View::Headlines => self.controller.current_page().get(self.selected).cloned(),
            View::Bookmarks => self.bookmarks.all().get(self.selected).cloned(),
            View::Reels => self.reels.active_article().cloned(),
            View::Analytics => None,
        }
    }

    pub fn toggle_bookmark(&mut self) {
        let Some(article) = self.selected_article() else {
            return;
        };
        let added = self.bookmarks.toggle(&article);
        self.status_message = Some(if added {
            format!("Bookmarked: {}", article.title)
        } else {
            format!("Removed bookmark: {}", article.title)
        });
        if self.view == View::Bookmarks && self.selected >= self.bookmarks.len() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn open_selected(&mut self) {
        let Some(article) = self.selected_article() else {
            return;
        };
        if let Err(e) = open::that(&article.url) {
            self.status_message = Some(format!("Failed to open browser: {}", e));
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.ctx.prefs.set_theme(self.theme);
    }

    pub fn next_view(&mut self) {
        if self.view == View::Reels {
            self.reels.teardown();
        }
        self.view = self.view.next();
        self.selected = 0;
        match self.view {
            View::Reels => self.reels.load(self.controller.articles()),
            View::Analytics => self.refresh_analytics(),
            _ => {}
        }
    }

    pub fn refresh_analytics(&mut self) {
        let articles = self.controller.articles();
        self.sources = analytics::source_distribution(articles);
        self.keywords = analytics::word_frequencies(articles);
        self.week = analytics::daily_counts(articles, chrono::Utc::now().date_naive());
    }

    /// Bring view state in line with a freshly published collection.
    pub fn after_publish(&mut self) {
        self.controller.set_page(self.controller.page());
        self.selected = 0;
        match self.view {
            View::Reels => self.reels.load(self.controller.articles()),
            View::Analytics => self.refresh_analytics(),
            _ => {}
        }
    }

    pub fn start_search(&mut self) {
        self.search_input = Some(String::new());
    }

    pub fn cancel_search(&mut self) {
        self.search_input = None;
    }

    pub fn push_search_char(&mut self, c: char) {
        if let Some(query) = &mut self.search_input {
            query.push(c);
        }
    }

    pub fn pop_search_char(&mut self) {
        if let Some(query) = &mut self.search_input {
            query.pop();
        }
    }

    pub fn submit_search(&mut self) {
        if let Some(query) = self.search_input.take() {
            let query = query.trim().to_string();
            // An empty submission leaves search mode entirely
            let changed = if query.is_empty() {
                self.controller.set_category("general")
            } else {
                self.controller.set_search_query(&query)
            };
            if changed {
                self.selected = 0;
                self.needs_sync = true;
            }
        }
    }

    pub fn toggle_narration(&mut self) {
        if self.view == View::Reels {
            self.reels.toggle(Instant::now());
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app() -> TuiApp {
        TuiApp::new(Arc::new(AppContext::in_memory(Config::default()).unwrap()))
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut app = app();
        assert_eq!(app.category_index(), 0);

        app.prev_category();
        assert_eq!(app.controller.category(), "science");

        app.next_category();
        assert_eq!(app.controller.category(), "general");
    }

    #[test]
    fn test_category_change_requests_sync() {
        let mut app = app();
        app.next_category();
        assert!(app.needs_sync);
        assert_eq!(app.controller.category(), "business");
    }

    #[test]
    fn test_search_input_lifecycle() {
        let mut app = app();
        app.start_search();
        for c in "rust".chars() {
            app.push_search_char(c);
        }
        app.pop_search_char();
        app.submit_search();

        assert_eq!(app.controller.query(), "rus");
        assert_eq!(app.controller.category(), "");
        assert!(app.needs_sync);
        assert!(app.search_input.is_none());
    }

    #[test]
    fn test_view_cycle_returns_home() {
        let mut app = app();
        for _ in 0..View::ALL.len() {
            app.next_view();
        }
        assert_eq!(app.view, View::Headlines);
    }
}
