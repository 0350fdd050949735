//! The reels reading mode: one article at a time, narrated.
//!
//! Narration is a three-state machine with a single authoritative
//! state. Every new utterance cancels the previous one first, so the
//! single-utterance contract holds regardless of what the backend
//! does on its own.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::Article;

/// How long the play/pause indicator stays visible after a toggle.
pub const INDICATOR_FADE: Duration = Duration::from_millis(1500);

/// Port for the speech capability: one utterance at a time, global
/// cancellation. Implementations signal completion back through
/// [`ReelsEngine::on_narration_end`].
pub trait Narrator: Send + Sync {
    fn speak(&self, text: &str);
    fn cancel_all(&self);
}

/// Narrator that only logs. Stands in wherever no speech synthesizer
/// is wired up.
pub struct LoggingNarrator;

impl Narrator for LoggingNarrator {
    fn speak(&self, text: &str) {
        tracing::debug!("narrating: {}", text);
    }

    fn cancel_all(&self) {
        tracing::debug!("narration cancelled");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Speaking(usize),
    Paused,
}

pub struct ReelsEngine {
    narrator: Arc<dyn Narrator>,
    reels: Vec<Article>,
    active: usize,
    state: NarrationState,
    indicator_until: Option<Instant>,
}

impl ReelsEngine {
    pub fn new(narrator: Arc<dyn Narrator>) -> Self {
        Self {
            narrator,
            reels: Vec::new(),
            active: 0,
            state: NarrationState::Idle,
            indicator_until: None,
        }
    }

    /// Rebuild the reel sequence from an incoming collection.
    ///
    /// Articles without an image or without descriptive text are
    /// excluded here, at build time, so they never appear in the
    /// sequence rather than being skipped during playback. Narration
    /// of the first reel starts immediately when the sequence is
    /// non-empty.
    pub fn load(&mut self, articles: &[Article]) {
        self.narrator.cancel_all();
        self.reels = articles
            .iter()
            .filter(|a| a.is_reel_eligible())
            .cloned()
            .collect();
        self.active = 0;
        self.state = NarrationState::Idle;
        self.indicator_until = None;
        if !self.reels.is_empty() {
            self.speak_active();
        }
    }

    fn speak_active(&mut self) {
        // Cancel first, then speak: guarantees one utterance at a time
        self.narrator.cancel_all();
        if let Some(article) = self.reels.get(self.active) {
            self.narrator.speak(&article.narration_text());
            self.state = NarrationState::Speaking(self.active);
        }
    }

    /// Scroll-driven visibility change: a newly active reel cancels
    /// the running narration and starts its own. Same-index changes
    /// are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.reels.len() || index == self.active {
            return;
        }
        self.active = index;
        self.speak_active();
    }

    pub fn next(&mut self) {
        self.set_active(self.active + 1);
    }

    pub fn previous(&mut self) {
        if self.active > 0 {
            self.set_active(self.active - 1);
        }
    }

    /// Manual tap: Speaking pauses (cancels the utterance), Paused or
    /// Idle restarts the active reel from the beginning; narration is
    /// not resumable mid-sentence. Shows the transient indicator.
    pub fn toggle(&mut self, now: Instant) {
        self.indicator_until = Some(now + INDICATOR_FADE);
        match self.state {
            NarrationState::Speaking(_) => {
                self.narrator.cancel_all();
                self.state = NarrationState::Paused;
            }
            NarrationState::Paused | NarrationState::Idle => {
                self.speak_active();
            }
        }
    }

    /// Backend signal that the utterance ran to completion. Distinct
    /// from a manual pause: no indicator is shown.
    pub fn on_narration_end(&mut self) {
        if matches!(self.state, NarrationState::Speaking(_)) {
            self.state = NarrationState::Idle;
        }
    }

    /// Cancel in-flight narration when the reel surface goes away.
    pub fn teardown(&mut self) {
        self.narrator.cancel_all();
        self.state = NarrationState::Idle;
        self.indicator_until = None;
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, NarrationState::Speaking(_))
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_article(&self) -> Option<&Article> {
        self.reels.get(self.active)
    }

    pub fn indicator_visible(&self, now: Instant) -> bool {
        self.indicator_until.map(|until| now < until).unwrap_or(false)
    }

    pub fn reels(&self) -> &[Article] {
        &self.reels
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }
}
