use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    NextCategory,
    PrevCategory,
    NextView,
    ToggleBookmark,
    OpenInBrowser,
    Refresh,
    Search,
    ToggleNarration,
    ToggleTheme,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Char('c') => Action::NextCategory,
            KeyCode::Char('C') => Action::PrevCategory,
            KeyCode::Tab => Action::NextView,
            KeyCode::Char('b') => Action::ToggleBookmark,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('R') => Action::Refresh,
            KeyCode::Char('/') => Action::Search,
            KeyCode::Char(' ') => Action::ToggleNarration,
            KeyCode::Char('t') => Action::ToggleTheme,
            _ => Action::None,
        }
    }
}
