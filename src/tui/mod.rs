pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new(ctx);
    let event_handler = EventHandler::new(Duration::from_millis(100));

    // Initial load for the startup parameters
    app.controller.sync().await;
    app.after_publish();

    loop {
        terminal.draw(|frame| layout::render(frame, &app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if app.search_input.is_some() {
                    match key.code {
                        KeyCode::Enter => app.submit_search(),
                        KeyCode::Esc => app.cancel_search(),
                        KeyCode::Backspace => app.pop_search_char(),
                        KeyCode::Char(c) => app.push_search_char(c),
                        _ => {}
                    }
                } else {
                    app.clear_status();
                    handle_action(&mut app, Action::from(key));
                }
            }
            AppEvent::Tick => {}
        }

        if app.needs_refresh {
            app.needs_refresh = false;
            app.controller.refresh().await;
            app.after_publish();
            app.set_status("Refreshed".to_string());
        }

        if app.needs_sync {
            app.needs_sync = false;
            app.controller.sync().await;
            app.after_publish();
        }

        if app.should_quit {
            app.reels.teardown();
            return Ok(());
        }
    }
}

fn handle_action(app: &mut TuiApp, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::NextPage => app.next_page(),
        Action::PrevPage => app.prev_page(),
        Action::NextCategory => app.next_category(),
        Action::PrevCategory => app.prev_category(),
        Action::NextView => app.next_view(),
        Action::ToggleBookmark => app.toggle_bookmark(),
        Action::OpenInBrowser => app.open_selected(),
        Action::Refresh => app.needs_refresh = true,
        Action::Search => app.start_search(),
        Action::ToggleNarration => app.toggle_narration(),
        Action::ToggleTheme => app.toggle_theme(),
        Action::None => {}
    }
}
