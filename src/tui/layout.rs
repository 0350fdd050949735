use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::feed::{PageEntry, CATEGORIES};
use crate::prefs::Theme;
use crate::reels::NarrationState;
use crate::tui::app::{TuiApp, View};

struct Palette {
    accent: Color,
    dim: Color,
    selection_fg: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            accent: Color::Blue,
            dim: Color::DarkGray,
            selection_fg: Color::White,
        },
        Theme::Dark => Palette {
            accent: Color::Cyan,
            dim: Color::DarkGray,
            selection_fg: Color::Black,
        },
    }
}

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // View tabs
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.view {
        View::Headlines => render_headlines(frame, app, chunks[1]),
        View::Reels => render_reels(frame, app, chunks[1]),
        View::Bookmarks => render_bookmarks(frame, app, chunks[1]),
        View::Analytics => render_analytics(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);
    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(v.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .highlight_style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" gazette "));
    frame.render_widget(tabs, area);
}

fn render_headlines(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category line
            Constraint::Min(3),    // Article list
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    render_category_line(frame, app, chunks[0]);
    render_article_list(frame, app, chunks[1]);
    render_pagination(frame, app, chunks[2]);
}

fn render_category_line(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    let line = if app.controller.category().is_empty() {
        Line::from(vec![
            Span::raw(" Search: "),
            Span::styled(
                format!("{:?}", app.controller.query()),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let mut spans = vec![Span::raw(" ")];
        for category in CATEGORIES {
            let style = if *category == app.controller.category() {
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.dim)
            };
            spans.push(Span::styled(*category, style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_article_list(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    if !app.controller.is_loaded() {
        let loading = Paragraph::new("Loading…").alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    let articles = app.controller.current_page();
    if articles.is_empty() {
        let empty = Paragraph::new("No articles found").alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let marker = if app.bookmarks.is_bookmarked(&article.url) {
                "★ "
            } else {
                "  "
            };
            let date = article
                .published_at
                .map(|d| d.format("%m-%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let style = if i == app.selected {
                Style::default()
                    .bg(colors.accent)
                    .fg(colors.selection_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::raw(marker),
                Span::styled(date, Style::default().fg(colors.dim)),
                Span::raw(" "),
                Span::styled(
                    format!("[{}] ", article.source_name()),
                    Style::default().fg(colors.dim),
                ),
                Span::raw(article.title.clone()),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_pagination(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);
    let total = app.controller.total_pages();
    if total <= 1 {
        return;
    }

    let mut spans = vec![Span::raw(" ")];
    for entry in app.controller.page_window() {
        match entry {
            PageEntry::Page(p) if p == app.controller.page() => {
                spans.push(Span::styled(
                    format!("[{}]", p),
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            PageEntry::Page(p) => spans.push(Span::raw(p.to_string())),
            PageEntry::Ellipsis => spans.push(Span::styled("…", Style::default().fg(colors.dim))),
        }
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_reels(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    if !app.controller.is_loaded() {
        let loading = Paragraph::new("Loading…").alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if app.reels.is_empty() {
        let empty = Paragraph::new("No suitable articles with images found for Reels")
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let Some(article) = app.reels.active_article() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    if let Some(body) = article.text_body() {
        lines.push(Line::raw(body.to_string()));
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} · {}",
            article.source_name(),
            article
                .published_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default()
        ),
        Style::default().fg(colors.dim),
    )));
    lines.push(Line::raw(""));
    lines.push(narration_line(app, colors.accent));

    let title = format!(
        " Reel {}/{} ",
        app.reels.active_index() + 1,
        app.reels.len()
    );
    let reel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(reel, area);
}

fn narration_line(app: &TuiApp, accent: Color) -> Line<'static> {
    // The transient indicator outranks the steady state, and fades on
    // its own after a short delay
    if app.reels.indicator_visible(Instant::now()) {
        let indicator = if app.reels.is_playing() {
            "▶ Playing"
        } else {
            "⏸ Paused"
        };
        return Line::from(Span::styled(
            indicator,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    }

    match app.reels.state() {
        NarrationState::Speaking(_) => Line::from(Span::styled(
            "Narrating…",
            Style::default().add_modifier(Modifier::DIM),
        )),
        _ => Line::raw(""),
    }
}

fn render_bookmarks(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    if app.bookmarks.is_empty() {
        let empty = Paragraph::new("You haven't bookmarked any articles yet")
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .bookmarks
        .all()
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(colors.accent)
                    .fg(colors.selection_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::raw("★ "),
                Span::styled(
                    format!("[{}] ", article.source_name()),
                    Style::default().fg(colors.dim),
                ),
                Span::raw(article.title.clone()),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Bookmarks ({}) ", app.bookmarks.len())),
    );
    frame.render_widget(list, area);
}

fn render_analytics(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    if app.controller.articles().is_empty() {
        let empty = Paragraph::new("No articles available to generate analytics")
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(9)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let max_source = app.sources.first().map(|e| e.count).unwrap_or(1).max(1);
    let source_lines: Vec<Line> = app
        .sources
        .iter()
        .map(|entry| {
            let width = (entry.count * 20 / max_source).max(1);
            Line::from(vec![
                Span::raw(format!("{:<22} ", truncated(&entry.label, 21))),
                Span::styled("█".repeat(width), Style::default().fg(colors.accent)),
                Span::raw(format!(" {}", entry.count)),
            ])
        })
        .collect();
    let sources = Paragraph::new(source_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Source distribution "),
    );
    frame.render_widget(sources, columns[0]);

    let keyword_lines: Vec<Line> = app
        .keywords
        .iter()
        .take(30)
        .map(|entry| {
            Line::from(vec![
                Span::raw(format!("{:<22} ", entry.label)),
                Span::styled(entry.count.to_string(), Style::default().fg(colors.dim)),
            ])
        })
        .collect();
    let keywords = Paragraph::new(keyword_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Frequent terms "),
    );
    frame.render_widget(keywords, columns[1]);

    let max_day = app.week.iter().map(|d| d.count).max().unwrap_or(1).max(1);
    let week_lines: Vec<Line> = app
        .week
        .iter()
        .map(|day| {
            let width = day.count * 30 / max_day;
            Line::from(vec![
                Span::raw(format!("{} ", day.date.format("%m-%d"))),
                Span::styled("█".repeat(width), Style::default().fg(colors.accent)),
                Span::raw(format!(" {}", day.count)),
            ])
        })
        .collect();
    let week = Paragraph::new(week_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Last 7 days "),
    );
    frame.render_widget(week, rows[1]);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);

    let text = if let Some(input) = &app.search_input {
        format!(" Search: {}▌  (Enter to search, Esc to cancel)", input)
    } else if let Some(message) = &app.status_message {
        format!(" {}", message)
    } else {
        " q quit · Tab views · j/k move · n/p page · c category · / search · b bookmark · o open · R refresh · Space narration · t theme".to_string()
    };

    let bar = Paragraph::new(text).style(Style::default().fg(colors.dim));
    frame.render_widget(bar, area);
}

fn truncated(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
