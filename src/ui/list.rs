// List rendering for repositories and their items.
// Provides styled list views with loading, empty and error states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::activity::{Level, classify_item};
use crate::api::Item;
use crate::state::{DashboardState, LoadingState};

/// Color of the activity indicator for a level.
pub fn level_color(level: Level) -> Color {
    match level {
        Level::High => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Low => Color::Red,
        Level::None => Color::DarkGray,
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render the repository list on the left.
pub fn render_repo_list(frame: &mut Frame, state: &mut DashboardState, area: Rect) {
    let title = if state.from_cache {
        " Repositories (cached) "
    } else {
        " Repositories "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    match &state.repos {
        LoadingState::Idle => {
            frame.render_widget(block, area);
            render_empty(frame, inner, "Press r to load");
        }
        LoadingState::Loading => {
            frame.render_widget(block, area);
            render_loading(frame, inner, "Loading repositories");
        }
        LoadingState::Error(e) => {
            frame.render_widget(block, area);
            render_error(frame, inner, e);
        }
        LoadingState::Loaded(views) if views.is_empty() => {
            frame.render_widget(block, area);
            render_empty(frame, inner, "No repos yet, press a to add one");
        }
        LoadingState::Loaded(views) => {
            let items: Vec<ListItem> = views
                .iter()
                .map(|view| {
                    let activity = &view.repo.activity;
                    let count = activity.prs.len() + activity.issues.len();
                    ListItem::new(Line::from(vec![
                        Span::styled(&view.repo.title, Style::default().fg(Color::Cyan)),
                        Span::styled(
                            format!("  {}", count),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let list_widget = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut state.list_state);
        }
    }
}

/// Render tracked items with their activity indicator.
pub fn render_items(frame: &mut Frame, items: &[&Item], now: DateTime<Utc>, area: Rect) {
    if items.is_empty() {
        render_empty(frame, area, "No items are being tracked...");
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let level = classify_item(item, now);
            let mut spans = vec![
                Span::styled("● ", Style::default().fg(level_color(level))),
                Span::styled(&item.title, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  by {}", item.by),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if !item.labels.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", item.labels.join(", ")),
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(rows), area);
}
