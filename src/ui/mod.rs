// UI module for rendering the TUI.
// Repository list, per-repo detail with tabs, search bar, status line and overlays.

mod list;
mod modal;
mod tabs;

use chrono::Utc;
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{InputMode, RepoView};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let show_search = app.dashboard.mode == InputMode::Search || app.dashboard.search.is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                // Title
            Constraint::Min(1),                                   // Main content
            Constraint::Length(if show_search { 1 } else { 0 }), // Search bar
            Constraint::Length(1),                                // Status bar
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    list::render_repo_list(frame, &mut app.dashboard, columns[0]);
    draw_detail(frame, app, columns[1]);

    if show_search {
        draw_search_bar(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, chunks[3]);

    match app.dashboard.mode {
        InputMode::AddRepo => modal::draw_input_modal(
            frame,
            "Add repo",
            "Repo",
            &app.dashboard.input,
            "owner/name, e.g. async-rs/async-std",
        ),
        InputMode::TrackItems => modal::draw_input_modal(
            frame,
            "Track items",
            "Items",
            &app.dashboard.input,
            "space separated, e.g. pr:12 issue:7",
        ),
        InputMode::ConfirmDelete => {
            if let Some(repo) = app.dashboard.selected_repo() {
                modal::draw_confirm_modal(frame, &format!("Delete {}?", repo.title));
            }
        }
        InputMode::Normal | InputMode::Search => {}
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " tldr ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if app.is_demo() {
        spans.push(Span::styled("[demo] ", Style::default().fg(Color::Magenta)));
    }
    let summary = if app.dashboard.repos.is_loading() {
        "loading...".to_string()
    } else {
        format!("{} repos", app.dashboard.views().len())
    };
    spans.push(Span::styled(summary, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the selected repository: last commit, tabs, items.
fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = app.dashboard.selected_view() else {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        list::render_empty(frame, inner, "Select a repository");
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", view.repo.title))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Last commit + master
            Constraint::Length(2), // Tabs
            Constraint::Min(1),    // Items
        ])
        .split(inner);

    draw_last_commit(frame, view, chunks[0]);
    tabs::draw_item_tabs(frame, view, chunks[1]);

    let items = app.dashboard.visible_items(view);
    list::render_items(frame, &items, Utc::now(), chunks[2]);
}

fn draw_last_commit(frame: &mut Frame, view: &RepoView, area: Rect) {
    let commit_line = match &view.repo.last_commit {
        Some(commit) => Line::from(vec![
            Span::styled("Last commit on ", Style::default().fg(Color::DarkGray)),
            Span::styled(&commit.branch, Style::default().fg(Color::Magenta)),
            Span::raw(format!(" {} by {} - ", commit.on, commit.by)),
            Span::styled(&commit.comment, Style::default().fg(Color::White)),
        ]),
        None => Line::from(Span::styled(
            "No commits yet",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let master_line = Line::from(Span::styled(
        format!("{} new commits on master", view.repo.activity.master.commits),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(vec![commit_line, master_line]), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.dashboard.mode == InputMode::Search;
    let text = if editing {
        app.dashboard.input.as_str()
    } else {
        app.dashboard.search.as_ref().map(|q| q.text()).unwrap_or("")
    };

    let mut spans = vec![
        Span::styled(" Search: ", Style::default().fg(Color::Yellow)),
        Span::raw(text),
    ];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Error banner, last status message, or key hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.dashboard.error {
        Line::from(vec![
            Span::styled(
                format!(" ❌ {}", error.msg),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  c ", Style::default().fg(Color::Yellow)),
            Span::styled("Dismiss", Style::default().fg(Color::DarkGray)),
        ])
    } else if let Some(status) = &app.dashboard.status {
        Line::from(Span::styled(
            format!(" ✓ {}", status),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Switch tab", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  a "),
            Span::styled("Add", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 50.min(area.width);
    let popup_height = 19.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("↑/↓ or j/k", "Select repository"),
        key("Tab/Shift-Tab", "Cycle All / PRs / Issues"),
        key("1 2 3", "All / PRs / Issues"),
        key("/", "Search items"),
        key("Esc", "Clear search / cancel"),
        key("a", "Add repository"),
        key("t", "Track PRs or issues"),
        key("d", "Delete repository"),
        key("r", "Refresh"),
        key("c", "Dismiss error"),
        key("?", "Show/hide this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::runtime::Handle;

    use super::*;
    use crate::app::demo_source;
    use crate::errors::{ErrorReporter, ErrorSlot};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_draws_selected_repo_with_tabs() {
        let mut app = App::new(demo_source(), ErrorSlot::new(), Handle::current());
        app.start();

        let text = screen(&mut app);
        assert!(text.contains("[demo]"));
        assert!(text.contains("Last commit on master 14min ago by felipesere"));
        assert!(text.contains("All (6)"));
        assert!(text.contains("PRs (3)"));
        assert!(text.contains("Issues (3)"));
        assert!(text.contains("Crashes using non-ASCII characters"));
    }

    #[tokio::test]
    async fn test_draws_error_banner() {
        let errors = ErrorSlot::new();
        let mut app = App::new(demo_source(), errors.clone(), Handle::current());
        app.start();
        errors.report("Could not add repo my-repo".to_string());
        app.process_events();

        assert!(screen(&mut app).contains("Could not add repo my-repo"));
    }
}
