// Item tab bar rendering.
// Shows All / PRs / Issues for the selected repository with item counts.

use ratatui::{prelude::*, widgets::*};

use crate::state::{RepoView, Tab};

fn tab_count(view: &RepoView, tab: Tab) -> usize {
    let activity = &view.repo.activity;
    match tab {
        Tab::All => activity.issues.len() + activity.prs.len(),
        Tab::Prs => activity.prs.len(),
        Tab::Issues => activity.issues.len(),
    }
}

/// Draw the tab bar for a repository view.
pub fn draw_item_tabs(frame: &mut Frame, view: &RepoView, area: Rect) {
    let current = view.tabs.current();

    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let title = format!("{} ({})", tab.title(), tab_count(view, *tab));
            let style = if *tab == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(title, style))
        })
        .collect();

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(current.index())
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
