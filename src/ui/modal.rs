// Modal UI components.
// Text input and confirmation dialogs drawn on top of the dashboard.

use ratatui::{prelude::*, widgets::*};

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn instructions(confirm: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(format!(" = {}  ", confirm), Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
    ])
}

/// Draw a single-line text input modal.
pub fn draw_input_modal(frame: &mut Frame, title: &str, label: &str, input: &str, hint: &str) {
    let modal_area = centered(frame.area(), 60, 7);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(2), // Hint
            Constraint::Length(2), // Instructions
        ])
        .split(modal_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));

    let input_line = Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::raw(input),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(input_line).block(input_block), chunks[0]);

    let hint_widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint_widget, chunks[1]);

    let instructions_widget = Paragraph::new(instructions(title)).alignment(Alignment::Center);
    frame.render_widget(instructions_widget, chunks[2]);
}

/// Draw a yes/no confirmation modal.
pub fn draw_confirm_modal(frame: &mut Frame, question: &str) {
    let modal_area = centered(frame.area(), 50, 5);
    frame.render_widget(Clear, modal_area);

    let text = vec![
        Line::from(question.to_string()),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::styled(" = Yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("any other key", Style::default().fg(Color::Yellow)),
            Span::styled(" = No", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm "),
        );
    frame.render_widget(widget, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 40, 4);
        let rect = centered(area, 60, 7);
        assert_eq!(rect, Rect::new(0, 0, 40, 4));

        let rect = centered(Rect::new(0, 0, 100, 20), 60, 7);
        assert_eq!(rect, Rect::new(20, 6, 60, 7));
    }
}
