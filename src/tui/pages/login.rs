//! Sign-in page.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, LoginField};
use crate::tui::components::message_box::{Variant, loading_box, message_box};

/// Renders the sign-in form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.login;

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(inner);

    let email_focused = form.field == LoginField::Email;
    render_field(frame, rows[0], " Email ", form.email.as_str().to_string(), email_focused);
    render_field(frame, rows[1], " Password ", form.password.masked(), !email_focused);

    let status = if form.submitting {
        loading_box()
    } else if let Some(ref error) = form.error {
        message_box(Variant::Danger, error.as_str())
    } else {
        Line::from(Span::styled(
            "Sign in to view this order",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(status), rows[2]);

    // Place the cursor in the focused field.
    let (row, input, shown) = if email_focused {
        (rows[0], &form.email, form.email.as_str().to_string())
    } else {
        (rows[1], &form.password, form.password.masked())
    };
    let before: String = shown.chars().take(input.cursor()).collect();
    frame.set_cursor_position(Position::new(
        row.x + 1 + before.width() as u16,
        row.y + 1,
    ));
}

fn render_field(frame: &mut Frame, area: Rect, title: &'static str, value: String, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let para = Paragraph::new(value).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(para, area);
}
