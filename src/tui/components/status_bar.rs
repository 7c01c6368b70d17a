//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Route, ToastLevel};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let user_span = match app.session.user() {
        Some(user) => Span::styled(format!(" {} ", user.name), Style::default().fg(Color::Cyan)),
        None => Span::styled(" Not signed in ", Style::default().fg(Color::DarkGray)),
    };

    let toast_span = match app.toast {
        Some(ref toast) => {
            let color = match toast.level {
                ToastLevel::Success => Color::Green,
                ToastLevel::Error => Color::Red,
            };
            Span::styled(format!(" {} ", toast.message), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let keys = match app.route {
        Route::Order(_) => " p pay │ a approve │ r reload │ x sign out │ q quit ",
        Route::Login => " Tab field │ Enter sign in │ Esc quit ",
    };

    let used = user_span.content.width() + toast_span.content.width() + 2;
    let padding = (area.width as usize).saturating_sub(used + keys.width());

    let line = Line::from(vec![
        user_span,
        Span::raw("│"),
        toast_span,
        Span::raw(" ".repeat(padding)),
        Span::styled(keys, Style::default().fg(Color::White)),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
