//! Colored message boxes and the loading indicator.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tone of a message box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Success,
    Danger,
    Info,
}

impl Variant {
    fn color(self) -> Color {
        match self {
            Variant::Success => Color::Green,
            Variant::Danger => Color::Red,
            Variant::Info => Color::Cyan,
        }
    }
}

/// A one-line message box.
pub fn message_box(variant: Variant, text: impl Into<String>) -> Line<'static> {
    let color = variant.color();
    Line::from(vec![
        Span::styled("▌", Style::default().fg(color)),
        Span::styled(
            format!(" {} ", text.into()),
            Style::default().fg(Color::Black).bg(color),
        ),
    ])
}

/// The loading indicator line.
pub fn loading_box() -> Line<'static> {
    Line::from(Span::styled(
        "Loading...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ))
}
