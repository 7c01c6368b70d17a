//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::{App, Route};
use super::components::status_bar;
use super::pages::{login, order};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match &app.route {
        Route::Order(id) => order::render(frame, layout[0], app, id),
        Route::Login => login::render(frame, layout[0], app),
    }

    status_bar::render(frame, layout[1], app);
}
