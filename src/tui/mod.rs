//! Terminal user interface for the order page.
//!
//! Elm-style: [`event::update`] applies messages to the [`App`], the pure
//! planner in [`effects`] decides which network work the state calls for,
//! and the [`runtime`] performs it in background tasks.

pub mod app;
pub mod components;
pub mod effects;
pub mod event;
pub mod input;
pub mod pages;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;

pub use app::{App, Route};
pub use event::{Event, Message};
pub use runtime::{AppContext, Runtime, run};
pub use state::{ViewAction, ViewState, reduce};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
