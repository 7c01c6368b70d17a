//! Reusable widgets.

pub mod message_box;
pub mod status_bar;
