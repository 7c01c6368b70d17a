//! Full-screen pages, one per route.

pub mod login;
pub mod order;
