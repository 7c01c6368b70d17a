//! Storefront order-detail client.
//!
//! Fetches a single order from the storefront backend, renders its
//! shipping, payment and item summaries in a terminal UI, and drives a
//! hosted checkout provider to capture payment and mark the order paid.

pub mod api;
pub mod checkout;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod tls;
pub mod tui;

pub use error::{Result, StorefrontError};
