//! Wire models shared by the backend client, the checkout provider, and
//! the UI.
//!
//! Field names follow the backend's camelCase JSON; the provider payloads
//! keep the provider's snake_case names.

pub mod order;
pub mod payment;
pub mod user;

use serde::Deserialize;

pub use order::{Order, OrderItem, ShippingAddress};
pub use payment::{CaptureDetails, CreateOrderRequest, PayResponse, ProviderOrder};
pub use user::{Session, SignInRequest, UserInfo};

/// Error body returned by the backend on non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
