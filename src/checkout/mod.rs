//! Hosted checkout integration.
//!
//! The payment provider is reached through [`PaymentButtons`], the seam
//! the order page drives: load the integration with the client id the
//! backend hands out, create a provider order for the order total, then
//! capture it once the buyer approved. [`paypal::PayPalButtons`] is the
//! production implementation; tests plug in their own.

pub mod paypal;
pub mod script;

use std::future::Future;

use crate::Result;
use crate::models::payment::{Amount, PurchaseUnit};
use crate::models::{CaptureDetails, CreateOrderRequest, Order, ProviderOrder};

pub use paypal::PayPalButtons;
pub use script::{ScriptAction, ScriptOptions, ScriptState, ScriptStatus};

/// Currency every order is charged in.
pub const PAYMENT_CURRENCY: &str = "USD";

/// Hosted payment buttons.
///
/// Implementations must be cheap to share: the UI runtime holds them in an
/// `Arc` and calls them from spawned tasks.
pub trait PaymentButtons: Send + Sync + 'static {
    /// Loads the integration for the given options.
    ///
    /// Resolves the script state machine on success, rejects it on error.
    fn load(&self, options: &ScriptOptions) -> impl Future<Output = Result<()>> + Send;

    /// Creates a provider order the buyer can approve.
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<ProviderOrder>> + Send;

    /// Captures an approved provider order.
    fn capture(&self, provider_order_id: &str) -> impl Future<Output = Result<CaptureDetails>> + Send;
}

impl CreateOrderRequest {
    /// The create-order request for `order`: capture the order total, as
    /// the backend wrote it, in [`PAYMENT_CURRENCY`].
    pub fn for_order(order: &Order) -> Self {
        Self {
            intent: "CAPTURE".to_string(),
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: PAYMENT_CURRENCY.to_string(),
                    value: order.total_price.to_string(),
                },
            }],
        }
    }

    /// Amount to be charged, as sent to the provider.
    pub fn amount(&self) -> Option<&str> {
        self.purchase_units.first().map(|u| u.amount.value.as_str())
    }
}
