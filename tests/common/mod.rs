//! Shared test utilities: fixtures, a scripted payment provider, and a
//! message pump for the UI runtime.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use storefront_order::Result;
use storefront_order::StorefrontError;
use storefront_order::checkout::{PaymentButtons, ScriptOptions};
use storefront_order::models::{CaptureDetails, CreateOrderRequest, Order, ProviderOrder, UserInfo};
use storefront_order::tui::{App, Message, Runtime};
use tokio::sync::mpsc;

pub const ORDER_ID: &str = "6410f2b8c1a2b3c4d5e6f701";
pub const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.test.signature";

pub const ORDER_JSON: &str = include_str!("../fixtures/order.json");
pub const ORDER_PAID_JSON: &str = include_str!("../fixtures/order_paid.json");
pub const USER_JSON: &str = include_str!("../fixtures/user.json");
pub const CAPTURE_JSON: &str = include_str!("../fixtures/capture.json");
pub const PROVIDER_ORDER_JSON: &str = include_str!("../fixtures/provider_order.json");

pub fn user() -> UserInfo {
    serde_json::from_str(USER_JSON).expect("user fixture")
}

pub fn order() -> Order {
    serde_json::from_str(ORDER_JSON).expect("order fixture")
}

pub fn paid_order() -> Order {
    serde_json::from_str(ORDER_PAID_JSON).expect("paid order fixture")
}

/// Payment provider double that records what it was asked to do.
#[derive(Default)]
pub struct FakeButtons {
    /// Error returned by `load`, if any.
    pub load_error: Option<String>,
    /// Error returned by `capture`, if any.
    pub capture_error: Option<String>,
    pub loaded: Mutex<Vec<ScriptOptions>>,
    pub created: Mutex<Vec<CreateOrderRequest>>,
    pub captured: Mutex<Vec<String>>,
}

impl PaymentButtons for FakeButtons {
    async fn load(&self, options: &ScriptOptions) -> Result<()> {
        self.loaded.lock().unwrap().push(options.clone());
        match self.load_error {
            Some(ref error) => Err(StorefrontError::Payment(error.clone())),
            None => Ok(()),
        }
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<ProviderOrder> {
        self.created.lock().unwrap().push(request.clone());
        Ok(serde_json::from_str(PROVIDER_ORDER_JSON)?)
    }

    async fn capture(&self, provider_order_id: &str) -> Result<CaptureDetails> {
        self.captured
            .lock()
            .unwrap()
            .push(provider_order_id.to_string());
        if let Some(ref error) = self.capture_error {
            return Err(StorefrontError::Payment(error.clone()));
        }
        Ok(serde_json::from_str(CAPTURE_JSON)?)
    }
}

/// Feeds runtime messages back into the app until `done` holds.
///
/// Panics if nothing arrives for five seconds.
pub async fn pump<B: PaymentButtons>(
    runtime: &mut Runtime<B>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    done: impl Fn(&App) -> bool,
) {
    runtime.sync_effects(app);
    while !done(app) {
        let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a runtime message")
            .expect("runtime channel closed");
        runtime.process(app, message);
    }
}
