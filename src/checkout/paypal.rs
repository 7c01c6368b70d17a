//! PayPal implementation of [`PaymentButtons`].
//!
//! Uses the Orders v2 REST API: an OAuth client-credentials token obtained
//! at load time, then `POST /v2/checkout/orders` and
//! `POST /v2/checkout/orders/{id}/capture`.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::{PaymentButtons, ScriptOptions};
use crate::Result;
use crate::error::StorefrontError;
use crate::models::{CaptureDetails, CreateOrderRequest, ProviderOrder};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// PayPal checkout buttons.
pub struct PayPalButtons {
    http: reqwest::Client,
    api_url: String,
    client_secret: Option<Zeroizing<String>>,
    /// Access token from the last successful load.
    access_token: RwLock<Option<Zeroizing<String>>>,
}

impl PayPalButtons {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            client_secret: client_secret.map(Zeroizing::new),
            access_token: RwLock::new(None),
        }
    }

    async fn token(&self) -> Result<Zeroizing<String>> {
        self.access_token
            .read()
            .await
            .clone()
            .ok_or_else(|| StorefrontError::Payment("PayPal buttons are not loaded".into()))
    }
}

impl PaymentButtons for PayPalButtons {
    async fn load(&self, options: &ScriptOptions) -> Result<()> {
        let secret = self.client_secret.as_ref().ok_or_else(|| {
            StorefrontError::Payment("PAYPAL_CLIENT_SECRET is not configured".into())
        })?;

        let resp = self
            .http
            .post(format!("{}/v1/oauth2/token", self.api_url))
            .basic_auth(&options.client_id, Some(secret.as_str()))
            .form(&[("grant_type", "client_credentials")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| StorefrontError::Payment(format!("PayPal auth request failed: {e}")))?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "PayPal rejected client credentials");
            return Err(StorefrontError::Payment("PayPal authentication failed".into()));
        }

        let token = resp
            .json::<TokenResponse>()
            .await
            .map_err(|_| StorefrontError::Payment("Invalid PayPal token response".into()))?;

        *self.access_token.write().await = Some(Zeroizing::new(token.access_token));
        info!(currency = %options.currency, "PayPal buttons loaded");
        Ok(())
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<ProviderOrder> {
        let token = self.token().await?;
        let resp = self
            .http
            .post(format!("{}/v2/checkout/orders", self.api_url))
            .bearer_auth(token.as_str())
            .json(request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| StorefrontError::Payment(format!("PayPal order request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(StorefrontError::Payment(format!(
                "PayPal refused to create the order (status {})",
                resp.status().as_u16()
            )));
        }

        let order = resp
            .json::<ProviderOrder>()
            .await
            .map_err(|_| StorefrontError::Payment("Invalid PayPal order response".into()))?;
        debug!(provider_order_id = %order.id, status = %order.status, "PayPal order created");
        Ok(order)
    }

    async fn capture(&self, provider_order_id: &str) -> Result<CaptureDetails> {
        let token = self.token().await?;
        let resp = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{provider_order_id}/capture",
                self.api_url
            ))
            .bearer_auth(token.as_str())
            .json(&serde_json::json!({}))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| StorefrontError::Payment(format!("PayPal capture request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(StorefrontError::Payment(format!(
                "PayPal capture failed (status {})",
                resp.status().as_u16()
            )));
        }

        let details = resp
            .json::<CaptureDetails>()
            .await
            .map_err(|_| StorefrontError::Payment("Invalid PayPal capture response".into()))?;
        info!(provider_order_id, status = %details.status, "PayPal order captured");
        Ok(details)
    }
}
