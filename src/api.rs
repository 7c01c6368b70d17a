//! Storefront backend REST client.
//!
//! Every order and key endpoint needs the signed-in user's bearer token.
//! Non-success responses are turned into
//! [`StorefrontError::Api`](crate::StorefrontError::Api) carrying the
//! backend's own `message` when it sends one, so [`error_message`] can hand
//! the UI something readable.

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, info};

use crate::Result;
use crate::error::StorefrontError;
use crate::models::{CaptureDetails, ErrorBody, Order, PayResponse, SignInRequest, UserInfo};

/// Client for the storefront backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Tls`] if the HTTP client cannot be built
    /// with the given TLS configuration.
    pub fn new(base_url: impl Into<String>, tls_config: rustls::ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .build()
            .map_err(|e| StorefrontError::Tls(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(base_url, http))
    }

    /// Wraps an existing `reqwest` client.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one order: `GET /api/orders/{id}`.
    pub async fn fetch_order(&self, order_id: &str, token: &str) -> Result<Order> {
        let url = format!("{}/api/orders/{order_id}", self.base_url);
        debug!(order_id, "fetching order");
        let response = send(self.http.get(url).bearer_auth(token)).await?;
        Ok(response.json().await?)
    }

    /// Marks an order paid with the provider's capture details:
    /// `PUT /api/orders/{id}/pay`.
    ///
    /// Returns the updated order.
    pub async fn pay_order(
        &self,
        order_id: &str,
        details: &CaptureDetails,
        token: &str,
    ) -> Result<Order> {
        let url = format!("{}/api/orders/{order_id}/pay", self.base_url);
        let response = send(self.http.put(url).bearer_auth(token).json(details)).await?;
        let body: PayResponse = response.json().await?;
        if let PayResponse::Wrapped {
            message: Some(ref message),
            ..
        } = body
        {
            info!(order_id, backend_message = %message, "backend accepted payment");
        }
        Ok(body.into_order())
    }

    /// Fetches the checkout provider's client id: `GET /api/keys/paypal`.
    ///
    /// The backend sends the id as plain text; a JSON string is accepted
    /// too.
    pub async fn paypal_client_id(&self, token: &str) -> Result<String> {
        let url = format!("{}/api/keys/paypal", self.base_url);
        let response = send(self.http.get(url).bearer_auth(token)).await?;
        let body = response.text().await?;
        parse_client_id(&body)
    }

    /// Signs in: `POST /api/users/signin`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo> {
        let url = format!("{}/api/users/signin", self.base_url);
        let response = send(self.http.post(url).json(&SignInRequest { email, password })).await?;
        let user: UserInfo = response.json().await?;
        info!(user = %user.name, "signed in");
        Ok(user)
    }
}

/// Sends a request and maps non-success statuses to
/// [`StorefrontError::Api`].
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

/// Builds the error for a failed response from its status and raw body.
fn api_error(status: StatusCode, body: &str) -> StorefrontError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
    StorefrontError::Api {
        status: status.as_u16(),
        message,
    }
}

fn parse_client_id(body: &str) -> Result<String> {
    let trimmed = body.trim();
    let id = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed)?
    } else {
        trimmed.to_string()
    };
    if id.is_empty() {
        return Err(StorefrontError::Payment(
            "backend returned an empty checkout client id".into(),
        ));
    }
    Ok(id)
}

/// Turns any error into the string shown to the user.
///
/// Backend errors show the backend's message verbatim; everything else
/// shows its display form.
pub fn error_message(err: &StorefrontError) -> String {
    match err {
        StorefrontError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
