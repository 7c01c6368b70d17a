//! Application configuration loaded from environment variables.
//!
//! - `STOREFRONT_API_URL`: storefront backend base URL
//! - `STOREFRONT_CA_FILE`: optional PEM bundle trusted instead of the
//!   public web roots (self-hosted backends)
//! - `STOREFRONT_SESSION`: optional signed-in user as JSON, normally
//!   copied in from the keychain by [`crate::credentials`]
//! - `PAYPAL_API_URL`: checkout provider REST endpoint
//! - `PAYPAL_CLIENT_SECRET`: provider secret paired with the client id the
//!   backend hands out
//! - `STOREFRONT_LOG_FILE`: where tracing output goes
//!
//! Empty values are treated as absent.

use std::path::PathBuf;

use crate::models::UserInfo;

/// Default storefront backend.
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default provider endpoint (sandbox).
const DEFAULT_PAYPAL_API_URL: &str = "https://api-m.sandbox.paypal.com";

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "storefront-order.log";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub paypal: PayPalConfig,
    /// Signed-in user restored from a previous run.
    pub session: Option<UserInfo>,
    pub log_file: PathBuf,
}

/// Storefront backend connection settings.
#[derive(Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub ca_file: Option<PathBuf>,
}

/// Checkout provider settings.
#[derive(Debug)]
pub struct PayPalConfig {
    pub api_url: String,
    pub client_secret: Option<String>,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`StorefrontError::Config`](crate::StorefrontError::Config) if
/// `STOREFRONT_SESSION` is set but is not a valid user record, or if a URL
/// does not use an `http` or `https` scheme.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let paypal_url =
        non_empty_var("PAYPAL_API_URL").unwrap_or_else(|| DEFAULT_PAYPAL_API_URL.to_string());

    for (name, url) in [("STOREFRONT_API_URL", &base_url), ("PAYPAL_API_URL", &paypal_url)] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(crate::StorefrontError::Config(format!(
                "{name} must be an http(s) URL, got {url:?}"
            )));
        }
    }

    let session = match non_empty_var("STOREFRONT_SESSION") {
        Some(raw) => Some(serde_json::from_str::<UserInfo>(&raw).map_err(|e| {
            crate::StorefrontError::Config(format!("STOREFRONT_SESSION is not a user record: {e}"))
        })?),
        None => None,
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url: trim_slash(base_url),
            ca_file: non_empty_var("STOREFRONT_CA_FILE").map(PathBuf::from),
        },
        paypal: PayPalConfig {
            api_url: trim_slash(paypal_url),
            client_secret: non_empty_var("PAYPAL_CLIENT_SECRET"),
        },
        session,
        log_file: non_empty_var("STOREFRONT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
