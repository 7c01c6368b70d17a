//! Secure credential storage via the OS keychain.
//!
//! The signed-in session and the checkout provider secret are kept in the
//! system keychain between runs. At startup, [`populate_env_from_keychain`]
//! copies any stored values into environment variables so the config flow
//! picks them up transparently.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::models::UserInfo;

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "storefront-order";

/// Credential entries managed by this module.
#[derive(Clone, Copy, Debug)]
pub enum CredentialKey {
    /// The signed-in user, serialized as JSON.
    Session,
    PayPalClientSecret,
}

impl CredentialKey {
    /// Returns the keychain entry identifier.
    pub fn keyring_id(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::PayPalClientSecret => "paypal_client_secret",
        }
    }

    /// Returns the environment variable name for this credential.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Session => "STOREFRONT_SESSION",
            Self::PayPalClientSecret => "PAYPAL_CLIENT_SECRET",
        }
    }

    /// All credential keys.
    pub const ALL: [CredentialKey; 2] = [Self::Session, Self::PayPalClientSecret];
}

/// Loads a credential from the keychain, returning `None` if not set.
pub fn load(key: CredentialKey) -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id()).ok()?;
    match entry.get_password() {
        Ok(password) => Some(Zeroizing::new(password)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(key = key.keyring_id(), error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Saves a credential to the keychain.
pub fn save(key: CredentialKey, value: &str) -> crate::Result<()> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id())
        .map_err(|e| crate::StorefrontError::Credentials(format!("keyring entry error: {e}")))?;
    entry
        .set_password(value)
        .map_err(|e| crate::StorefrontError::Credentials(format!("failed to save to keychain: {e}")))
}

/// Removes a credential from the keychain. Missing entries are not an error.
pub fn remove(key: CredentialKey) -> crate::Result<()> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id())
        .map_err(|e| crate::StorefrontError::Credentials(format!("keyring entry error: {e}")))?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(crate::StorefrontError::Credentials(format!(
            "failed to remove from keychain: {e}"
        ))),
    }
}

/// Persists the signed-in user so the next run starts signed in.
pub fn save_session(user: &UserInfo) -> crate::Result<()> {
    let json = Zeroizing::new(serde_json::to_string(user)?);
    save(CredentialKey::Session, &json)
}

/// Forgets the stored session.
pub fn clear_session() -> crate::Result<()> {
    remove(CredentialKey::Session)
}

/// Populates environment variables from the keychain for any
/// credentials not already set in the environment.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() {
    for key in CredentialKey::ALL {
        if std::env::var(key.env_var()).is_err()
            && let Some(value) = load(key)
        {
            debug!(key = key.env_var(), "loaded credential from keychain");
            // SAFETY: single-threaded at this point (before the runtime spawns tasks)
            unsafe {
                std::env::set_var(key.env_var(), value.as_str());
            }
        }
    }
}
