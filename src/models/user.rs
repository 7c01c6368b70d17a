//! Signed-in user session.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The signed-in user as returned by `POST /api/users/signin`.
///
/// The bearer token is wiped from memory when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    pub token: String,
}

impl Drop for UserInfo {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

impl fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Credentials posted to the sign-in endpoint.
#[derive(Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Session context handed to every page.
///
/// Holds the signed-in user, if any. Pages read it; only the login flow
/// and sign-out replace it.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<UserInfo>,
}

impl Session {
    /// A session for an already signed-in user.
    pub fn signed_in(user: UserInfo) -> Self {
        Self { user: Some(user) }
    }

    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Bearer token of the signed-in user.
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
