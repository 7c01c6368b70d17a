//! TLS configuration for the backend and provider HTTP clients.
//!
//! By default the client trusts the Mozilla root set shipped in
//! `webpki-roots`. A self-hosted storefront can instead point
//! `STOREFRONT_CA_FILE` at a PEM bundle, which then becomes the only trust
//! anchor for backend requests.

use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] trusting the public web PKI roots.
pub fn build_tls_config() -> ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

/// Builds a [`ClientConfig`] whose root store contains only the
/// certificates found in the PEM file at `path`.
///
/// # Errors
///
/// Returns [`StorefrontError::Tls`](crate::StorefrontError::Tls) if the
/// file cannot be read, cannot be parsed, or holds no certificates.
pub fn build_tls_config_from_pem(path: &Path) -> Result<ClientConfig> {
    let pem = std::fs::read(path).map_err(|e| {
        crate::StorefrontError::Tls(format!("failed to read {}: {e}", path.display()))
    })?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::StorefrontError::Tls(format!("failed to parse CA PEM: {e}")))?;

    if certs.is_empty() {
        return Err(crate::StorefrontError::Tls(format!(
            "no certificates found in {}",
            path.display()
        )));
    }

    let mut root_store = rustls::RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(certs);
    if added == 0 {
        return Err(crate::StorefrontError::Tls(format!(
            "none of the {ignored} certificates in {} are usable",
            path.display()
        )));
    }

    Ok(ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth())
}

/// Picks the backend TLS config: the custom bundle when one is configured,
/// the public roots otherwise.
pub fn backend_tls_config(ca_file: Option<&Path>) -> Result<ClientConfig> {
    match ca_file {
        Some(path) => build_tls_config_from_pem(path),
        None => Ok(build_tls_config()),
    }
}
