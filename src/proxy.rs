//! Proxy resolution from configured settings.

use anyhow::Result;
use url::Url;

use crate::config::ProxySettings;
use crate::credentials::Credentials;
use crate::error::FetchError;

/// A resolved proxy server: the address to connect through and the
/// credentials to present to it. Absence means a direct connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub address: Url,
    pub credentials: Credentials,
}

/// Resolves proxy settings into a descriptor, or `None` when no proxy server
/// is configured.
///
/// A server value that already carries a scheme is used verbatim; a bare
/// hostname or IP is assumed to be HTTP for backwards compatibility.
pub fn resolve_proxy(settings: &ProxySettings) -> Result<Option<ProxyDescriptor>> {
    let server = match settings.server.as_deref() {
        Some(server) if !server.is_empty() => server,
        _ => return Ok(None),
    };

    let url = if server.contains("://") {
        server.to_string()
    } else {
        format!("http://{}", server)
    };

    let address = Url::parse(&url).map_err(|e| {
        FetchError::Configuration(format!("invalid proxy server address {:?}: {}", server, e))
    })?;

    Ok(Some(ProxyDescriptor {
        address,
        credentials: settings.credentials(),
    }))
}
