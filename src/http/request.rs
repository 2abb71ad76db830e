//! Construction of network clients for outbound requests.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, Proxy};

use crate::proxy::ProxyDescriptor;

/// Fixed marker identifying this client to servers. Some applications refuse
/// requests without a user agent, so every outbound request carries one.
pub const CLIENT_MARKER: &str = "xmlfetch";

/// Builds a client for the given proxy configuration.
///
/// When a proxy is configured, the proxy hop is authenticated with the
/// proxy's own credentials rather than the destination's. Without a proxy the
/// connection is direct and the caller's ambient identity applies (no
/// explicit authentication is attached).
pub fn build_client(proxy: Option<&ProxyDescriptor>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(CLIENT_MARKER);

    if let Some(descriptor) = proxy {
        debug!("Routing requests through proxy {}", descriptor.address);
        let mut proxy = Proxy::all(descriptor.address.clone())
            .context("Failed to configure proxy server")?;
        if let (Some(user), Some(password)) = (
            descriptor.credentials.qualified_user(),
            descriptor.credentials.password(),
        ) {
            proxy = proxy.basic_auth(&user, password);
        }
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}
