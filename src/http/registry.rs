//! Client reuse keyed by credential identity.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::credentials::{CredentialKey, Credentials};
use crate::http::request::build_client;
use crate::proxy::ProxyDescriptor;

/// A registry of network clients, one per unique set of credentials.
///
/// The same proxy is expected to apply to all requests, but credentials can
/// differ between callers, so clients are pooled by credential identity.
/// The check-then-insert sequence is guarded by a lock so that concurrent
/// first use still creates at most one client per identity.
pub struct ClientRegistry {
    proxy: Option<ProxyDescriptor>,
    clients: Mutex<HashMap<CredentialKey, Client>>,
}

impl ClientRegistry {
    /// Creates an empty registry. Clients are built lazily on first use with
    /// the given proxy configuration.
    pub fn new(proxy: Option<ProxyDescriptor>) -> Self {
        Self {
            proxy,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shared client for the given credentials, creating it on
    /// first use.
    pub fn client_for(&self, credentials: &Credentials) -> Result<Client> {
        let key = credentials.key();
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        debug!("Creating a new HTTP client for a previously unseen identity");
        let client = build_client(self.proxy.as_ref())?;
        clients.insert(key, client.clone());
        Ok(client)
    }

    /// The number of distinct identities a client has been created for.
    pub fn len(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
