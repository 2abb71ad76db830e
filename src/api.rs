//! Single-shot JSON helpers for calling web APIs.
//!
//! These are plain request helpers: no retry and no transform logic. The
//! resolved credentials are presented with every request; the ambient
//! identity sends no explicit authentication.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::credentials::Credentials;
use crate::error::FetchError;

/// Client for making JSON requests to web APIs.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    credentials: Credentials,
}

impl ApiClient {
    /// Creates an API client from a network client and the credentials to
    /// present with each request.
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Gets data from the URL and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        debug!("GET JSON from {}...", url);
        let request = self.authenticated(self.client.get(url.clone()));
        read_json(request).await
    }

    /// Posts data to the URL and deserializes the JSON response.
    #[tracing::instrument(skip(self, data))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &Url, data: &B) -> Result<T> {
        debug!("POST JSON to {}...", url);
        let request = self.authenticated(self.client.post(url.clone())).json(data);
        read_json(request).await
    }

    /// Posts data to the URL without reading a body back.
    #[tracing::instrument(skip(self, data))]
    pub async fn post_and_forget<B: Serialize>(&self, url: &Url, data: &B) -> Result<()> {
        debug!("POST JSON to {}...", url);
        let request = self.authenticated(self.client.post(url.clone())).json(data);
        send(request).await.map(|_| ())
    }

    /// Puts data to the URL and deserializes the JSON response.
    #[tracing::instrument(skip(self, data))]
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, url: &Url, data: &B) -> Result<T> {
        debug!("PUT JSON to {}...", url);
        let request = self.authenticated(self.client.put(url.clone())).json(data);
        read_json(request).await
    }

    /// Puts data to the URL without reading a body back.
    #[tracing::instrument(skip(self, data))]
    pub async fn put_and_forget<B: Serialize>(&self, url: &Url, data: &B) -> Result<()> {
        debug!("PUT JSON to {}...", url);
        let request = self.authenticated(self.client.put(url.clone())).json(data);
        send(request).await.map(|_| ())
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match (
            self.credentials.qualified_user(),
            self.credentials.password(),
        ) {
            (Some(user), password) => request.basic_auth(user, password),
            _ => request,
        }
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
    let response = request.send().await.context("Failed to send request")?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            code: status.as_u16(),
            description: status.canonical_reason().unwrap_or("").to_string(),
        }
        .into());
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    send(request)
        .await?
        .json::<T>()
        .await
        .context("Failed to parse JSON response")
}
