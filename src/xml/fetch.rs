//! Fetching remote resources as XML, with bounded retry on transport failures.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::error::FetchError;
use crate::http::{backoff_delay, build_client, clamp_retries, is_transient};
use crate::proxy::ProxyDescriptor;
use crate::xml::payload::{InvalidXml, XmlPayload};

/// Client for requesting online resources as XML.
#[derive(Clone)]
pub struct XmlClient {
    client: Client,
}

impl XmlClient {
    /// Creates a client, routed through the given proxy when one is configured.
    pub fn new(proxy: Option<&ProxyDescriptor>) -> Result<Self> {
        Ok(Self {
            client: build_client(proxy)?,
        })
    }

    /// Wraps an existing client, e.g. one shared through a
    /// [`ClientRegistry`](crate::http::ClientRegistry).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Requests a URL and returns the response body as a string.
    ///
    /// Single-shot: no retry and no XML validation. Any status other than
    /// 200 OK is an error.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_string(&self, url: &Url) -> Result<String> {
        debug!("GET {} as string...", url);
        let response = self.execute(url).await?;
        require_ok(&response)?;
        response
            .text()
            .await
            .context("Failed to read response body")
    }

    /// Requests a URL and parses the response body as XML.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_document(&self, url: &Url) -> Result<XmlPayload> {
        self.fetch_document_with_retries(url, 0).await
    }

    /// Requests a URL and parses the response body as XML, retrying transient
    /// transport failures up to the given budget.
    ///
    /// The budget is clamped to `[0, 2]`. With budget B the request is
    /// executed at most B+1 times; the wait before each retry is keyed to the
    /// remaining budget (1000ms, then 3000ms before the final attempt). A
    /// non-OK HTTP status or a body that is not well-formed XML is surfaced
    /// immediately and never retried.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_document_with_retries(
        &self,
        url: &Url,
        retries: i32,
    ) -> Result<XmlPayload> {
        let mut remaining = clamp_retries(retries);

        loop {
            match self.try_fetch(url).await {
                Ok(payload) => return Ok(payload),
                Err(e) if is_transient(&e) && remaining > 0 => {
                    let delay = backoff_delay(remaining);
                    warn!(
                        "Request for {} failed ({}), retrying in {}ms...",
                        url,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    remaining -= 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// A single fetch-and-parse attempt. Builds a fresh request; the previous
    /// one is consumed by the transport and cannot be reused.
    async fn try_fetch(&self, url: &Url) -> Result<XmlPayload> {
        let response = self.execute(url).await?;
        require_ok(&response)?;

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        match XmlPayload::parse(body) {
            Ok(payload) => Ok(payload),
            Err(invalid) => Err(self.diagnose_parse_failure(url, invalid).await),
        }
    }

    async fn execute(&self, url: &Url) -> Result<Response> {
        self.client
            .get(url.clone())
            .send()
            .await
            .context("Failed to execute request")
    }

    /// Re-requests the endpoint once so the XML that failed to parse can be
    /// included in the error. A best-effort diagnostic capture, not a
    /// resilience mechanism: the retry budget is never consulted here. If the
    /// re-fetch does not answer 200 OK, the body already read is used instead.
    async fn diagnose_parse_failure(&self, url: &Url, invalid: InvalidXml) -> anyhow::Error {
        debug!("Re-fetching {} to capture the XML that failed to parse", url);

        let captured = match self.execute(url).await {
            Ok(response) if response.status() == StatusCode::OK => response.text().await.ok(),
            _ => None,
        };

        FetchError::MalformedXml {
            message: invalid.message,
            body: captured.unwrap_or(invalid.raw),
        }
        .into()
    }
}

/// Checks that the response has the sole accepted status, 200 OK.
fn require_ok(response: &Response) -> Result<()> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            code: status.as_u16(),
            description: status.canonical_reason().unwrap_or("").to_string(),
        }
        .into());
    }
    Ok(())
}
