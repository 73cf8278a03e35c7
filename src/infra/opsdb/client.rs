use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::services::journey_api::JourneyApi;
use raildash::fetch::auth::{ApiKey, UrlParam};
use raildash::fetch::{BasicClient, HttpClient, fetch_bytes};
use raildash::model::JourneyRow;
use raildash::parser::parse_rows;

/// HTTP client for the operations-database rows endpoint.
///
/// Holds the full client stack (base transport plus any credential
/// wrappers) behind the [`HttpClient`] seam, so gateways with different
/// auth schemes are all driven the same way.
pub struct OpsDbClient {
    url: String,
    client: Box<dyn HttpClient>,
}

impl OpsDbClient {
    /// A client for an unauthenticated endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Box::new(BasicClient::new()),
        }
    }

    /// A client sending `Authorization: Bearer <key>`.
    pub fn with_bearer(url: impl Into<String>, key: String) -> Self {
        Self {
            url: url.into(),
            client: Box::new(ApiKey::bearer(BasicClient::new(), key)),
        }
    }

    /// A client appending the key as a query parameter.
    pub fn with_query_key(url: impl Into<String>, param_name: String, key: String) -> Self {
        Self {
            url: url.into(),
            client: Box::new(UrlParam {
                inner: BasicClient::new(),
                param_name,
                key,
            }),
        }
    }
}

#[async_trait]
impl JourneyApi for OpsDbClient {
    async fn fetch_journeys(&self) -> Result<Vec<JourneyRow>> {
        let bytes = fetch_bytes(self.client.as_ref(), &self.url)
            .await
            .with_context(|| format!("fetching journey rows from {}", self.url))?;

        parse_rows(&bytes).with_context(|| format!("decoding journey rows from {}", self.url))
    }
}
