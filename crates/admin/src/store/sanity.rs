//! Content store HTTP client.
//!
//! Talks to the store's HTTP API directly with `reqwest`:
//! - `GET  /v{version}/data/query/{dataset}?query=...` for the order listing
//! - `POST /v{version}/data/mutate/{dataset}?returnIds=true` for deletes
//!
//! Responses are read as text first so that failures can be logged with a
//! truncated body before being mapped to [`StoreError`].

use std::sync::Arc;

use async_trait::async_trait;
use orderdesk_core::{Order, OrderId};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;
use url::Url;

use crate::config::SanityConfig;

use super::{ORDER_LISTING_QUERY, OrderStore, StoreError};

/// Content store API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    query_url: Url,
    mutate_url: Url,
    token: SecretString,
}

/// Envelope of a query response.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Envelope of a mutation response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutateResponse {
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
    #[serde(default)]
    operation: Option<String>,
}

/// Error body returned by the store on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Described { description: String },
    Plain(String),
}

impl SanityClient {
    /// Create a new client from the store configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Url` if the configured base URL is malformed.
    pub fn new(config: &SanityConfig) -> Result<Self, StoreError> {
        let base = Url::parse(&config.base_url())?;
        let query_url = base.join(&format!(
            "/v{}/data/query/{}",
            config.api_version, config.dataset
        ))?;
        let mut mutate_url = base.join(&format!(
            "/v{}/data/mutate/{}",
            config.api_version, config.dataset
        ))?;
        mutate_url.query_pairs_mut().append_pair("returnIds", "true");

        Ok(Self {
            inner: Arc::new(SanityClientInner {
                client: reqwest::Client::new(),
                query_url,
                mutate_url,
                token: config.token.clone(),
            }),
        })
    }

    /// Run a GROQ query and return its `result`.
    async fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<T, StoreError> {
        let response = self
            .inner
            .client
            .get(self.inner.query_url.clone())
            .query(&[("query", groq)])
            .bearer_auth(self.inner.token.expose_secret())
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let envelope: QueryResponse<T> = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body, 500),
                "Failed to parse store query response"
            );
        })?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl OrderStore for SanityClient {
    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let documents: Vec<serde_json::Value> = self.query(ORDER_LISTING_QUERY).await?;
        let fetched = documents.len();
        let orders: Vec<Order> = documents.into_iter().filter_map(parse_order).collect();
        tracing::debug!(count = orders.len(), skipped = fetched - orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn delete_order(&self, id: &OrderId) -> Result<(), StoreError> {
        let body = json!({
            "mutations": [{ "delete": { "id": id.as_str() } }]
        });

        let response = self
            .inner
            .client
            .post(self.inner.mutate_url.clone())
            .bearer_auth(self.inner.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let text = read_success_body(response).await?;
        let mutation: MutateResponse = serde_json::from_str(&text)?;

        let deleted = mutation
            .results
            .iter()
            .any(|r| r.id == id.as_str() && r.operation.as_deref().is_none_or(|op| op == "delete"));
        if !deleted {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::info!(
            transaction_id = mutation.transaction_id.as_deref().unwrap_or("-"),
            "Order deleted"
        );
        Ok(())
    }
}

/// Parse one listed document, skipping it if it does not look like an order.
fn parse_order(document: serde_json::Value) -> Option<Order> {
    let id = document
        .get("_id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("-")
        .to_string();

    serde_json::from_value(document)
        .inspect_err(|e| {
            tracing::warn!(order_id = %id, error = %e, "Skipping malformed order document");
        })
        .ok()
}

/// Read the body of a successful response, or map the failure.
async fn read_success_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    tracing::error!(
        status = %status,
        body = %truncate(&body, 500),
        "Store returned non-success status"
    );

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| match b.error {
            Some(ErrorDetail::Described { description }) => Some(description),
            Some(ErrorDetail::Plain(message)) => Some(message),
            None => b.message,
        })
        .unwrap_or_else(|| truncate(&body, 200));

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
