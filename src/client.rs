//! Chat backend client.
//!
//! The [`PlaceBackend`] trait is the seam between the front-end and the
//! remote service; [`ChatClient`] is the HTTP implementation that talks to
//! `POST {base_url}/chat`.

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{ChatError, Result};
use crate::place::{PlaceCard, Query};

/// Something that can answer a place query.
#[async_trait::async_trait]
pub trait PlaceBackend: Send + Sync {
    /// Send one query and return the decoded place card.
    ///
    /// Exactly one attempt is made; failures are returned, never retried.
    async fn ask(&self, query: &Query) -> Result<PlaceCard>;
}

/// Wire body for `POST /chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a Query,
}

/// HTTP client for the chat backend.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl ChatClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// Trailing slashes are stripped before `/chat` is appended.
    pub fn new(base_url: &str) -> Result<Self> {
        let endpoint = Url::parse(&chat_endpoint(base_url))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Full URL of the chat endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl PlaceBackend for ChatClient {
    async fn ask(&self, query: &Query) -> Result<PlaceCard> {
        info!(
            name: "backend.request",
            endpoint = %self.endpoint,
            query = %query,
            "Sending query to chat backend"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest { query })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let card: PlaceCard = serde_json::from_slice(&bytes)?;
        debug!(
            answer_len = card.answer.len(),
            nearby = card.source_data.nearby.len(),
            "Decoded place card"
        );
        Ok(card)
    }
}

/// `{base_url}/chat` with trailing slashes removed from `base_url`.
#[must_use]
pub fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat", base_url.trim_end_matches('/'))
}
