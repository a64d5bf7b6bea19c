use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

/// Client for the FAQ backend's `/chat` endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Build a client with an overall request timeout. `None` leaves the
    /// transport default in place.
    pub fn with_timeout(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{"message": ...}` and return the `response` field of the reply.
    ///
    /// Fails when the request can't be delivered or the body has no string
    /// `response` field.
    pub async fn send(&self, message: &str) -> Result<String, ChatError> {
        let request = ChatRequest { message };

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        // Any delivered body with a `response` field counts, whatever the
        // status; the status only matters when there is nothing to show
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(chat_response) => {
                if !status.is_success() {
                    tracing::warn!(%status, "chat backend replied with an error status");
                }
                Ok(chat_response.response)
            }
            Err(_) if !status.is_success() => Err(ChatError::Status(status)),
            Err(e) => Err(ChatError::Decode(e.to_string())),
        }
    }
}
