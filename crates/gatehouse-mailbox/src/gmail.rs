// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gmail REST implementation of the [`Mailbox`] trait.
//!
//! Uses the `users.messages` endpoints with a caller-supplied OAuth access
//! token. Token acquisition and refresh live outside this service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use gatehouse_core::GatehouseError;

use crate::mime;
use crate::{MailMessage, Mailbox};

/// Base URL for the Gmail REST API.
const API_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// Gmail REST client implementing [`Mailbox`].
#[derive(Debug, Clone)]
pub struct GmailMailbox {
    client: reqwest::Client,
    base_url: String,
}

impl GmailMailbox {
    /// Create a Gmail mailbox client authenticating with `access_token`.
    pub fn new(access_token: &str) -> Result<Self, GatehouseError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {access_token}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                GatehouseError::Config(format!("invalid access token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatehouseError::Mailbox {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatehouseError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| GatehouseError::Mailbox {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatehouseError::Mailbox {
                message: format!("Gmail API returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| GatehouseError::Mailbox {
            message: format!("failed to parse Gmail response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl Mailbox for GmailMailbox {
    async fn list_unread(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, GatehouseError> {
        let url = format!("{}/users/me/messages", self.base_url);
        let response: ListResponse = self
            .get_json(
                &url,
                &[
                    ("q", query.to_string()),
                    ("maxResults", max_results.to_string()),
                ],
            )
            .await?;

        let ids: Vec<String> = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.id)
            .collect();
        debug!(count = ids.len(), "listed unread candidate messages");
        Ok(ids)
    }

    async fn fetch(&self, id: &str) -> Result<MailMessage, GatehouseError> {
        let url = format!("{}/users/me/messages/{id}", self.base_url);
        let response: MessageResponse = self
            .get_json(&url, &[("format", "full".to_string())])
            .await?;

        let from = response.payload.header_value("From").unwrap_or_default();
        let subject = response.payload.header_value("Subject").unwrap_or_default();
        let body = mime::extract_text(&response.payload).unwrap_or_default();

        Ok(MailMessage {
            id: response.id,
            from,
            subject,
            body,
        })
    }

    async fn mark_read(&self, id: &str) -> Result<(), GatehouseError> {
        let url = format!("{}/users/me/messages/{id}/modify", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({"removeLabelIds": ["UNREAD"]}))
            .send()
            .await
            .map_err(|e| GatehouseError::Mailbox {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatehouseError::Mailbox {
                message: format!("Gmail API returned {status}: {body}"),
                source: None,
            });
        }
        debug!(message_id = id, "cleared unread flag");
        Ok(())
    }
}

// --- Gmail wire types ---

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    payload: MessagePayload,
}

/// One MIME part of a Gmail message (the top-level payload is itself a part).
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,

    #[serde(default)]
    pub headers: Vec<MessageHeader>,

    #[serde(default)]
    pub body: Option<PartBody>,

    #[serde(default)]
    pub parts: Option<Vec<MessagePayload>>,
}

impl MessagePayload {
    /// Case-insensitive header lookup.
    pub fn header_value(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.clone())
    }
}

/// A message header name/value pair.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// Body bytes of a MIME part, base64url-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct PartBody {
    #[serde(default)]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_mailbox(base_url: &str) -> GmailMailbox {
        GmailMailbox::new("ya29.test-token")
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn encode(text: &str) -> String {
        use base64::engine::general_purpose::URL_SAFE;
        use base64::Engine;
        URL_SAFE.encode(text.as_bytes())
    }

    #[tokio::test]
    async fn list_unread_returns_ids() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/messages"))
            .and(query_param("q", "is:unread guest"))
            .and(query_param("maxResults", "10"))
            .and(header("authorization", "Bearer ya29.test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{"id": "m-1", "threadId": "t-1"}, {"id": "m-2", "threadId": "t-2"}],
                "resultSizeEstimate": 2
            })))
            .mount(&server)
            .await;

        let mailbox = test_mailbox(&server.uri());
        let ids = mailbox.list_unread("is:unread guest", 10).await.unwrap();
        assert_eq!(ids, vec!["m-1", "m-2"]);
    }

    #[tokio::test]
    async fn list_with_no_matches_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultSizeEstimate": 0
            })))
            .mount(&server)
            .await;

        let mailbox = test_mailbox(&server.uri());
        let ids = mailbox.list_unread("is:unread guest", 10).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn fetch_extracts_headers_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/messages/m-1"))
            .and(query_param("format", "full"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "m-1",
                "payload": {
                    "mimeType": "multipart/alternative",
                    "headers": [
                        {"name": "From", "value": "Host <host@example.com>"},
                        {"name": "Subject", "value": "Guest tomorrow"}
                    ],
                    "parts": [
                        {"mimeType": "text/plain", "body": {"data": encode("Sarah visits at 2:30 pm")}}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let mailbox = test_mailbox(&server.uri());
        let message = mailbox.fetch("m-1").await.unwrap();
        assert_eq!(message.id, "m-1");
        assert_eq!(message.from, "Host <host@example.com>");
        assert_eq!(message.subject, "Guest tomorrow");
        assert_eq!(message.body, "Sarah visits at 2:30 pm");
    }

    #[tokio::test]
    async fn mark_read_posts_label_removal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users/me/messages/m-1/modify"))
            .and(body_json(serde_json::json!({"removeLabelIds": ["UNREAD"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "m-1", "labelIds": ["INBOX"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mailbox = test_mailbox(&server.uri());
        mailbox.mark_read("m-1").await.unwrap();
    }

    #[tokio::test]
    async fn api_error_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&server)
            .await;

        let mailbox = test_mailbox(&server.uri());
        let err = mailbox.list_unread("q", 10).await.unwrap_err();
        assert!(err.to_string().contains("401"), "got: {err}");
    }
}
