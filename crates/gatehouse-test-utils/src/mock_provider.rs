// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockCompletionProvider` implements [`CompletionProvider`] with
//! pre-configured responses, enabling fast, CI-runnable tests without
//! external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gatehouse_core::{CompletionProvider, GatehouseError};

/// A scripted response outcome.
enum Outcome {
    Text(String),
    Error(String),
}

/// A mock completion provider that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned.
pub struct MockCompletionProvider {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
}

impl MockCompletionProvider {
    /// Create a new mock provider with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given text responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(Outcome::Text).collect(),
            )),
        }
    }

    /// Add a text response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Text(text.into()));
    }

    /// Add a provider error to the end of the queue.
    pub async fn add_error(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Error(message.into()));
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, GatehouseError> {
        match self.outcomes.lock().await.pop_front() {
            Some(Outcome::Text(text)) => Ok(text),
            Some(Outcome::Error(message)) => Err(GatehouseError::Provider {
                message,
                source: None,
            }),
            None => Ok("mock response".to_string()),
        }
    }
}
