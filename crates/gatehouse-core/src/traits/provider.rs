// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative-model completion trait.

use async_trait::async_trait;

use crate::error::GatehouseError;

/// A single-shot text completion endpoint.
///
/// The extraction client sends one prompt and expects free text back,
/// hopefully JSON, possibly fenced. Anything stricter is the caller's
/// problem: generative output is a contract with the model, not a schema.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` and return the model's text output.
    async fn generate(&self, prompt: &str) -> Result<String, GatehouseError>;
}
