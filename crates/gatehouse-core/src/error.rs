// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Gatehouse guest registration service.

use thiserror::Error;

/// The primary error type used across all Gatehouse collaborator traits and
/// core operations.
///
/// The extraction pipeline itself never lets one of these cross its public
/// boundary: every stage converts failures into its structured outcome type.
/// These variants surface at the seams -- storage, the model endpoint, the
/// mailbox provider -- and in the binary.
#[derive(Debug, Error)]
pub enum GatehouseError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative-model endpoint errors (API failure, malformed response, key missing).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Mailbox provider errors (listing, fetching, or flagging messages).
    #[error("mailbox error: {message}")]
    Mailbox {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
