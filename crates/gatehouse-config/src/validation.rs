// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths, sane poll intervals, and positive
//! processing limits.

use crate::diagnostic::ConfigError;
use crate::model::GatehouseConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GatehouseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    if config.gemini.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.max_output_tokens must be at least 1".to_string(),
        });
    }

    // Validate gateway.host looks like a valid IP or hostname.
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.processing.default_daily_limit < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "processing.default_daily_limit must be at least 1, got {}",
                config.processing.default_daily_limit
            ),
        });
    }

    if config.mailbox.batch_size < 1 || config.mailbox.batch_size > 100 {
        errors.push(ConfigError::Validation {
            message: format!(
                "mailbox.batch_size must be between 1 and 100, got {}",
                config.mailbox.batch_size
            ),
        });
    }

    if config.mailbox.poll_interval_secs < 5 {
        errors.push(ConfigError::Validation {
            message: format!(
                "mailbox.poll_interval_secs must be at least 5, got {}",
                config.mailbox.poll_interval_secs
            ),
        });
    }

    // A poller without a token cannot authenticate its first request.
    if config.mailbox.enabled && config.mailbox.access_token.is_none() {
        errors.push(ConfigError::Validation {
            message: "mailbox.access_token is required when mailbox.enabled is true".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
