// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Gatehouse service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Gatehouse configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatehouseConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Gemini API settings for the extraction model.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Mailbox polling settings.
    #[serde(default)]
    pub mailbox: MailboxConfig,

    /// Inbound webhook gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Extraction pipeline policy settings.
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Display name of the portal this service registers guests for.
    #[serde(default = "default_portal_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_portal_name() -> String {
    "gatehouse".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier used for extraction requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens the model may generate per extraction.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_output_tokens() -> u32 {
    2048
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("gatehouse").join("gatehouse.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("gatehouse.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Mailbox polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailboxConfig {
    /// Enable the mailbox poller. Disabled by default; the webhook alone is
    /// a complete deployment.
    #[serde(default)]
    pub enabled: bool,

    /// OAuth access token for the Gmail API. Token acquisition and refresh
    /// are handled outside this service.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Seconds between mailbox polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum messages examined per poll.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Gmail search query selecting candidate guest emails.
    #[serde(default = "default_search_query")]
    pub search_query: String,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            access_token: None,
            poll_interval_secs: default_poll_interval_secs(),
            batch_size: default_batch_size(),
            search_query: default_search_query(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_batch_size() -> u32 {
    10
}

fn default_search_query() -> String {
    "is:unread (guest OR visitor OR visit OR meeting OR appointment OR access)".to_string()
}

/// Inbound webhook gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Enable the HTTP gateway.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token required on webhook requests. `None` leaves the webhook
    /// open, matching email-provider callers that cannot carry portal auth.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3001
}

/// Extraction pipeline policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Daily processing ceiling applied to profiles that do not carry their
    /// own `max_daily_email_processing`.
    #[serde(default = "default_daily_limit")]
    pub default_daily_limit: i64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_daily_limit: default_daily_limit(),
        }
    }
}

fn default_daily_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = GatehouseConfig::default();
        assert_eq!(config.portal.name, "gatehouse");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.processing.default_daily_limit, 10);
        assert_eq!(config.gateway.port, 3001);
        assert!(!config.mailbox.enabled);
        assert!(config.mailbox.search_query.contains("is:unread"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[portal]
name = "front-desk"
unknown_key = true
"#;
        assert!(toml::from_str::<GatehouseConfig>(toml_str).is_err());
    }

    #[test]
    fn partial_sections_fill_with_defaults() {
        let toml_str = r#"
[gemini]
api_key = "test-key"

[gateway]
port = 8080
"#;
        let config: GatehouseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "127.0.0.1");
    }
}
