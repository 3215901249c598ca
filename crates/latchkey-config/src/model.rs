// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is an
//! error at startup rather than a silently ignored setting.

use serde::{Deserialize, Serialize};

/// Top-level latchkey configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LatchkeyConfig {
    /// Credential challenge handling.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Portal to sign in to.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credential challenge handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Highest failure count that still gets a credential form. A challenge
    /// whose failure count exceeds this is cancelled without prompting.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// Default for [`AuthConfig::max_attempts`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Portal connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Base URL of the portal, e.g. `https://gis.example.com/portal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Ask for credentials before the first request instead of trying
    /// anonymous access.
    #[serde(default = "default_login_required")]
    pub login_required: bool,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            url: None,
            login_required: default_login_required(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_login_required() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for latchkey crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
