// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks the constraints serde attributes cannot express. All errors are
//! collected; validation does not stop at the first one.

use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::LatchkeyConfig;

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &LatchkeyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(url) = config.portal.url.as_deref()
        && let Err(message) = validate_portal_url(url)
    {
        errors.push(ConfigError::Validation { message });
    }

    if config.portal.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "portal.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parses a portal URL, which must be an absolute http(s) URL with a host.
pub fn validate_portal_url(url: &str) -> Result<Url, String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("portal.url must not be empty".to_string());
    }
    let parsed =
        Url::parse(trimmed).map_err(|e| format!("portal.url `{trimmed}` is not a valid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("portal.url `{trimmed}` must start with http:// or https://"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("portal.url `{trimmed}` has no host"));
    }
    Ok(parsed)
}
