// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Precedence: `./latchkey.toml` > `~/.config/latchkey/latchkey.toml` >
//! `/etc/latchkey/latchkey.toml` > defaults, with `LATCHKEY_*` env vars on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LatchkeyConfig;

pub const LOCAL_CONFIG_FILE: &str = "latchkey.toml";
pub const SYSTEM_CONFIG_FILE: &str = "/etc/latchkey/latchkey.toml";

/// `~/.config/latchkey/latchkey.toml`, when a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("latchkey").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<LatchkeyConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LatchkeyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LatchkeyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Maps `LATCHKEY_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `LATCHKEY_AUTH_MAX_ATTEMPTS` maps to `auth.max_attempts`.
fn env_provider() -> Env {
    Env::prefixed("LATCHKEY_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("auth_", "auth.", 1)
            .replacen("portal_", "portal.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LATCHKEY_AUTH_MAX_ATTEMPTS", "3");
            jail.set_env("LATCHKEY_PORTAL_LOGIN_REQUIRED", "false");
            jail.set_env("LATCHKEY_LOGGING_LEVEL", "debug");
            jail.create_file(
                "custom.toml",
                "[portal]\nurl = \"https://portal.example.com/gis\"\n",
            )?;

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.auth.max_attempts, 3);
            assert!(!config.portal.login_required);
            assert_eq!(config.logging.level, "debug");
            assert_eq!(
                config.portal.url.as_deref(),
                Some("https://portal.example.com/gis")
            );
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config_from_path(Path::new("does-not-exist.toml"))?;
            assert_eq!(config.auth.max_attempts, 5);
            Ok(())
        });
    }
}
