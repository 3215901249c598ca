// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `latchkey sign-in` command implementation.

use std::sync::Arc;

use colored::Colorize;
use latchkey_auth::{CredentialChallengeHandler, UiContext};
use latchkey_config::model::{LatchkeyConfig, PortalConfig};
use latchkey_core::LatchkeyError;
use latchkey_portal::{EMPTY_URL_MESSAGE, Portal, describe_outcome};
use tracing::{error, info};

use crate::terminal::TerminalPrompt;

/// Name of the thread credential forms run on.
const UI_THREAD_NAME: &str = "latchkey-ui";

/// Portal settings for this run: the `--url` flag wins over the config file,
/// and `--anonymous` turns off `login_required`.
pub fn effective_portal_config(
    config: &PortalConfig,
    url: Option<String>,
    anonymous: bool,
) -> Result<PortalConfig, LatchkeyError> {
    let url = url
        .or_else(|| config.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| LatchkeyError::Config(EMPTY_URL_MESSAGE.to_string()))?;

    Ok(PortalConfig {
        url: Some(url),
        login_required: config.login_required && !anonymous,
        request_timeout_secs: config.request_timeout_secs,
    })
}

/// Signs in to the portal, asking for credentials on the terminal.
pub async fn run_sign_in(
    config: &LatchkeyConfig,
    url: Option<String>,
    anonymous: bool,
) -> Result<(), LatchkeyError> {
    let portal_config = effective_portal_config(&config.portal, url, anonymous).inspect_err(|e| {
        eprintln!("{}", e.to_string().red());
        error!(error = %e, "cannot sign in");
    })?;

    let portal = Arc::new(Portal::from_config(&portal_config)?);
    let ui = UiContext::spawn(UI_THREAD_NAME)?;
    let handler = Arc::new(CredentialChallengeHandler::from_config(
        Arc::new(TerminalPrompt::new()),
        ui,
        &config.auth,
    ));

    info!(url = portal.url(), max_attempts = handler.max_attempts(), "signing in");
    let result = portal.load(handler).await;
    let message = describe_outcome(&result);

    match result {
        Ok(info) => {
            println!("{}", message.green().bold());
            if let Some(name) = info.name.as_deref().or(info.portal_name.as_deref()) {
                println!("  portal: {name}");
            }
            if let Some(user) = &info.user {
                println!("  signed in as: {}", user.username);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", message.red());
            error!(error = %err, "{message}");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_flag_overrides_config() {
        let config = PortalConfig {
            url: Some("https://from-config.test".to_string()),
            ..PortalConfig::default()
        };
        let effective =
            effective_portal_config(&config, Some("https://from-flag.test".to_string()), false)
                .unwrap();
        assert_eq!(effective.url.as_deref(), Some("https://from-flag.test"));
        assert!(effective.login_required);
    }

    #[test]
    fn anonymous_flag_disables_login_required() {
        let config = PortalConfig {
            url: Some("https://portal.test".to_string()),
            ..PortalConfig::default()
        };
        let effective = effective_portal_config(&config, None, true).unwrap();
        assert!(!effective.login_required);
    }

    #[test]
    fn missing_url_reports_empty_url() {
        let err = effective_portal_config(&PortalConfig::default(), Some("  ".to_string()), false)
            .unwrap_err();
        assert!(err.to_string().contains(EMPTY_URL_MESSAGE));
    }
}
