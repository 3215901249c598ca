// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the portal self-description endpoint.
//!
//! Credentials are sent as HTTP Basic auth. A rejection is either an
//! HTTP 401/403 or an error document whose code is one of the
//! authentication codes the portal uses (401, 403, 498, 499).

use std::time::Duration;

use latchkey_core::Credential;
use reqwest::Url;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoadError;

/// Path segments of the portal self-description, relative to the portal URL.
const SELF_PATH: &[&str] = &["sharing", "rest", "portals", "self"];

/// Error-document codes that mean "this credential is not accepted".
const AUTH_ERROR_CODES: &[u32] = &[401, 403, 498, 499];

/// Portal description returned by a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "portalName")]
    pub portal_name: Option<String>,
    /// The signed-in user; absent for anonymous access.
    #[serde(default)]
    pub user: Option<PortalUser>,
}

/// Signed-in portal user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalUser {
    pub username: String,
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
}

/// Result of one request: the portal, or a rejection of the credential.
#[derive(Debug)]
pub(crate) enum FetchOutcome {
    Loaded(PortalInfo),
    Rejected(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: u32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PortalClient {
    http: reqwest::Client,
    self_url: Url,
}

impl PortalClient {
    pub(crate) fn new(base_url: &Url, timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            self_url: self_url(base_url)?,
        })
    }

    /// Fetches the portal description, anonymously when `credential` is `None`.
    pub(crate) async fn fetch_self(
        &self,
        credential: Option<&Credential>,
    ) -> Result<FetchOutcome, LoadError> {
        let mut request = self.http.get(self.self_url.clone());
        if let Some(credential) = credential {
            request = request.basic_auth(
                credential.username(),
                Some(credential.password().expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %self.self_url, status = status.as_u16(), authenticated = credential.is_some(), "portal responded");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(FetchOutcome::Rejected(format!(
                "portal rejected the credential (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        classify(body)
    }
}

/// `<base>/sharing/rest/portals/self?f=json`, dropping any query or fragment
/// on the base.
fn self_url(base: &Url) -> Result<Url, LoadError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| LoadError::Internal(format!("portal url `{base}` cannot be a base")))?
        .pop_if_empty()
        .extend(SELF_PATH);
    url.query_pairs_mut().append_pair("f", "json");
    Ok(url)
}

/// Sorts a 200 response body into loaded, rejected or service error.
fn classify(body: serde_json::Value) -> Result<FetchOutcome, LoadError> {
    if body.get("error").is_some() {
        let envelope: ErrorEnvelope = serde_json::from_value(body)
            .map_err(|e| LoadError::Internal(format!("malformed error document: {e}")))?;
        let ErrorBody { code, message } = envelope.error;
        if AUTH_ERROR_CODES.contains(&code) {
            return Ok(FetchOutcome::Rejected(message));
        }
        return Err(LoadError::Service { code, message });
    }

    let info: PortalInfo = serde_json::from_value(body)
        .map_err(|e| LoadError::Internal(format!("malformed portal description: {e}")))?;
    Ok(FetchOutcome::Loaded(info))
}
