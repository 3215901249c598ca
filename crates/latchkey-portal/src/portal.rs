// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loadable portal.
//!
//! `load` runs the sign-in sequence: ask the challenge handler for a
//! credential (on a blocking thread, since the handler may wait for a
//! human), try it, and raise a new challenge with `failure_count + 1` when
//! it is rejected. The sequence ends when the portal loads, the handler
//! cancels, or `cancel_load` is called.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use latchkey_config::model::PortalConfig;
use latchkey_config::validation::validate_portal_url;
use latchkey_core::{
    Challenge, ChallengeHandler, ChallengeResponse, Credential, LatchkeyError, LoadStatus,
    Loadable, RemoteResource,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::EMPTY_URL_MESSAGE;
use crate::client::{FetchOutcome, PortalClient, PortalInfo};
use crate::error::LoadError;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A remote portal that may require sign-in.
pub struct Portal {
    url: String,
    login_required: bool,
    client: PortalClient,
    status: watch::Sender<LoadStatus>,
    cancel: Mutex<CancellationToken>,
    user_cancelled: AtomicBool,
    info: Mutex<Option<PortalInfo>>,
}

impl Portal {
    /// Creates a portal for `url`. With `login_required` the first request
    /// already carries a credential; otherwise anonymous access is tried
    /// first.
    pub fn new(url: &str, login_required: bool) -> Result<Self, LatchkeyError> {
        Self::with_timeout(url, login_required, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, LatchkeyError> {
        Self::with_timeout(
            config.url.as_deref().unwrap_or_default(),
            config.login_required,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_timeout(
        url: &str,
        login_required: bool,
        timeout: Duration,
    ) -> Result<Self, LatchkeyError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(LatchkeyError::Config(EMPTY_URL_MESSAGE.to_string()));
        }
        let base = validate_portal_url(url).map_err(LatchkeyError::Config)?;

        let client = PortalClient::new(&base, timeout).map_err(|e| LatchkeyError::Transport {
            message: "failed to build HTTP client".to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            url: url.to_string(),
            login_required,
            client,
            status: watch::Sender::new(LoadStatus::NotLoaded),
            cancel: Mutex::new(CancellationToken::new()),
            user_cancelled: AtomicBool::new(false),
            info: Mutex::new(None),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn login_required(&self) -> bool {
        self.login_required
    }

    /// Observes load status changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// The portal description, once loaded.
    pub fn info(&self) -> Option<PortalInfo> {
        self.info.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Loads the portal, answering credential challenges with `handler`.
    ///
    /// A loaded portal returns its cached description. A failed load can be
    /// retried by calling `load` again.
    pub async fn load(
        self: &Arc<Self>,
        handler: Arc<dyn ChallengeHandler>,
    ) -> Result<PortalInfo, LoadError> {
        if let Some(info) = self.info() {
            return Ok(info);
        }

        // The token and flag are reset before `Loading` becomes visible, so a
        // `cancel_load` from anyone who observes `Loading` hits this load.
        let token = CancellationToken::new();
        let started = self.status.send_if_modified(|status| {
            if *status == LoadStatus::Loading {
                return false;
            }
            *self.cancel.lock().unwrap_or_else(|e| e.into_inner()) = token.clone();
            self.user_cancelled.store(false, Ordering::SeqCst);
            *status = LoadStatus::Loading;
            true
        });
        if !started {
            return Err(LoadError::AlreadyLoading);
        }

        info!(url = %self.url, login_required = self.login_required, "loading portal");

        let result = self.sign_in(handler, &token).await;

        match &result {
            Ok(info) => {
                *self.info.lock().unwrap_or_else(|e| e.into_inner()) = Some(info.clone());
                self.status.send_replace(LoadStatus::Loaded);
                info!(url = %self.url, user = ?info.user.as_ref().map(|u| &u.username), "portal loaded");
            }
            Err(err) => {
                self.status.send_replace(LoadStatus::FailedToLoad);
                warn!(url = %self.url, error = %err, "portal failed to load");
            }
        }
        result
    }

    async fn sign_in(
        self: &Arc<Self>,
        handler: Arc<dyn ChallengeHandler>,
        token: &CancellationToken,
    ) -> Result<PortalInfo, LoadError> {
        let mut failure_count = 0u32;
        let mut last_rejection: Option<String> = None;

        if !self.login_required {
            match self.fetch(None, token).await? {
                FetchOutcome::Loaded(info) => return Ok(info),
                FetchOutcome::Rejected(reason) => {
                    debug!(url = %self.url, reason = %reason, "anonymous access rejected");
                }
            }
        }

        loop {
            let resource: Arc<dyn RemoteResource> = self.clone();
            let challenge = Challenge::user_credential(resource, failure_count);
            let response = raise(Arc::clone(&handler), challenge).await?;

            let credential = match response {
                ChallengeResponse::ContinueWithCredential(credential) => credential,
                ChallengeResponse::Cancel => {
                    return Err(self.cancelled_error(failure_count, last_rejection));
                }
            };

            if token.is_cancelled() {
                return Err(LoadError::Cancelled);
            }

            match self.fetch(Some(&credential), token).await? {
                FetchOutcome::Loaded(info) => return Ok(info),
                FetchOutcome::Rejected(reason) => {
                    failure_count += 1;
                    debug!(url = %self.url, failure_count, reason = %reason, "credential rejected");
                    last_rejection = Some(reason);
                }
            }
        }
    }

    async fn fetch(
        &self,
        credential: Option<&Credential>,
        token: &CancellationToken,
    ) -> Result<FetchOutcome, LoadError> {
        tokio::select! {
            _ = token.cancelled() => Err(LoadError::Cancelled),
            outcome = self.client.fetch_self(credential) => outcome,
        }
    }

    /// The error for a sign-in the handler gave up on.
    fn cancelled_error(&self, failure_count: u32, last_rejection: Option<String>) -> LoadError {
        if self.user_cancelled.load(Ordering::SeqCst) {
            return LoadError::Cancelled;
        }
        match last_rejection {
            Some(reason) if failure_count > 0 => LoadError::AuthenticationFailed {
                attempts: failure_count,
                reason,
            },
            _ => LoadError::AuthenticationRequired,
        }
    }
}

/// Hands the challenge to the handler on a blocking thread.
async fn raise(
    handler: Arc<dyn ChallengeHandler>,
    challenge: Challenge,
) -> Result<ChallengeResponse, LoadError> {
    tokio::task::spawn_blocking(move || handler.handle_challenge(&challenge))
        .await
        .map_err(|e| LoadError::Internal(format!("challenge handler panicked: {e}")))
}

impl RemoteResource for Portal {
    fn uri(&self) -> &str {
        &self.url
    }

    fn loadable(&self) -> Option<&dyn Loadable> {
        Some(self)
    }
}

impl Loadable for Portal {
    fn load_status(&self) -> LoadStatus {
        *self.status.borrow()
    }

    fn cancel_load(&self) {
        if self.load_status() != LoadStatus::Loading {
            debug!(url = %self.url, "cancel_load ignored, portal is not loading");
            return;
        }
        info!(url = %self.url, "cancelling portal load");
        self.user_cancelled.store(true, Ordering::SeqCst);
        self.cancel.lock().unwrap_or_else(|e| e.into_inner()).cancel();
    }
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("url", &self.url)
            .field("login_required", &self.login_required)
            .field("status", &*self.status.borrow())
            .finish()
    }
}
