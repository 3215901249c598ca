// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential challenge handler backed by an interactive form.
//!
//! The loader calls [`ChallengeHandler::handle_challenge`] on a background
//! thread and waits for the answer. For user-credential challenges within
//! the attempt limit, the handler runs the form on the UI thread and blocks
//! on the result slot until the user submits or cancels. Retries are not
//! driven here: the loader raises a fresh challenge with a higher failure
//! count.

use std::sync::Arc;

use latchkey_config::model::AuthConfig;
pub use latchkey_config::model::DEFAULT_MAX_ATTEMPTS;
use latchkey_core::{
    Challenge, ChallengeHandler, ChallengeKind, ChallengeResponse, CredentialPrompt, FormOutcome,
};
use tracing::{debug, error, info, warn};

use crate::message;
use crate::ui::UiContext;

/// Answers user-credential challenges by asking the user through a
/// [`CredentialPrompt`] on the [`UiContext`].
pub struct CredentialChallengeHandler {
    prompt: Arc<dyn CredentialPrompt>,
    ui: UiContext,
    max_attempts: u32,
}

impl CredentialChallengeHandler {
    pub fn new(prompt: Arc<dyn CredentialPrompt>, ui: UiContext) -> Self {
        Self {
            prompt,
            ui,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_config(prompt: Arc<dyn CredentialPrompt>, ui: UiContext, config: &AuthConfig) -> Self {
        Self::new(prompt, ui).with_max_attempts(config.max_attempts)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Shows a notice on the UI thread and waits until it was shown.
    fn notify(&self, notice: &'static str) {
        let prompt = Arc::clone(&self.prompt);
        if let Err(e) = self.ui.call(move || prompt.notify(notice)) {
            warn!(error = %e, notice, "could not show notice");
        }
    }
}

impl ChallengeHandler for CredentialChallengeHandler {
    fn handle_challenge(&self, challenge: &Challenge) -> ChallengeResponse {
        let uri = challenge.remote_resource().uri();
        let failure_count = challenge.failure_count();

        if challenge.kind() != ChallengeKind::UserCredential {
            debug!(kind = %challenge.kind(), uri, "unsupported challenge kind, cancelling");
            return ChallengeResponse::Cancel;
        }

        if failure_count > self.max_attempts {
            warn!(
                uri,
                failure_count,
                max_attempts = self.max_attempts,
                "maximum sign-in attempts exceeded, cancelling"
            );
            self.notify(message::EXCEEDED_MAX_ATTEMPTS);
            return ChallengeResponse::Cancel;
        }

        if self.ui.is_current() {
            error!(uri, "credential challenge raised on the ui thread, cancelling");
            return ChallengeResponse::Cancel;
        }

        let request = message::prompt_request(challenge);
        let prompt = Arc::clone(&self.prompt);
        let resource = Arc::clone(challenge.remote_resource());

        debug!(uri, failure_count, "presenting credential form");
        let outcome = self.ui.call(move || {
            let outcome = prompt.present(&request);
            if outcome == FormOutcome::Cancelled
                && let Some(loadable) = resource.loadable()
            {
                loadable.cancel_load();
            }
            outcome
        });

        match outcome {
            Ok(FormOutcome::Submitted(credential)) => {
                info!(uri, username = credential.username(), "credential submitted");
                ChallengeResponse::ContinueWithCredential(credential)
            }
            Ok(FormOutcome::Cancelled) => {
                info!(uri, "sign-in cancelled by user");
                ChallengeResponse::Cancel
            }
            Err(e) => {
                warn!(uri, error = %e, "credential form did not complete, cancelling");
                ChallengeResponse::Cancel
            }
        }
    }
}
