// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential form state.
//!
//! A form has two text inputs and two terminal actions. Submit is only
//! enabled while both inputs are non-empty, and once a terminal action ran
//! the form is closed: it cannot produce a second outcome.

use thiserror::Error;
use zeroize::Zeroizing;

use crate::types::Credential;

/// What the form shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Headline text ("Credential is required to access ...").
    pub message: String,
    /// URI of the resource asking for credentials.
    pub uri: String,
    /// Rejected attempts so far in this sign-in sequence.
    pub failure_count: u32,
}

/// Terminal state of a credential form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The user submitted both fields.
    Submitted(Credential),
    /// The user dismissed the form.
    Cancelled,
}

/// Rejected form actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// Submit was triggered while username or password is empty.
    #[error("username and password are both required")]
    SubmitDisabled,
    /// The form already reached a terminal state.
    #[error("form is already closed")]
    Closed,
}

/// Editable username/password form.
///
/// Submit is enabled only while both fields are non-empty. Submitting or
/// cancelling closes the form, after which every action is rejected.
#[derive(Default)]
pub struct CredentialForm {
    /// As typed, including any `@domain` suffix.
    username: String,
    /// Wiped on drop and on `clear`.
    password: Zeroizing<String>,
    /// Set once the form reached a terminal state.
    closed: bool,
}

impl CredentialForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replaces the username field.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Replaces the password field; the old value is zeroized.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
    }

    /// Empties both fields.
    pub fn clear(&mut self) {
        self.username.clear();
        self.password = Zeroizing::new(String::new());
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.closed && !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Runs the submit action, closing the form on success.
    pub fn submit(&mut self) -> Result<FormOutcome, FormError> {
        if self.closed {
            return Err(FormError::Closed);
        }
        if !self.can_submit() {
            return Err(FormError::SubmitDisabled);
        }
        self.closed = true;
        let password = std::mem::take(&mut *self.password);
        Ok(FormOutcome::Submitted(Credential::new(
            self.username.clone(),
            password,
        )))
    }

    /// Runs the cancel action, closing the form.
    pub fn cancel(&mut self) -> Result<FormOutcome, FormError> {
        if self.closed {
            return Err(FormError::Closed);
        }
        self.closed = true;
        self.clear();
        Ok(FormOutcome::Cancelled)
    }
}

impl std::fmt::Debug for CredentialForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("closed", &self.closed)
            .finish()
    }
}
