// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Automated responder for credential forms.
//!
//! Each call to `present` consumes one scripted session and replays its
//! actions against a real [`CredentialForm`], so a script can only submit
//! when the form would let a user submit.

use std::collections::VecDeque;
use std::sync::Mutex;

use latchkey_core::{CredentialForm, CredentialPrompt, FormError, FormOutcome, PromptRequest};
use tracing::debug;

/// One user interaction with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    TypeUsername(String),
    TypePassword(String),
    Submit,
    Cancel,
}

enum Session {
    Actions(Vec<FormAction>),
    Panic,
}

/// A [`CredentialPrompt`] that replays scripted sessions.
///
/// A session that ends without a terminal action, or a `present` call with
/// no session left, counts as the user dismissing the form (cancel).
#[derive(Default)]
pub struct ScriptedPrompt {
    sessions: Mutex<VecDeque<Session>>,
    requests: Mutex<Vec<PromptRequest>>,
    notices: Mutex<Vec<String>>,
    threads: Mutex<Vec<Option<String>>>,
    rejected_submits: Mutex<usize>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a session replaying `actions` in order.
    pub fn then_actions(self, actions: Vec<FormAction>) -> Self {
        self.push(Session::Actions(actions))
    }

    /// Queues a session that fills both fields and submits.
    pub fn then_submit(self, username: &str, password: &str) -> Self {
        self.then_actions(vec![
            FormAction::TypeUsername(username.to_string()),
            FormAction::TypePassword(password.to_string()),
            FormAction::Submit,
        ])
    }

    /// Queues a session that presses cancel.
    pub fn then_cancel(self) -> Self {
        self.then_actions(vec![FormAction::Cancel])
    }

    /// Queues a session that panics, as if the UI was torn down mid-form.
    pub fn then_panic(self) -> Self {
        self.push(Session::Panic)
    }

    fn push(self, session: Session) -> Self {
        lock(&self.sessions).push_back(session);
        self
    }

    /// Every form request presented so far.
    pub fn requests(&self) -> Vec<PromptRequest> {
        lock(&self.requests).clone()
    }

    /// Every notice shown so far.
    pub fn notices(&self) -> Vec<String> {
        lock(&self.notices).clone()
    }

    /// Name of the thread each form was presented on.
    pub fn present_threads(&self) -> Vec<Option<String>> {
        lock(&self.threads).clone()
    }

    /// Submit presses ignored because the submit action was disabled.
    pub fn rejected_submits(&self) -> usize {
        *lock(&self.rejected_submits)
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn present(&self, request: &PromptRequest) -> FormOutcome {
        lock(&self.requests).push(request.clone());
        lock(&self.threads).push(std::thread::current().name().map(str::to_string));

        let session = lock(&self.sessions).pop_front();
        let actions = match session {
            Some(Session::Actions(actions)) => actions,
            Some(Session::Panic) => panic!("scripted prompt torn down"),
            None => Vec::new(),
        };

        let mut form = CredentialForm::new();
        for action in actions {
            match action {
                FormAction::TypeUsername(username) => form.set_username(username),
                FormAction::TypePassword(password) => form.set_password(password),
                FormAction::Submit => match form.submit() {
                    Ok(outcome) => return outcome,
                    Err(FormError::SubmitDisabled) => {
                        debug!("scripted submit ignored, form incomplete");
                        *lock(&self.rejected_submits) += 1;
                    }
                    Err(FormError::Closed) => break,
                },
                FormAction::Cancel => return form.cancel().unwrap_or(FormOutcome::Cancelled),
            }
        }

        FormOutcome::Cancelled
    }

    fn notify(&self, message: &str) {
        lock(&self.notices).push(message.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
