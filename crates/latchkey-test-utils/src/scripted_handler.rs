// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenge handler with pre-configured responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use latchkey_core::{Challenge, ChallengeHandler, ChallengeKind, ChallengeResponse, Credential};

/// What the handler saw for one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedChallenge {
    pub kind: ChallengeKind,
    pub uri: String,
    pub failure_count: u32,
}

/// Answers challenges from a queue, in order. An empty queue answers `Cancel`.
///
/// Responses queued with [`ScriptedHandler::then_user_cancel`] also invoke
/// the resource's cancel-load capability, like a user pressing cancel.
#[derive(Default)]
pub struct ScriptedHandler {
    responses: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<RecordedChallenge>>,
}

enum Scripted {
    Respond(ChallengeResponse),
    UserCancel,
}

impl ScriptedHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_credential(self, username: &str, password: &str) -> Self {
        self.push(Scripted::Respond(ChallengeResponse::ContinueWithCredential(
            Credential::new(username, password),
        )))
    }

    pub fn then_cancel(self) -> Self {
        self.push(Scripted::Respond(ChallengeResponse::Cancel))
    }

    pub fn then_user_cancel(self) -> Self {
        self.push(Scripted::UserCancel)
    }

    fn push(self, entry: Scripted) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(entry);
        self
    }

    /// Every challenge handled so far.
    pub fn challenges(&self) -> Vec<RecordedChallenge> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ChallengeHandler for ScriptedHandler {
    fn handle_challenge(&self, challenge: &Challenge) -> ChallengeResponse {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedChallenge {
                kind: challenge.kind(),
                uri: challenge.remote_resource().uri().to_string(),
                failure_count: challenge.failure_count(),
            });

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(Scripted::Respond(response)) => response,
            Some(Scripted::UserCancel) => {
                if let Some(loadable) = challenge.remote_resource().loadable() {
                    loadable.cancel_load();
                }
                ChallengeResponse::Cancel
            }
            None => ChallengeResponse::Cancel,
        }
    }
}
