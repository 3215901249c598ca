// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing text for credential prompts.

use latchkey_core::{Challenge, PromptRequest};

/// Notice shown when a challenge is cancelled for exceeding the attempt limit.
pub const EXCEEDED_MAX_ATTEMPTS: &str = "Exceeded maximum amount of attempts. Please try again!";

pub fn credential_required(uri: &str) -> String {
    format!("Credential is required to access {uri}")
}

pub fn wrong_credential(uri: &str) -> String {
    format!("Wrong credential was passed to {uri}")
}

/// Builds the form request for a challenge; the headline depends on
/// whether a previous credential was rejected.
pub fn prompt_request(challenge: &Challenge) -> PromptRequest {
    let uri = challenge.remote_resource().uri().to_string();
    let message = if challenge.failure_count() > 0 {
        wrong_credential(&uri)
    } else {
        credential_required(&uri)
    };
    PromptRequest {
        message,
        uri,
        failure_count: challenge.failure_count(),
    }
}
