// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI capability used by the credential handler.

use tracing::info;

use crate::form::{FormOutcome, PromptRequest};

/// Presents credential forms and short notices to the user.
///
/// Implementations run on the UI execution context. `present` returns only
/// once the form reached a terminal state (submit or cancel).
pub trait CredentialPrompt: Send + Sync + 'static {
    /// Shows a modal credential form and waits for submit or cancel.
    fn present(&self, request: &PromptRequest) -> FormOutcome;

    /// Shows a transient, informational message.
    fn notify(&self, message: &str) {
        info!(message, "notice");
    }
}
