// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for latchkey.
//!
//! Defines the data model shared by every crate in the workspace: the
//! [`Challenge`] raised by a remote-resource loader, the [`Credential`] a
//! user supplies, the [`ChallengeResponse`] handed back, and the credential
//! form state. The seams between the loader, the challenge handler and the
//! UI layer are the traits in [`traits`].

pub mod error;
pub mod form;
pub mod traits;
pub mod types;

pub use error::LatchkeyError;
pub use form::{CredentialForm, FormError, FormOutcome, PromptRequest};
pub use traits::{ChallengeHandler, CredentialPrompt, Loadable, RemoteResource};
pub use types::{Challenge, ChallengeKind, ChallengeResponse, Credential, LoadStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latchkey_error_has_all_variants() {
        let _config = LatchkeyError::Config("test".into());
        let _transport = LatchkeyError::Transport {
            message: "test".into(),
            source: None,
        };
        let _internal = LatchkeyError::Internal("test".into());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_handler<T: ChallengeHandler>() {}
        fn _assert_prompt<T: CredentialPrompt>() {}
        fn _assert_resource<T: RemoteResource>() {}
        fn _assert_loadable<T: Loadable>() {}
    }
}
