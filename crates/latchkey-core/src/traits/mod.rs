// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the resource loader, the challenge handler and the UI.
//!
//! The loader raises challenges through a [`ChallengeHandler`] it is given
//! explicitly; the handler talks to the user through a [`CredentialPrompt`];
//! the resource that raised the challenge is a [`RemoteResource`], optionally
//! [`Loadable`] so the user can cancel its load.

pub mod handler;
pub mod prompt;
pub mod resource;

pub use handler::ChallengeHandler;
pub use prompt::CredentialPrompt;
pub use resource::{Loadable, RemoteResource};
