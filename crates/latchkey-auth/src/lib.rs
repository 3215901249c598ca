// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive credential challenge handling.
//!
//! [`CredentialChallengeHandler`] answers user-credential challenges raised
//! on a background thread by running a credential form on a dedicated
//! [`UiContext`] and blocking until the form is submitted or cancelled.

pub mod handler;
pub mod message;
pub mod ui;

pub use handler::{CredentialChallengeHandler, DEFAULT_MAX_ATTEMPTS};
pub use ui::UiContext;
