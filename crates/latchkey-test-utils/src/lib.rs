// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for latchkey.
//!
//! - [`ScriptedPrompt`] - automated responder that drives a real credential form
//! - [`ScriptedHandler`] - challenge handler with queued responses
//! - [`MockResource`] - remote resource that counts cancel requests

pub mod mock_resource;
pub mod scripted_handler;
pub mod scripted_prompt;

pub use mock_resource::MockResource;
pub use scripted_handler::{RecordedChallenge, ScriptedHandler};
pub use scripted_prompt::{FormAction, ScriptedPrompt};
