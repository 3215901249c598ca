// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenge handler trait.

use crate::types::{Challenge, ChallengeResponse};

/// Answers authentication challenges raised by a resource loader.
///
/// Called from a background execution context. The call is synchronous: the
/// loader waits for the returned response before it continues, and every
/// challenge gets exactly one response.
pub trait ChallengeHandler: Send + Sync + 'static {
    /// Produces the response for `challenge`.
    fn handle_challenge(&self, challenge: &Challenge) -> ChallengeResponse;
}
