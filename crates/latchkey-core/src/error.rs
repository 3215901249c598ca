// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for latchkey.

use thiserror::Error;

/// The primary error type used across latchkey crates.
///
/// Challenge handling itself never fails (it always answers with a
/// [`ChallengeResponse`](crate::ChallengeResponse)); this type covers the
/// surrounding plumbing.
#[derive(Debug, Error)]
pub enum LatchkeyError {
    /// Configuration errors (invalid TOML, bad values, unusable URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport errors talking to a remote resource.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
