// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portal load errors.

use thiserror::Error;

/// Error code reported when the user cancelled the sign-in.
pub const USER_CANCELLED_CODE: u32 = 17;

/// Why a portal failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The user cancelled the load while being asked for a credential.
    #[error("user canceled the sign in")]
    Cancelled,

    /// The portal needs a credential and none was provided.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Every credential supplied was rejected and the handler gave up.
    #[error("authentication failed after {attempts} rejected credential(s): {reason}")]
    AuthenticationFailed { attempts: u32, reason: String },

    /// Unexpected HTTP status from the portal.
    #[error("portal returned HTTP {status}")]
    Http { status: u16 },

    /// The portal answered with an error document.
    #[error("portal error {code}: {message}")]
    Service { code: u32, message: String },

    /// Network or decoding failure.
    #[error("request to portal failed")]
    Transport(#[from] reqwest::Error),

    /// A load is already running on this portal.
    #[error("portal is already loading")]
    AlreadyLoading,

    /// Internal failure, such as a panicking challenge handler.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LoadError {
    /// Numeric code, when the error has one.
    pub fn code(&self) -> Option<u32> {
        match self {
            LoadError::Cancelled => Some(USER_CANCELLED_CODE),
            LoadError::Http { status } => Some(u32::from(*status)),
            LoadError::Service { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }

    /// The most specific message available: the underlying cause for
    /// wrapped errors, the reason for rejected credentials.
    pub fn cause_message(&self) -> String {
        match self {
            LoadError::AuthenticationFailed { reason, .. } => reason.clone(),
            LoadError::Transport(err) => std::error::Error::source(err)
                .map(|source| source.to_string())
                .unwrap_or_else(|| err.to_string()),
            other => other.to_string(),
        }
    }
}

impl From<LoadError> for latchkey_core::LatchkeyError {
    fn from(err: LoadError) -> Self {
        latchkey_core::LatchkeyError::Transport {
            message: crate::describe_error(&err),
            source: Some(Box::new(err)),
        }
    }
}
