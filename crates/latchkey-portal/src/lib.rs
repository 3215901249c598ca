// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portal sign-in driven by credential challenges.
//!
//! A [`Portal`] loads the portal description from
//! `<url>/sharing/rest/portals/self`. When the portal wants a credential it
//! raises a [`Challenge`](latchkey_core::Challenge) through the handler it
//! was given, retries with a higher failure count when the credential is
//! rejected, and stops when the handler cancels.

pub mod client;
pub mod error;
pub mod portal;

pub use client::{PortalInfo, PortalUser};
pub use error::{LoadError, USER_CANCELLED_CODE};
pub use portal::Portal;

/// Shown when sign-in is attempted without a portal URL.
pub const EMPTY_URL_MESSAGE: &str = "Portal url is empty. Please enter portal url!";

/// User-facing summary of a finished load.
pub fn describe_outcome(outcome: &Result<PortalInfo, LoadError>) -> String {
    match outcome {
        Ok(_) => "Portal is loaded!".to_string(),
        Err(err) => describe_error(err),
    }
}

/// User-facing summary of a failed load.
pub fn describe_error(err: &LoadError) -> String {
    if err.is_user_cancelled() {
        "Portal sign in was cancelled by user!".to_string()
    } else {
        format!("Portal sign in failed: {}", err.cause_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_outcome() {
        let loaded = Ok(PortalInfo::default());
        assert_eq!(describe_outcome(&loaded), "Portal is loaded!");

        let cancelled = Err(LoadError::Cancelled);
        assert_eq!(
            describe_outcome(&cancelled),
            "Portal sign in was cancelled by user!"
        );

        let failed = Err(LoadError::AuthenticationFailed {
            attempts: 6,
            reason: "Invalid username or password.".to_string(),
        });
        assert_eq!(
            describe_outcome(&failed),
            "Portal sign in failed: Invalid username or password."
        );
    }

    #[test]
    fn load_error_converts_with_user_message() {
        let err: latchkey_core::LatchkeyError = LoadError::Cancelled.into();
        assert_eq!(
            err.to_string(),
            "transport error: Portal sign in was cancelled by user!"
        );
    }
}
