// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenge, credential and response types.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::traits::RemoteResource;

/// The kind of authentication a remote resource is asking for.
///
/// Only [`ChallengeKind::UserCredential`] is answered interactively; every
/// other kind is cancelled by the credential handler.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ChallengeKind {
    UserCredential,
    OAuthCredential,
    ClientCertificate,
    ServerTrust,
}

/// A request for credentials raised by a remote-resource loader.
///
/// A new challenge is raised for every attempt; `failure_count` tells the
/// handler how many credentials were already rejected in the current
/// sign-in sequence.
#[derive(Clone)]
pub struct Challenge {
    kind: ChallengeKind,
    resource: Arc<dyn RemoteResource>,
    failure_count: u32,
}

impl Challenge {
    pub fn new(kind: ChallengeKind, resource: Arc<dyn RemoteResource>, failure_count: u32) -> Self {
        Self {
            kind,
            resource,
            failure_count,
        }
    }

    /// Shorthand for a user-credential challenge.
    pub fn user_credential(resource: Arc<dyn RemoteResource>, failure_count: u32) -> Self {
        Self::new(ChallengeKind::UserCredential, resource, failure_count)
    }

    pub fn kind(&self) -> ChallengeKind {
        self.kind
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// The remote resource that raised this challenge.
    pub fn remote_resource(&self) -> &Arc<dyn RemoteResource> {
        &self.resource
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Challenge")
            .field("kind", &self.kind)
            .field("uri", &self.resource.uri())
            .field("failure_count", &self.failure_count)
            .finish()
    }
}

/// A username/password pair.
///
/// An IWA domain is carried inside the username as `user@domain`.
/// Debug output never contains the password.
#[derive(Clone)]
pub struct Credential {
    username: String,
    password: SecretString,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Build a credential whose username is `user@domain`.
    pub fn with_domain(domain: &str, user: &str, password: impl Into<String>) -> Self {
        Self::new(format!("{user}@{domain}"), password)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// The domain part of a `user@domain` username, if any.
    pub fn domain(&self) -> Option<&str> {
        self.username
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for Credential {}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The answer to a [`Challenge`]. Consumed once by the loader that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeResponse {
    /// Retry the request with this credential.
    ContinueWithCredential(Credential),
    /// Give up on this challenge.
    Cancel,
}

/// Load state of a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded,
    FailedToLoad,
}
