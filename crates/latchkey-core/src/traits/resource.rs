// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote resource capabilities exposed to challenge handlers.

use crate::types::LoadStatus;

/// A remote entity (for example a portal) that can raise a challenge.
pub trait RemoteResource: Send + Sync + 'static {
    /// URI of the resource, shown to the user when asking for credentials.
    fn uri(&self) -> &str;

    /// The cancel-load capability, when the resource has one.
    fn loadable(&self) -> Option<&dyn Loadable> {
        None
    }
}

/// A resource whose load can be observed and cancelled.
pub trait Loadable: Send + Sync {
    /// Current load state.
    fn load_status(&self) -> LoadStatus;

    /// Requests cancellation of an in-progress load. Best effort.
    fn cancel_load(&self);
}
