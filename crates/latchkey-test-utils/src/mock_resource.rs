// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock remote resource.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use latchkey_core::{LoadStatus, Loadable, RemoteResource};

/// A remote resource with a fixed URI that records `cancel_load` calls.
pub struct MockResource {
    uri: String,
    cancellable: bool,
    cancels: AtomicUsize,
    status: Mutex<LoadStatus>,
}

impl MockResource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cancellable: true,
            cancels: AtomicUsize::new(0),
            status: Mutex::new(LoadStatus::Loading),
        }
    }

    /// Drops the cancel-load capability.
    pub fn without_cancel(mut self) -> Self {
        self.cancellable = false;
        self
    }

    /// Number of `cancel_load` calls so far.
    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl RemoteResource for MockResource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn loadable(&self) -> Option<&dyn Loadable> {
        if self.cancellable { Some(self) } else { None }
    }
}

impl Loadable for MockResource {
    fn load_status(&self) -> LoadStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cancel_load(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = LoadStatus::FailedToLoad;
    }
}
