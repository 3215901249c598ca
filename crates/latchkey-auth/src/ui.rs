// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single UI execution context.
//!
//! Jobs run one at a time, in submission order, on a dedicated named thread.
//! Work is handed back to callers through one-shot result slots, so a
//! background thread can wait for something only the UI thread may do.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use latchkey_core::LatchkeyError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to the UI thread. Cheap to clone; the thread exits once every
/// handle is dropped and the queue is drained.
#[derive(Clone)]
pub struct UiContext {
    inner: Arc<Inner>,
}

struct Inner {
    jobs: mpsc::UnboundedSender<Job>,
    thread_id: ThreadId,
}

impl UiContext {
    /// Spawns the UI thread with the given name.
    pub fn spawn(name: &str) -> Result<Self, LatchkeyError> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<Job>();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    // A panicking job must not take the UI thread down with it.
                    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        error!("ui job panicked");
                    }
                }
                debug!("ui context stopped");
            })
            .map_err(|e| LatchkeyError::Internal(format!("failed to spawn ui thread: {e}")))?;

        debug!(thread = name, "ui context started");
        Ok(Self {
            inner: Arc::new(Inner {
                jobs,
                thread_id: handle.thread().id(),
            }),
        })
    }

    /// Whether the calling thread is this context's UI thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.inner.thread_id
    }

    /// Queues a job without waiting for it.
    pub fn run(&self, job: impl FnOnce() + Send + 'static) -> Result<(), LatchkeyError> {
        self.inner
            .jobs
            .send(Box::new(job))
            .map_err(|_| LatchkeyError::Internal("ui context is closed".to_string()))
    }

    /// Runs `f` on the UI thread and blocks the caller until it returns.
    ///
    /// Must not be called from the UI thread or from inside an async task.
    /// Fails if the UI thread is gone, or if `f` panicked, instead of
    /// blocking forever.
    pub fn call<R, F>(&self, f: F) -> Result<R, LatchkeyError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        if self.is_current() {
            return Err(LatchkeyError::Internal(
                "blocking call issued from the ui thread".to_string(),
            ));
        }

        let (tx, rx) = oneshot::channel();
        self.run(move || {
            // The receiver only disappears if the caller itself went away.
            let _ = tx.send(f());
        })?;

        rx.blocking_recv().map_err(|_| {
            LatchkeyError::Internal("ui context dropped the job before it completed".to_string())
        })
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("thread_id", &self.inner.thread_id)
            .finish()
    }
}
