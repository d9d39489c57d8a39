//! Cancellable debounce timer owned by the controller.
//!
//! Scheduling a run aborts whatever was pending; earlier runs inside the
//! window never execute. Dropping the debouncer (controller teardown)
//! aborts the pending run too, so no callback outlives its controller.

use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

pub(crate) struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `callback` to run after the debounce delay, discarding any
    /// previously scheduled run that has not fired yet.
    pub(crate) fn schedule(&self, callback: BoxFuture<'static, ()>) {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback.await;
        });

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the pending run, if any.
    pub(crate) fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
