// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background tasks that stop when their owner goes away.

use crate::CancellationToken;
use core::future::Future;

/// Handle to a task spawned on the tokio runtime.
///
/// The task receives a [`CancellationToken`] and is expected to stop once it fires.
/// Dropping the handle cancels the token, so a task lives exactly as long as whatever
/// owns its `RxTask` (a shared stream, a store).
///
/// ```
/// use rxlens_core::RxTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = RxTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct RxTask {
    cancel: CancellationToken,
}

impl RxTask {
    /// Spawns `f(token)` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());
        tokio::spawn(future);
        Self { cancel }
    }

    /// Requests cancellation without waiting for the task to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RxTask {
    fn drop(&mut self) {
        if !self.cancel.is_cancelled() {
            debug!("rx task dropped, cancelling");
        }
        self.cancel.cancel();
    }
}
