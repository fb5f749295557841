// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject for rxlens streams.
//!
//! An [`RxSubject`] broadcasts each [`StreamItem<T>`](crate::StreamItem) to all active subscribers.
//!
//! ## Characteristics
//!
//! - **Hot**: a plain subject gives late subscribers only the items sent after subscribing.
//! - **Replay-of-latest** (optional): a subject built with [`RxSubject::replay`] or
//!   [`RxSubject::replay_with`] hands the most recent value to every new subscriber first,
//!   and keeps doing so after it has been closed (followed by the terminal error, if any).
//! - **Unbounded**: uses unbounded channels internally (no backpressure).
//! - **Thread-safe**: cheap to clone; all clones share the same internal state.
//! - **Error/close**: [`RxSubject::error`] broadcasts the error and closes the subject.
//!
//! ## Example
//!
//! ```
//! use rxlens_core::{RxSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = RxSubject::replay_with(0);
//! subject.next(1).unwrap();
//!
//! // A late subscriber starts from the latest value
//! let mut stream = subject.subscribe().unwrap();
//! subject.next(2).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{RxError, RxStream, StreamItem, SubjectError};
use async_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<Sender<StreamItem<T>>>,
    replay: bool,
    latest: Option<T>,
    terminal: Option<RxError>,
}

/// A hot, unbounded subject that broadcasts items to all current subscribers.
///
/// See the [module documentation](crate::rx_subject) for details.
pub struct RxSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> RxSubject<T> {
    /// Creates a plain subject: no replay, late subscribers only see future items.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(false, None)
    }

    /// Creates a subject that replays its latest value to new subscribers.
    #[must_use]
    pub fn replay() -> Self {
        Self::with_state(true, None)
    }

    /// Creates a replaying subject whose latest value starts as `initial`.
    #[must_use]
    pub fn replay_with(initial: T) -> Self {
        Self::with_state(true, Some(initial))
    }

    fn with_state(replay: bool, latest: Option<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
                replay,
                latest,
                terminal: None,
            })),
        }
    }

    /// Subscribe to this subject and receive a stream of `StreamItem<T>`.
    ///
    /// # Errors
    ///
    /// A plain subject returns `SubjectError::Closed` once closed. A replaying subject
    /// never fails: after close the returned stream replays the latest value and the
    /// terminal error (if any), then ends.
    pub fn subscribe(&self) -> Result<RxStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed && !state.replay {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = async_channel::unbounded();
        if let Some(latest) = state.latest.as_ref() {
            let _ = tx.try_send(StreamItem::Value(latest.clone()));
        }

        if state.closed {
            if let Some(error) = state.terminal.as_ref() {
                let _ = tx.try_send(StreamItem::Error(error.clone()));
            }
            // Dropping `tx` here ends the subscriber once the replay is drained
        } else {
            state.senders.push(tx);
        }

        Ok(Box::pin(rx))
    }

    /// Send an item to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }
        Self::broadcast(&mut state, item);
        Ok(())
    }

    fn broadcast(state: &mut SubjectState<T>, item: StreamItem<T>) {
        if state.replay {
            if let StreamItem::Value(value) = &item {
                state.latest = Some(value.clone());
            }
        }

        let before = state.senders.len();
        state.senders.retain(|tx| tx.try_send(item.clone()).is_ok());
        let dropped = before - state.senders.len();
        if dropped > 0 {
            debug!("subject pruned {} dropped subscriber(s)", dropped);
        }
    }

    /// Send a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Broadcasts a terminal error and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: RxError) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            warn!("error sent to a closed subject was discarded: {}", err);
            return Err(SubjectError::Closed);
        }
        Self::broadcast(&mut state, StreamItem::Error(err.clone()));
        state.terminal = Some(err);
        state.closed = true;
        state.senders.clear();
        Ok(())
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the value a new subscriber would be replayed, if any.
    ///
    /// Always `None` for a plain subject.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.state.lock().latest.clone()
    }

    /// Returns the number of currently active subscribers.
    ///
    /// Dropped subscribers are removed on the next `send()`, not immediately.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for RxSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for RxSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
