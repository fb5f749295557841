// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber handles over a single upstream subscription.
//!
//! A [`SharedStream`] consumes its source exactly once, in a background task, and
//! broadcasts every item through an [`RxSubject`]. Two flavours exist:
//!
//! | Constructor | Late subscribers receive |
//! |-------------|--------------------------|
//! | [`share`](ShareExt::share) | only items emitted after subscribing |
//! | [`share_replay`](ShareExt::share_replay) | the latest value first, then live items |
//!
//! ## Lifecycle
//!
//! Handles are cheap clones of one `Arc`. Every subscriber stream also holds a clone,
//! so the forwarding task keeps running while any handle or any subscriber is alive.
//! Dropping one subscriber never affects the others. The first upstream error is
//! broadcast to every subscriber and completes the shared stream.
//!
//! ## Example
//!
//! ```
//! use rxlens_core::StreamItem;
//! use rxlens_stream::ShareExt;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let shared = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)]).share_replay();
//! let mut a = shared.to_stream();
//! let mut b = shared.to_stream();
//!
//! assert_eq!(a.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(b.next().await, Some(StreamItem::Value(1)));
//! # }
//! ```

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::future::{select, Either};
use futures::{stream, Stream, StreamExt};
use rxlens_core::{RxStream, RxSubject, RxTask, StreamItem, SubjectError};
use std::sync::Arc;

struct SharedInner<T: Clone + Send + 'static> {
    subject: RxSubject<T>,
    _task: RxTask,
}

impl<T: Clone + Send + 'static> Drop for SharedInner<T> {
    fn drop(&mut self) {
        // The task is cancelled when `_task` drops right after
        self.subject.close();
    }
}

struct CloseOnDrop<T: Clone + Send + 'static>(RxSubject<T>);

impl<T: Clone + Send + 'static> Drop for CloseOnDrop<T> {
    fn drop(&mut self) {
        if !self.0.is_closed() {
            debug!("shared stream forwarding ended, completing subscribers");
        }
        self.0.close();
    }
}

/// A hot, multicast handle over a stream.
///
/// See the [module documentation](crate::share) for details.
pub struct SharedStream<T: Clone + Send + 'static> {
    inner: Arc<SharedInner<T>>,
}

impl<T: Clone + Send + 'static> SharedStream<T> {
    /// Shares `source` without replay.
    ///
    /// Prefer [`ShareExt::share`].
    pub fn new<S>(source: S) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::forward(source, RxSubject::new())
    }

    /// Shares `source`, replaying the latest value to late subscribers.
    ///
    /// Prefer [`ShareExt::share_replay`].
    pub fn replay<S>(source: S) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::forward(source, RxSubject::replay())
    }

    /// Shares `source` with replay, holding `seed` as the latest value until the
    /// source emits.
    ///
    /// The seed is visible to subscribers synchronously, before the forwarding task
    /// has run.
    pub fn replay_seeded<S>(source: S, seed: T) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::forward(source, RxSubject::replay_with(seed))
    }

    fn forward<S>(source: S, subject: RxSubject<T>) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        let sink = subject.clone();
        let task = RxTask::spawn(|cancel| async move {
            // Closes the subject however the loop ends, panics in operators included
            let _close = CloseOnDrop(sink.clone());
            let mut source = Box::pin(source);
            while let Either::Left((item, _)) = select(source.next(), cancel.cancelled()).await {
                match item {
                    Some(StreamItem::Value(value)) => {
                        if sink.next(value).is_err() {
                            break;
                        }
                    }
                    Some(StreamItem::Error(e)) => {
                        debug!("shared stream terminated by upstream error: {}", e);
                        let _ = sink.error(e);
                        break;
                    }
                    None => break,
                }
            }
        });

        Self {
            inner: Arc::new(SharedInner {
                subject,
                _task: task,
            }),
        }
    }

    /// Creates a new independent subscriber stream.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` when a non-replaying shared stream has already
    /// completed. Replaying shared streams never fail.
    pub fn subscribe(&self) -> Result<RxStream<T>, SubjectError> {
        let stream = self.inner.subject.subscribe()?;
        Ok(Box::pin(Subscription {
            stream,
            _owner: Arc::clone(&self.inner),
        }))
    }

    /// Like [`subscribe`](Self::subscribe), but yields an already completed stream
    /// instead of an error when the source has finished.
    #[must_use]
    pub fn to_stream(&self) -> RxStream<T> {
        self.subscribe()
            .unwrap_or_else(|_| Box::pin(stream::empty()))
    }

    /// Returns the value a late subscriber would be replayed first.
    ///
    /// Always `None` for a non-replaying shared stream.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.inner.subject.latest()
    }

    /// Returns `true` once the source has completed or errored.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.subject.is_closed()
    }

    /// Returns the number of currently active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subject.subscriber_count()
    }

    /// Returns `true` if both handles refer to the same shared stream.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + Send + 'static> Clone for SharedStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> core::fmt::Debug for SharedStream<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedStream")
            .field("closed", &self.is_closed())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// Subscriber stream that keeps its shared source alive.
struct Subscription<T: Clone + Send + 'static> {
    stream: RxStream<T>,
    _owner: Arc<SharedInner<T>>,
}

impl<T: Clone + Send + 'static> Stream for Subscription<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}

/// Extension trait for sharing a stream among multiple subscribers.
pub trait ShareExt<T: Clone + Send + 'static>: Stream<Item = StreamItem<T>> + Sized {
    /// Shares this stream without replay.
    fn share(self) -> SharedStream<T>
    where
        Self: Send + 'static;

    /// Shares this stream, replaying the latest value to late subscribers.
    fn share_replay(self) -> SharedStream<T>
    where
        Self: Send + 'static;
}

impl<S, T> ShareExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + Send + 'static,
{
    fn share(self) -> SharedStream<T>
    where
        Self: Send + 'static,
    {
        SharedStream::new(self)
    }

    fn share_replay(self) -> SharedStream<T>
    where
        Self: Send + 'static,
    {
        SharedStream::replay(self)
    }
}
