// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `debounce` operator for streams.
//!
//! The debounce operator waits for a pause in the input stream of at least
//! the given duration before emitting the latest value. If a new value
//! arrives before the duration elapses, the timer is reset and only the
//! newest value is eventually emitted.
//!
//! This implements **trailing debounce** semantics:
//! - When a value arrives, start/restart the timer
//! - If no new value arrives before the timer expires, emit the latest value
//! - If a new value arrives, discard the pending value and restart the timer
//! - When the stream ends, emit any pending value immediately
//!
//! Errors pass through immediately, discarding any pending value.
//!
//! # Example
//!
//! ```rust
//! use rxlens_core::StreamItem;
//! use rxlens_stream_time::DebounceExt;
//! use futures::{stream, StreamExt};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let burst = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2), StreamItem::Value(3)]);
//! let settled: Vec<_> = burst.debounce(Duration::from_millis(10)).collect().await;
//!
//! assert_eq!(settled, vec![StreamItem::Value(3)]);
//! # }
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::Stream;
use pin_project::pin_project;
use rxlens_core::StreamItem;
use tokio::time::{sleep, Sleep};

/// Extension trait providing the `debounce` operator for streams.
pub trait DebounceExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Debounces the stream by `duration`.
    ///
    /// See the [module documentation](crate::debounce) for the exact semantics.
    fn debounce(self, duration: Duration) -> Pin<Box<Debounce<Self, T>>>;
}

impl<S, T> DebounceExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn debounce(self, duration: Duration) -> Pin<Box<Debounce<Self, T>>> {
        Box::pin(Debounce {
            stream: self,
            duration,
            pending: None,
            sleep: None,
            stream_ended: false,
        })
    }
}

/// Stream returned by [`DebounceExt::debounce`].
#[pin_project]
pub struct Debounce<S, T> {
    #[pin]
    stream: S,
    duration: Duration,
    pending: Option<T>,
    #[pin]
    sleep: Option<Sleep>,
    stream_ended: bool,
}

impl<S, T> Stream for Debounce<S, T>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.stream_ended {
                return Poll::Ready(this.pending.take().map(StreamItem::Value));
            }

            if this.pending.is_some() {
                if let Some(timer) = this.sleep.as_mut().as_pin_mut() {
                    if timer.poll(cx).is_ready() {
                        this.sleep.set(None);
                        return Poll::Ready(this.pending.take().map(StreamItem::Value));
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    // Restart the quiet period
                    this.sleep.set(Some(sleep(*this.duration)));
                    *this.pending = Some(value);
                }
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    *this.pending = None;
                    this.sleep.set(None);
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
