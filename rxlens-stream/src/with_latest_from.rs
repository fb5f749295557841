// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sampling a secondary stream whenever the primary stream emits.
//!
//! - Emits `(primary, latest_secondary)` only when the primary emits
//! - Primary values that arrive before the secondary's first value are dropped
//! - Secondary emissions only update the sampled value
//! - Errors from either side are forwarded immediately
//! - Completes as soon as the primary completes

use futures::future::ready;
use futures::{stream, Stream, StreamExt};
use parking_lot::Mutex;
use rxlens_core::{RxStream, StreamItem};
use std::sync::Arc;

enum Event<T, U> {
    Primary(StreamItem<T>),
    PrimaryDone,
    Secondary(StreamItem<U>),
}

/// Extension trait providing the `with_latest_from` operator.
pub trait WithLatestFromExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + 'static,
{
    /// Pairs every value of `self` with the most recent value of `other`.
    fn with_latest_from<U, IS>(self, other: IS) -> RxStream<(T, U)>
    where
        IS: Stream<Item = StreamItem<U>> + Send + 'static,
        U: Clone + Send + 'static;
}

impl<S, T> WithLatestFromExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    fn with_latest_from<U, IS>(self, other: IS) -> RxStream<(T, U)>
    where
        IS: Stream<Item = StreamItem<U>> + Send + 'static,
        U: Clone + Send + 'static,
    {
        let primary = self
            .map(Event::Primary)
            .chain(stream::once(ready(Event::PrimaryDone)));
        let secondary = other.map(Event::Secondary);
        let sampled: Arc<Mutex<Option<U>>> = Arc::new(Mutex::new(None));

        let combined = stream::select(primary, secondary)
            .take_while(|event| ready(!matches!(event, Event::PrimaryDone)))
            .filter_map(move |event| {
                let emitted = match event {
                    Event::Primary(StreamItem::Value(value)) => sampled
                        .lock()
                        .clone()
                        .map(|latest| StreamItem::Value((value, latest))),
                    Event::Secondary(StreamItem::Value(value)) => {
                        *sampled.lock() = Some(value);
                        None
                    }
                    Event::Primary(StreamItem::Error(e)) | Event::Secondary(StreamItem::Error(e)) => {
                        Some(StreamItem::Error(e))
                    }
                    Event::PrimaryDone => None,
                };
                ready(emitted)
            });

        Box::pin(combined)
    }
}
