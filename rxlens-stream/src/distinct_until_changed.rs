// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use rxlens_core::{RxStream, StreamItem};
use std::sync::Arc;

/// Extension trait providing the `distinct_until_changed` operator.
///
/// A value is emitted only when it differs (`PartialEq`) from the previously emitted
/// value. The first value is always emitted. Errors pass through and do not reset
/// the comparison.
pub trait DistinctUntilChangedExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + PartialEq + Send + 'static,
{
    fn distinct_until_changed(self) -> RxStream<T>;
}

impl<S, T> DistinctUntilChangedExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + PartialEq + Send + 'static,
{
    fn distinct_until_changed(self) -> RxStream<T> {
        let last: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));

        let stream = self.filter_map(move |item| {
            let emitted = match item {
                StreamItem::Value(value) => {
                    let mut last = last.lock();
                    if last.as_ref() == Some(&value) {
                        None
                    } else {
                        *last = Some(value.clone());
                        Some(StreamItem::Value(value))
                    }
                }
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            };
            ready(emitted)
        });

        Box::pin(stream)
    }
}
