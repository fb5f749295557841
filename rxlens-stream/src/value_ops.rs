// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value-level `map` and `filter` that leave error items untouched.

use futures::future::ready;
use futures::{Stream, StreamExt};
use rxlens_core::{RxStream, StreamItem};

/// Extension trait for transforming and filtering the values of a stream.
///
/// The names avoid clashing with [`futures::StreamExt::map`] and
/// [`futures::StreamExt::filter`], which operate on whole items.
pub trait ValueStreamExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Send + 'static,
{
    /// Maps every value through `f`; errors pass through.
    fn map_value<U, F>(self, f: F) -> RxStream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static;

    /// Keeps only the values for which `predicate` holds; errors always pass.
    fn filter_value<P>(self, predicate: P) -> RxStream<T>
    where
        P: FnMut(&T) -> bool + Send + 'static;
}

impl<S, T> ValueStreamExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn map_value<U, F>(self, mut f: F) -> RxStream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        Box::pin(self.map(move |item| item.map(&mut f)))
    }

    fn filter_value<P>(self, mut predicate: P) -> RxStream<T>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        Box::pin(self.filter(move |item| {
            ready(match item {
                StreamItem::Value(value) => predicate(value),
                StreamItem::Error(_) => true,
            })
        }))
    }
}
