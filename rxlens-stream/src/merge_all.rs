// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use rxlens_core::{RxStream, StreamItem};

/// Merges `streams` in arrival order.
///
/// No ordering between inputs is imposed and nothing is deduplicated. The merged
/// stream completes once every input has completed; an empty input completes at once.
pub fn merge_all<S, T>(streams: Vec<S>) -> RxStream<T>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    let boxed: Vec<RxStream<T>> = streams
        .into_iter()
        .map(|stream| -> RxStream<T> { Box::pin(stream) })
        .collect();
    Box::pin(futures::stream::select_all(boxed))
}
