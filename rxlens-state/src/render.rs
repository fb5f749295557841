// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, Stream, StreamExt};
use rxlens_core::{RxError, RxStream, StreamItem};
use rxlens_stream::{combine_latest_all, ValueStreamExt};
use rxlens_stream_time::DebounceExt;
use std::time::Duration;

/// Quiet period after which a batch of input changes counts as settled.
pub const RENDER_DEBOUNCE: Duration = Duration::from_millis(1);

/// Calls `combine` once per settled batch of input changes.
///
/// Inputs are combined latest-value-wise (nothing happens until every input has
/// emitted), then debounced by [`RENDER_DEBOUNCE`]: changes arriving within the
/// delay of each other collapse into a single `combine` call over the latest values.
pub fn render<S, T, Out, F>(streams: Vec<S>, mut combine: F) -> RxStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
    Out: Send + 'static,
    F: FnMut(&[T]) -> Out + Send + 'static,
{
    combine_latest_all(streams)
        .debounce(RENDER_DEBOUNCE)
        .map_value(move |values| combine(&values))
}

/// [`render`] with a fallible `combine`; a failure becomes an
/// [`RxError::UserError`] item and ends the output.
pub fn try_render<S, T, Out, E, F>(streams: Vec<S>, mut combine: F) -> RxStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
    Out: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: FnMut(&[T]) -> Result<Out, E> + Send + 'static,
{
    let combined = combine_latest_all(streams)
        .debounce(RENDER_DEBOUNCE)
        .map(move |item| {
            item.and_then(|values| match combine(&values) {
                Ok(out) => StreamItem::Value(out),
                Err(e) => StreamItem::Error(RxError::user_error(e)),
            })
        });

    // Ends right after the first error, without polling the inputs again
    let rendered = stream::unfold(Some(Box::pin(combined)), |source| async move {
        let mut source = source?;
        let item = source.next().await?;
        let rest = if item.is_error() { None } else { Some(source) };
        Some((item, rest))
    });
    Box::pin(rendered)
}
