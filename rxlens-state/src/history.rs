// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use rxlens_core::{Result, RxError, StreamItem};
use rxlens_stream::{DistinctUntilChangedExt, ShareExt, SharedStream, ValueStreamExt};
use std::collections::VecDeque;

/// The last `N` values of a stream, oldest first, padded with `None` at the front
/// until `N` values have arrived.
pub type Window<T> = Vec<Option<T>>;

/// Builds a sliding-window operator of `window_size` slots.
///
/// The returned function turns a stream into a replaying stream of windows. A
/// window is emitted only when it differs from the previous one.
///
/// # Errors
///
/// [`RxError::InvalidWindowSize`] when `window_size` is zero.
///
/// ```
/// use rxlens_state::history;
/// use rxlens_test_utils::{test_channel, unwrap_value};
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> rxlens_core::Result<()> {
/// let (tx, values) = test_channel();
/// let mut windows = history(2)?(values).to_stream();
///
/// tx.send('a').unwrap();
/// tx.send('b').unwrap();
/// tx.send('c').unwrap();
///
/// assert_eq!(unwrap_value(windows.next().await), vec![None, Some('a')]);
/// assert_eq!(unwrap_value(windows.next().await), vec![Some('a'), Some('b')]);
/// assert_eq!(unwrap_value(windows.next().await), vec![Some('b'), Some('c')]);
/// # Ok(())
/// # }
/// ```
pub fn history<S, T>(window_size: usize) -> Result<impl FnOnce(S) -> SharedStream<Window<T>>>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + PartialEq + Send + 'static,
{
    if window_size == 0 {
        return Err(RxError::invalid_window_size(window_size));
    }

    Ok(move |source: S| {
        let mut slots: VecDeque<Option<T>> =
            std::iter::repeat_with(|| None).take(window_size).collect();

        source
            .map_value(move |value| {
                slots.pop_front();
                slots.push_back(Some(value));
                slots.iter().cloned().collect::<Window<T>>()
            })
            .distinct_until_changed()
            .share_replay()
    })
}
