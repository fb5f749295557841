// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning tokio receivers into rxlens streams.

use futures::StreamExt;
use rxlens_core::{RxStream, StreamItem};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Extension trait for `UnboundedReceiver` to feed rxlens pipelines.
pub trait UnboundedReceiverExt<T> {
    /// Wraps every received value in `StreamItem::Value`.
    ///
    /// The stream ends when every sender has been dropped.
    ///
    /// ```rust
    /// use rxlens::prelude::*;
    /// use futures::StreamExt;
    /// use tokio::sync::mpsc;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (tx, rx) = mpsc::unbounded_channel();
    /// let mut clicks = rx.into_rx_stream();
    ///
    /// tx.send("click").unwrap();
    /// drop(tx);
    ///
    /// assert_eq!(clicks.next().await, Some(StreamItem::Value("click")));
    /// assert_eq!(clicks.next().await, None);
    /// # }
    /// ```
    fn into_rx_stream(self) -> RxStream<T>;

    /// Like [`into_rx_stream`](Self::into_rx_stream), mapping each value first.
    ///
    /// The boxed result erases the channel type, so receivers of different event
    /// types can be mapped to one type and merged.
    fn into_rx_stream_with<U, F>(self, mapper: F) -> RxStream<U>
    where
        F: FnMut(T) -> U + Send + 'static,
        U: Send + 'static;
}

impl<T> UnboundedReceiverExt<T> for UnboundedReceiver<T>
where
    T: Send + 'static,
{
    fn into_rx_stream(self) -> RxStream<T> {
        Box::pin(UnboundedReceiverStream::new(self).map(StreamItem::Value))
    }

    fn into_rx_stream_with<U, F>(self, mut mapper: F) -> RxStream<U>
    where
        F: FnMut(T) -> U + Send + 'static,
        U: Send + 'static,
    {
        Box::pin(UnboundedReceiverStream::new(self).map(move |value| StreamItem::Value(mapper(value))))
    }
}
