// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rxlens workspace.
//!
//! Production code builds pipelines out of streams; tests drive them imperatively
//! through channels. [`test_channel`] hands out a sender for plain values and a
//! stream of `StreamItem`s, [`test_channel_with_errors`] lets a test inject errors.
//!
//! ```rust
//! use rxlens_test_utils::{test_channel, helpers::unwrap_value};
//! use futures::StreamExt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, mut stream) = test_channel();
//! tx.send(7).unwrap();
//! assert_eq!(unwrap_value(stream.next().await), 7);
//! # }
//! ```
//!
//! # Module Organization
//!
//! - `helpers` - assertion helpers for streams
//! - `state` - `serde_json` state trees and serializable events used across the state tests

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod state;

use futures::{Stream, StreamExt};
use rxlens_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value};

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts whole `StreamItem<T>`s, errors included.
///
/// ```rust
/// use rxlens_test_utils::test_channel_with_errors;
/// use rxlens_core::{RxError, StreamItem};
///
/// let (tx, _stream) = test_channel_with_errors::<i32>();
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(RxError::stream_error("test error"))).unwrap();
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
