// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every rxlens crate.
//!
//! - [`StreamItem`]: the item carried by every rxlens stream (a value or a terminal error)
//! - [`RxError`]: the root error type, including the contract violations raised by the
//!   state engine
//! - [`RxSubject`]: a hot, multi-subscriber push source, optionally replaying its latest value
//! - [`RxTask`]: a spawned background task that is cancelled when dropped
//!
//! Streams are plain [`futures::Stream`]s of `StreamItem<T>`; [`RxStream`] is the boxed
//! form handed out by subjects and shared streams.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod cancellation_token;
pub mod error;
pub mod rx_subject;
pub mod rx_task;
pub mod stream_item;
pub mod subject_error;

use core::pin::Pin;
use futures::Stream;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{IntoRxError, Result, RxError};
pub use self::rx_subject::RxSubject;
pub use self::rx_task::RxTask;
pub use self::stream_item::StreamItem;
pub use self::subject_error::SubjectError;

/// A boxed, sendable stream of [`StreamItem<T>`].
pub type RxStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;
