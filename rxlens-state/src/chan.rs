// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A callable event source paired with the pipeline built on it.

use futures::{stream, Stream};
use rxlens_core::{RxStream, RxSubject, StreamItem, SubjectError};
use rxlens_stream::{ShareExt, SharedStream};

/// An input you push events into, and the shared output of a pipeline over
/// those events.
///
/// The output is hot without replay: events pushed while nobody is subscribed
/// to the output still run through the pipeline, but their results are not kept.
///
/// ```
/// use rxlens_state::Chan;
/// use rxlens_stream::ValueStreamExt;
/// use rxlens_test_utils::unwrap_value;
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let doubled = Chan::new(|events| events.map_value(|n: i32| n * 2));
/// let mut output = doubled.subscribe().unwrap();
///
/// doubled.call(21).unwrap();
/// assert_eq!(unwrap_value(output.next().await), 42);
/// # }
/// ```
pub struct Chan<In, Out>
where
    In: Clone + Send + 'static,
    Out: Clone + Send + 'static,
{
    input: RxSubject<In>,
    output: SharedStream<Out>,
}

impl<In, Out> Chan<In, Out>
where
    In: Clone + Send + 'static,
    Out: Clone + Send + 'static,
{
    /// Builds the pipeline over a fresh input.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new<P, S>(pipeline: P) -> Self
    where
        P: FnOnce(RxStream<In>) -> S,
        S: Stream<Item = StreamItem<Out>> + Send + 'static,
    {
        let input = RxSubject::new();
        let events = input
            .subscribe()
            .unwrap_or_else(|_| Box::pin(stream::empty()));
        let output = pipeline(events).share();
        Self { input, output }
    }

    /// Pushes one event into the pipeline.
    ///
    /// # Errors
    ///
    /// `SubjectError::Closed` after [`close`](Self::close).
    pub fn call(&self, event: In) -> Result<(), SubjectError> {
        self.input.next(event)
    }

    /// Subscribes to the pipeline's output.
    ///
    /// # Errors
    ///
    /// `SubjectError::Closed` once the pipeline has completed.
    pub fn subscribe(&self) -> Result<RxStream<Out>, SubjectError> {
        self.output.subscribe()
    }

    #[must_use]
    pub fn output(&self) -> &SharedStream<Out> {
        &self.output
    }

    /// Completes the input, and with it the pipeline.
    pub fn close(&self) {
        self.input.close();
    }
}

impl<In, Out> Clone for Chan<In, Out>
where
    In: Clone + Send + 'static,
    Out: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}
