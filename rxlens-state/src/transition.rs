// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! State transition functions and the rule that applies them.

use crate::State;
use rxlens_core::{Result, RxError};
use std::fmt;
use std::sync::Arc;

type UnaryFn<S> = dyn Fn(S) -> Result<S> + Send + Sync;
type VariadicFn<S> = dyn Fn(&[S]) -> Result<S> + Send + Sync;

enum Body<S> {
    Unary(Arc<UnaryFn<S>>),
    Variadic { arity: usize, f: Arc<VariadicFn<S>> },
}

/// A pure function from one state snapshot to the next.
///
/// Transitions are cheap to clone. Only transitions of arity 1 can be applied;
/// a [`variadic`](Self::variadic) transition declaring any other arity fails with
/// [`RxError::ArityMismatch`] when it is applied, never when it is built.
pub struct Transition<S = State> {
    body: Body<S>,
}

impl<S> Transition<S> {
    /// Wraps an infallible state function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(S) -> S + Send + Sync + 'static,
    {
        Self {
            body: Body::Unary(Arc::new(move |state| Ok(f(state)))),
        }
    }

    /// Wraps a fallible state function; its errors surface as [`RxError::UserError`].
    pub fn try_new<F, E>(f: F) -> Self
    where
        F: Fn(S) -> std::result::Result<S, E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            body: Body::Unary(Arc::new(move |state| f(state).map_err(RxError::user_error))),
        }
    }

    /// Wraps a callback that takes its state arguments as a slice and declares
    /// how many it expects.
    pub fn variadic<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[S]) -> S + Send + Sync + 'static,
    {
        Self {
            body: Body::Variadic {
                arity,
                f: Arc::new(move |states| Ok(f(states))),
            },
        }
    }

    /// Number of state arguments this transition declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        match &self.body {
            Body::Unary(_) => 1,
            Body::Variadic { arity, .. } => *arity,
        }
    }
}

impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        let body = match &self.body {
            Body::Unary(f) => Body::Unary(Arc::clone(f)),
            Body::Variadic { arity, f } => Body::Variadic {
                arity: *arity,
                f: Arc::clone(f),
            },
        };
        Self { body }
    }
}

impl<S> fmt::Debug for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// Applies `transition` to `state`.
///
/// # Errors
///
/// [`RxError::ArityMismatch`] if the transition does not take exactly one state,
/// or the transition's own error for fallible transitions.
pub fn apply_transition<S>(state: S, transition: &Transition<S>) -> Result<S> {
    match &transition.body {
        Body::Unary(f) => f(state),
        Body::Variadic { arity: 1, f } => f(std::slice::from_ref(&state)),
        Body::Variadic { arity, .. } => Err(RxError::arity_mismatch(1, *arity)),
    }
}
