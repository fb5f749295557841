// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for rxlens streams.
//!
//! Every failure that travels through a stream is an [`RxError`], carried by
//! [`StreamItem::Error`](crate::StreamItem::Error). Errors are terminal for hot
//! sources (shared streams, stores): they are broadcast once and the source completes.
//!
//! # Examples
//!
//! ```
//! use rxlens_core::{Result, RxError};
//!
//! fn apply(arity: usize) -> Result<()> {
//!     if arity != 1 {
//!         return Err(RxError::arity_mismatch(1, arity));
//!     }
//!     Ok(())
//! }
//!
//! assert!(apply(2).unwrap_err().is_contract_violation());
//! ```

/// Root error type for all rxlens operations.
#[derive(Debug, thiserror::Error)]
pub enum RxError {
    /// A state transition was applied with the wrong number of state arguments.
    ///
    /// Raised at the moment of application, never at construction.
    #[error("Transition arity mismatch: expected {expected} argument(s), found {found}")]
    ArityMismatch {
        /// Required arity (always 1 for store transitions)
        expected: usize,
        /// Declared arity of the offending transition
        found: usize,
    },

    /// A history window was requested with a non-positive size.
    #[error("Invalid window size {size}: must be a positive integer")]
    InvalidWindowSize {
        /// The rejected size
        size: usize,
    },

    /// Stream processing encountered an error.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Error raised by a user-supplied function (transition, serializer, ...).
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RxError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create an arity contract violation
    #[must_use]
    pub const fn arity_mismatch(expected: usize, found: usize) -> Self {
        Self::ArityMismatch { expected, found }
    }

    /// Create a window size contract violation
    #[must_use]
    pub const fn invalid_window_size(size: usize) -> Self {
        Self::InvalidWindowSize { size }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Returns `true` for misuse of an operator contract (arity, window size).
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::ArityMismatch { .. } | Self::InvalidWindowSize { .. }
        )
    }
}

/// Specialized Result type for rxlens operations
pub type Result<T> = std::result::Result<T, RxError>;

/// Extension trait for converting foreign errors into [`RxError::UserError`].
pub trait IntoRxError {
    /// Convert this error into an `RxError`
    fn into_rx_error(self) -> RxError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoRxError for E {
    fn into_rx_error(self) -> RxError {
        RxError::user_error(self)
    }
}

impl Clone for RxError {
    fn clone(&self) -> Self {
        match self {
            Self::ArityMismatch { expected, found } => Self::ArityMismatch {
                expected: *expected,
                found: *found,
            },
            Self::InvalidWindowSize { size } => Self::InvalidWindowSize { size: *size },
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source can't be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}
