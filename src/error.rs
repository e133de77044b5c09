//! Error types and handling for lazy-seq
//!
//! A sequence never raises a failure as a hard fault. Combinators record the
//! first failure they see, report exhaustion from then on, and expose the
//! failure through [`Sequence::last_error`](crate::seq::Sequence::last_error).
//! Callers MUST check the error after a sequence ends: an unchecked failure is
//! indistinguishable from a sequence that simply ran out of elements.

use std::error::Error as StdError;
use std::sync::Arc;

/// Main error type for sequence operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum SeqError {
    /// Caller-supplied failure from a predicate, transform or factory
    #[error("Sequence error: {0}")]
    Custom(String),

    /// Caller-supplied failure wrapping an arbitrary error value
    #[error(transparent)]
    Source(Arc<dyn StdError + Send + Sync + 'static>),

    /// A range was constructed with a zero step
    #[error("Range step must be non-zero")]
    ZeroStep,

    /// Cancellation was observed at a pull boundary
    #[error("Operation cancelled")]
    Cancelled,
}

impl SeqError {
    /// Create a caller-supplied failure from a message
    pub fn custom(msg: impl Into<String>) -> Self {
        SeqError::Custom(msg.into())
    }

    /// Wrap any error value as a caller-supplied failure
    pub fn from_source<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        SeqError::Source(Arc::new(err))
    }

    /// Returns true if this failure came from cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SeqError::Cancelled)
    }
}

impl From<std::num::ParseIntError> for SeqError {
    fn from(err: std::num::ParseIntError) -> Self {
        SeqError::from_source(err)
    }
}

impl From<std::num::ParseFloatError> for SeqError {
    fn from(err: std::num::ParseFloatError) -> Self {
        SeqError::from_source(err)
    }
}

impl From<std::io::Error> for SeqError {
    fn from(err: std::io::Error) -> Self {
        SeqError::from_source(err)
    }
}

/// Result type for sequence operations, also the envelope carried by
/// [`stream`](crate::sink::stream)
pub type SeqResult<T> = Result<T, SeqError>;
