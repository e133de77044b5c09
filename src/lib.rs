//! Lazy, pull-based sequence combinators with fallible transforms and a
//! concurrent streaming sink.
//!
//! ```
//! use lazy_seq::{slice, SequenceExt, SeqError};
//!
//! let sum = slice(vec![1, 2, 3, 4, 5, 6])
//!     .filter(|x| Ok(x % 2 == 0))
//!     .map(|x| Ok::<_, SeqError>(x * 10))
//!     .reduce(0, |acc, x| acc + x);
//! assert_eq!(sum.0, 120);
//! assert!(sum.1.is_none());
//! ```

pub mod cancel;
pub mod error;
pub mod queue;
pub mod seq;
pub mod sink;
pub mod stream_configuration;

// Re-export the commonly used items at the crate root
pub use cancel::CancelToken;
pub use error::{SeqError, SeqResult};
pub use queue::{Queue, QueueError, QueueStats};
pub use seq::{
    collect, empty, for_each, from_iter, range, reduce, slice, BoxSequence, Cancellable, Empty,
    Filter, FlatMap, FromIter, Map, Number, Range, SeqIter, Sequence, SequenceExt, Slice,
};
pub use sink::{stream, stream_with_config};
pub use stream_configuration::StreamConfig;
