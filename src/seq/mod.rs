//! Pull-based sequences and their combinators
//!
//! A chain is built source first, e.g. `slice(..).filter(..).map(..)`, and
//! runs only when a consumer pulls on its outermost combinator.

pub mod core;
pub mod constructors;
pub mod combinators;
pub mod consumers;

// Re-export core types
pub use self::core::{BoxSequence, SeqIter, Sequence, SequenceExt};

// Re-export constructors
pub use constructors::{empty, from_iter, range, slice, Empty, FromIter, Number, Range, Slice};

// Re-export combinators
pub use combinators::{Cancellable, Filter, FlatMap, Map};

// Re-export consumers
pub use consumers::{collect, for_each, reduce};
