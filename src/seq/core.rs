//! Core sequence trait and the extension trait that chains combinators onto it.

use super::combinators::{Cancellable, Filter, FlatMap, Map};
use super::consumers;
use crate::cancel::CancelToken;
use crate::error::{SeqError, SeqResult};
use crate::queue::Queue;

/// A single-pass, pull-based source of elements.
///
/// `next` returns `None` once the sequence is exhausted, and callers must treat
/// that as permanent. Every sequence in this crate keeps returning `None` when
/// pulled again after exhaustion.
///
/// A sequence that can fail reports its terminal failure through
/// [`last_error`](Sequence::last_error). Sources leave the default body, which
/// never reports an error. Combinators override it and consult their upstream
/// first, so the error a consumer sees is always the one recorded closest to
/// the source.
pub trait Sequence {
    type Item;

    /// Produce the next element, or `None` when exhausted.
    fn next(&mut self) -> Option<Self::Item>;

    /// The failure that ended this sequence, if any.
    ///
    /// Only meaningful after `next` returned `None`.
    fn last_error(&self) -> Option<&SeqError> {
        None
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        (**self).next()
    }

    fn last_error(&self) -> Option<&SeqError> {
        (**self).last_error()
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        (**self).next()
    }

    fn last_error(&self) -> Option<&SeqError> {
        (**self).last_error()
    }
}

/// Type-erased sequence, handy as the inner type of a [`FlatMap`].
pub type BoxSequence<'a, T> = Box<dyn Sequence<Item = T> + Send + 'a>;

/// Extension trait providing sequence combinators and consumers
pub trait SequenceExt: Sequence + Sized {
    /// Keep only the elements for which `predicate` returns `Ok(true)`.
    ///
    /// A predicate failure halts the sequence; see [`Filter`].
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        F: FnMut(&Self::Item) -> Result<bool, SeqError>,
    {
        Filter::new(self, predicate)
    }

    /// Transform each element with a fallible function.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> Result<U, SeqError>,
    {
        Map::new(self, f)
    }

    /// Expand each element into an inner sequence and yield its elements.
    fn flat_map<J, F>(self, f: F) -> FlatMap<Self, J, F>
    where
        J: Sequence,
        F: FnMut(Self::Item) -> Result<J, SeqError>,
    {
        FlatMap::new(self, f)
    }

    /// Stop at the first pull after `token` is cancelled.
    fn cancellable(self, token: CancelToken) -> Cancellable<Self> {
        Cancellable::new(self, token)
    }

    /// Drain the sequence; see [`consumers::for_each`].
    #[must_use = "the returned error is the only way to tell a failed sequence from a finished one"]
    fn for_each<F>(self, f: F) -> SeqResult<()>
    where
        F: FnMut(Self::Item),
    {
        consumers::for_each(self, f)
    }

    /// Fold the sequence; see [`consumers::reduce`].
    #[must_use = "the returned error is the only way to tell a failed sequence from a finished one"]
    fn reduce<A, F>(self, init: A, f: F) -> (A, Option<SeqError>)
    where
        F: FnMut(A, Self::Item) -> A,
    {
        consumers::reduce(self, init, f)
    }

    /// Gather every element into a `Vec`.
    fn collect_vec(self) -> SeqResult<Vec<Self::Item>> {
        consumers::collect(self)
    }

    /// Drain on a tokio task into a bounded queue; see [`crate::sink::stream`].
    fn stream(self, capacity: usize) -> Queue<SeqResult<Self::Item>>
    where
        Self: Send + 'static,
        Self::Item: Send + 'static,
    {
        crate::sink::stream(self, capacity)
    }

    /// Adapt into a std [`Iterator`]. The adapter hands the sequence back
    /// through [`SeqIter::into_inner`] so its error can still be checked.
    fn into_iter_seq(self) -> SeqIter<Self> {
        SeqIter { seq: self }
    }

    fn boxed<'a>(self) -> BoxSequence<'a, Self::Item>
    where
        Self: Send + 'a,
    {
        Box::new(self)
    }
}

impl<S: Sequence + Sized> SequenceExt for S {}

/// [`Iterator`] view over a [`Sequence`]
#[derive(Debug)]
pub struct SeqIter<S> {
    seq: S,
}

impl<S: Sequence> SeqIter<S> {
    pub fn last_error(&self) -> Option<&SeqError> {
        self.seq.last_error()
    }

    pub fn into_inner(self) -> S {
        self.seq
    }
}

impl<S: Sequence> Iterator for SeqIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.next()
    }
}
