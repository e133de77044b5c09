//! Transform combinators: filter, map, flat_map, cancellable
//!
//! Every combinator owns exactly one upstream and shares the same failure
//! rules:
//!
//! * the first failure of its own callback is recorded and ends the
//!   combinator; later pulls return `None` without touching the upstream or
//!   the callback again
//! * once the upstream returns `None` it is never pulled again
//! * `last_error` reports the upstream's error before its own
use super::core::Sequence;
use crate::cancel::CancelToken;
use crate::error::SeqError;

/// Terminal state shared by the combinators.
#[derive(Debug, Default)]
struct Halt {
    halted: bool,
    error: Option<SeqError>,
}

impl Halt {
    fn exhausted(&mut self) {
        self.halted = true;
    }

    fn fail(&mut self, combinator: &'static str, err: SeqError) {
        log::trace!("{} halted: {}", combinator, err);
        self.halted = true;
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn error_after<'a>(&'a self, upstream: Option<&'a SeqError>) -> Option<&'a SeqError> {
        upstream.or(self.error.as_ref())
    }
}

// ================================
// Filter
// ================================

/// Yields the upstream elements accepted by a fallible predicate.
#[derive(Debug)]
pub struct Filter<S, F> {
    upstream: S,
    predicate: F,
    halt: Halt,
}

impl<S, F> Filter<S, F> {
    pub(crate) fn new(upstream: S, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            halt: Halt::default(),
        }
    }
}

impl<S, F> Sequence for Filter<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> Result<bool, SeqError>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halt.halted {
            return None;
        }
        while let Some(item) = self.upstream.next() {
            match (self.predicate)(&item) {
                Ok(true) => return Some(item),
                Ok(false) => {}
                Err(err) => {
                    self.halt.fail("filter", err);
                    return None;
                }
            }
        }
        self.halt.exhausted();
        None
    }

    fn last_error(&self) -> Option<&SeqError> {
        self.halt.error_after(self.upstream.last_error())
    }
}

// ================================
// Map
// ================================

/// Yields each upstream element passed through a fallible transform.
#[derive(Debug)]
pub struct Map<S, F> {
    upstream: S,
    f: F,
    halt: Halt,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Self {
        Self {
            upstream,
            f,
            halt: Halt::default(),
        }
    }
}

impl<S, U, F> Sequence for Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> Result<U, SeqError>,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        if self.halt.halted {
            return None;
        }
        let Some(item) = self.upstream.next() else {
            self.halt.exhausted();
            return None;
        };
        match (self.f)(item) {
            Ok(mapped) => Some(mapped),
            Err(err) => {
                self.halt.fail("map", err);
                None
            }
        }
    }

    fn last_error(&self) -> Option<&SeqError> {
        self.halt.error_after(self.upstream.last_error())
    }
}

// ================================
// FlatMap
// ================================

/// Expands each upstream element into an inner sequence and yields the inner
/// elements in turn before pulling the next upstream element.
///
/// Empty inner sequences are skipped in a loop, so any run of them is handled
/// in constant stack space. If an inner sequence ends with an error, that error
/// becomes this combinator's terminal error.
pub struct FlatMap<S, J, F> {
    upstream: S,
    factory: F,
    inner: Option<J>,
    halt: Halt,
}

impl<S, J, F> FlatMap<S, J, F> {
    pub(crate) fn new(upstream: S, factory: F) -> Self {
        Self {
            upstream,
            factory,
            inner: None,
            halt: Halt::default(),
        }
    }
}

impl<S, J, F> Sequence for FlatMap<S, J, F>
where
    S: Sequence,
    J: Sequence,
    F: FnMut(S::Item) -> Result<J, SeqError>,
{
    type Item = J::Item;

    fn next(&mut self) -> Option<J::Item> {
        if self.halt.halted {
            return None;
        }
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                let inner_err = inner.last_error().cloned();
                self.inner = None;
                if let Some(err) = inner_err {
                    self.halt.fail("flat_map inner", err);
                    return None;
                }
            }

            let Some(outer) = self.upstream.next() else {
                self.halt.exhausted();
                return None;
            };
            match (self.factory)(outer) {
                Ok(inner) => self.inner = Some(inner),
                Err(err) => {
                    self.halt.fail("flat_map", err);
                    return None;
                }
            }
        }
    }

    fn last_error(&self) -> Option<&SeqError> {
        self.halt.error_after(self.upstream.last_error())
    }
}

impl<S, J, F> std::fmt::Debug for FlatMap<S, J, F>
where
    S: std::fmt::Debug,
    J: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMap")
            .field("upstream", &self.upstream)
            .field("inner", &self.inner)
            .field("halt", &self.halt)
            .finish()
    }
}

// ================================
// Cancellable
// ================================

/// Checks a [`CancelToken`] before every upstream pull. After cancellation it
/// records [`SeqError::Cancelled`] and reports exhaustion.
#[derive(Debug)]
pub struct Cancellable<S> {
    upstream: S,
    token: CancelToken,
    halt: Halt,
}

impl<S> Cancellable<S> {
    pub(crate) fn new(upstream: S, token: CancelToken) -> Self {
        Self {
            upstream,
            token,
            halt: Halt::default(),
        }
    }
}

impl<S: Sequence> Sequence for Cancellable<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.halt.halted {
            return None;
        }
        if self.token.is_cancelled() {
            self.halt.fail("cancellable", SeqError::Cancelled);
            return None;
        }
        let item = self.upstream.next();
        if item.is_none() {
            self.halt.exhausted();
        }
        item
    }

    fn last_error(&self) -> Option<&SeqError> {
        self.halt.error_after(self.upstream.last_error())
    }
}
