//! Consumers that drive a sequence to completion on the calling thread.
//!
//! All of them return the sequence's terminal error next to whatever was
//! produced before it. Ignoring that error leaves a caller looking at a
//! sequence that ended early for no visible reason.
use super::core::Sequence;
use crate::error::{SeqError, SeqResult};

fn terminal_error<S: Sequence>(seq: &S) -> Option<SeqError> {
    seq.last_error().cloned()
}

/// Drain `seq`, calling `consumer` once per element in yield order.
///
/// Returns the sequence's terminal error, if it recorded one.
#[must_use = "the returned error is the only way to tell a failed sequence from a finished one"]
pub fn for_each<S, F>(mut seq: S, mut consumer: F) -> SeqResult<()>
where
    S: Sequence,
    F: FnMut(S::Item),
{
    while let Some(item) = seq.next() {
        consumer(item);
    }
    match terminal_error(&seq) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Fold `seq` left to right, `acc = combine(acc, element)`, starting at `init`.
///
/// The accumulator is returned even on failure and holds every element
/// processed before it.
#[must_use = "the returned error is the only way to tell a failed sequence from a finished one"]
pub fn reduce<S, A, F>(mut seq: S, init: A, mut combine: F) -> (A, Option<SeqError>)
where
    S: Sequence,
    F: FnMut(A, S::Item) -> A,
{
    let mut acc = init;
    while let Some(item) = seq.next() {
        acc = combine(acc, item);
    }
    (acc, terminal_error(&seq))
}

/// Gather every element into a `Vec`, or the terminal error.
pub fn collect<S: Sequence>(seq: S) -> SeqResult<Vec<S::Item>> {
    let mut out = Vec::new();
    for_each(seq, |item| out.push(item))?;
    Ok(out)
}
