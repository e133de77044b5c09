//! Sequence sources: slice, range, from_iter, empty
use std::iter::Fuse;
use std::marker::PhantomData;

use super::core::Sequence;
use crate::error::{SeqError, SeqResult};

// ================================
// Owned Data
// ================================

/// Yields the elements of an owned vector in their original order.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    data: std::vec::IntoIter<T>,
}

impl<T> Slice<T> {
    /// Number of elements not yet pulled.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }
}

impl<T> Sequence for Slice<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.data.next()
    }
}

pub fn slice<T>(data: Vec<T>) -> Slice<T> {
    Slice {
        data: data.into_iter(),
    }
}

/// Yields whatever a std iterator yields. The iterator is fused, so pulling
/// past the end keeps returning `None` even for iterators that would resume.
#[derive(Debug, Clone)]
pub struct FromIter<I> {
    iter: Fuse<I>,
}

impl<I: Iterator> Sequence for FromIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter {
        iter: iter.into_iter().fuse(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Empty<T> {
    _phantom: PhantomData<T>,
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        None
    }
}

pub fn empty<T>() -> Empty<T> {
    Empty {
        _phantom: PhantomData,
    }
}

// ================================
// Arithmetic Progression
// ================================

/// Numeric types a [`Range`] can step over.
pub trait Number: Copy + PartialOrd {
    const ZERO: Self;

    /// `self + step`, or `None` if the result is not representable or
    /// does not differ from `self`.
    fn checked_step(self, step: Self) -> Option<Self>;
}

macro_rules! impl_number_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Number for $t {
                const ZERO: Self = 0;

                fn checked_step(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }
            }
        )*
    };
}

macro_rules! impl_number_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Number for $t {
                const ZERO: Self = 0.0;

                fn checked_step(self, step: Self) -> Option<Self> {
                    // A step lost to rounding would repeat the same value forever.
                    let next = self + step;
                    (next != self).then_some(next)
                }
            }
        )*
    };
}

impl_number_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_number_float!(f32, f64);

/// Yields `start + step, start + 2*step, ...` up to and including `end`.
///
/// A positive step ascends and stops once a value would exceed `end`; a
/// negative step descends and stops once a value would fall below `end`. A step
/// pointing away from `end` yields nothing. The sequence also ends if the next
/// value would overflow the integer type, or for floats once the step is too
/// small to change the value.
#[derive(Debug, Clone)]
pub struct Range<T> {
    upcoming: Option<T>,
    end: T,
    step: T,
    ascending: bool,
}

impl<T: Number> Sequence for Range<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.upcoming?;
        let in_bounds = if self.ascending {
            value <= self.end
        } else {
            value >= self.end
        };
        if !in_bounds {
            self.upcoming = None;
            return None;
        }
        self.upcoming = value.checked_step(self.step);
        Some(value)
    }
}

/// Build a [`Range`]. A zero step would never reach `end` and is rejected
/// with [`SeqError::ZeroStep`].
pub fn range<T: Number>(start: T, end: T, step: T) -> SeqResult<Range<T>> {
    if step == T::ZERO {
        return Err(SeqError::ZeroStep);
    }
    Ok(Range {
        upcoming: start.checked_step(step),
        end,
        step,
        ascending: step > T::ZERO,
    })
}
