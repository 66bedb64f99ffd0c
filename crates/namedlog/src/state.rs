//! The ordered name/value view handed to sinks.
//!
//! [`NamedValues`] is the one contract every log state satisfies: an ordered,
//! indexable sequence of [`Pair`]s with a length known up front. A state is
//! built per call and borrows the caller's arguments, so sinks must copy out
//! anything they want to keep after the call returns.
//!
//! The trait is object safe; sinks receive `&dyn NamedValues`. Iteration and
//! the values projection live on [`NamedValuesExt`], which every view gets
//! for free.

use namedlog_template::{Value, ValueSource};

/// Name of the synthetic pair carrying the un-rendered template text.
///
/// Every message state ends with this pair, so structured consumers can
/// recover the template alongside the values.
pub const ORIGINAL_FORMAT: &str = "{OriginalFormat}";

/// A single named value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

impl<'a> Pair<'a> {
    pub fn new(name: &'a str, value: Value<'a>) -> Self {
        Self { name, value }
    }
}

/// An ordered, indexable sequence of name/value pairs.
///
/// Names need not be unique unless the producer guarantees it; message
/// definitions do.
pub trait NamedValues {
    /// Number of pairs.
    fn count(&self) -> usize;

    /// The pair at `index`, or `None` if out of range.
    fn pair(&self, index: usize) -> Option<Pair<'_>>;

    /// Value of the first pair named `name`.
    fn get(&self, name: &str) -> Option<Value<'_>> {
        (0..self.count())
            .filter_map(|index| self.pair(index))
            .find(|pair| pair.name == name)
            .map(|pair| pair.value)
    }
}

impl<T: NamedValues + ?Sized> NamedValues for &T {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        (**self).pair(index)
    }
}

impl NamedValues for [Pair<'_>] {
    fn count(&self) -> usize {
        self.len()
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        <[Pair<'_>]>::get(self, index).copied()
    }
}

impl<const N: usize> NamedValues for [Pair<'_>; N] {
    fn count(&self) -> usize {
        N
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        <[Pair<'_>]>::get(self, index).copied()
    }
}

impl NamedValues for Vec<Pair<'_>> {
    fn count(&self) -> usize {
        self.len()
    }

    fn pair(&self, index: usize) -> Option<Pair<'_>> {
        <[Pair<'_>]>::get(self, index).copied()
    }
}

/// Iteration and projection over any [`NamedValues`], trait objects included.
pub trait NamedValuesExt: NamedValues {
    /// Iterates the pairs in order.
    fn pairs(&self) -> Pairs<'_, Self> {
        Pairs {
            source: self,
            index: 0,
        }
    }

    /// Projects the values, dropping names, without copying anything.
    fn values(&self) -> ValuesOf<'_, Self> {
        ValuesOf { source: self }
    }
}

impl<T: NamedValues + ?Sized> NamedValuesExt for T {}

/// Iterator over the pairs of a [`NamedValues`].
pub struct Pairs<'a, S: ?Sized> {
    source: &'a S,
    index: usize,
}

impl<'a, S: NamedValues + ?Sized> Iterator for Pairs<'a, S> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.source.pair(self.index)?;
        self.index += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<S: NamedValues + ?Sized> ExactSizeIterator for Pairs<'_, S> {}

/// The values of a [`NamedValues`], read on demand.
///
/// This is what the formatter renders from: it allocates nothing and
/// supports exactly the positional access a single left-to-right pass needs.
pub struct ValuesOf<'a, S: ?Sized> {
    source: &'a S,
}

impl<S: NamedValues + ?Sized> ValueSource for ValuesOf<'_, S> {
    fn count(&self) -> usize {
        self.source.count()
    }

    fn value_at(&self, index: usize) -> Option<Value<'_>> {
        self.source.pair(index).map(|pair| pair.value)
    }
}
