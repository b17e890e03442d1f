use std::hash::Hash;

use crate::error::SearchError;

/// Value reported in place of an index when the pattern does not occur.
pub const NOT_FOUND: i64 = -1;

/// One element of the searched alphabet. The matchers never look at
/// anything but equality, hashing and (for Rabin-Karp) the numeric code.
pub trait Symbol: Copy + Eq + Hash {
    fn code(self) -> u64;
}

impl Symbol for u8 {
    #[inline]
    fn code(self) -> u64 {
        u64::from(self)
    }
}

impl Symbol for char {
    #[inline]
    fn code(self) -> u64 {
        u64::from(u32::from(self))
    }
}

/// A non-empty pattern. Every matcher and table builder takes one of these,
/// so "empty pattern" is rejected once, here, and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern<'a, S> {
    symbols: &'a [S],
}

impl<'a, S: Symbol> Pattern<'a, S> {
    pub fn new(symbols: &'a [S]) -> Result<Self, SearchError> {
        if symbols.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        Ok(Self { symbols })
    }

    #[must_use]
    pub fn as_slice(&self) -> &'a [S] {
        self.symbols
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn last(&self) -> S {
        self.symbols[self.symbols.len() - 1]
    }
}

/// `Some(i)` → `i`, `None` → [`NOT_FOUND`]. Only used at output edges.
#[must_use]
pub fn sentinel(position: Option<usize>) -> i64 {
    position.map_or(NOT_FOUND, |i| i as i64)
}
