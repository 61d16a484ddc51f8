//! Test utilities and reference models for pagevec development.
//!
//! Provides fill helpers for the common sequential and byte-pattern
//! scenarios, a `Vec`-backed [`ModelVec`] that mirrors the [`PagedVec`]
//! mutation API, and seeded operation scripts in [`fixtures`] that drive
//! both side by side.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Divergence, Op, OpScript};

use pagevec::PagedVec;

/// Value stored at offset `i` by the byte-pattern scenario (`i mod 256`).
#[inline]
pub fn byte_pattern(i: u32) -> u8 {
    (i & 0xFF) as u8
}

/// Build a vector holding `0..n`.
pub fn sequential<const P: u32, const MIN_PAGES: u32>(n: u32) -> PagedVec<u32, P, MIN_PAGES> {
    let mut v = PagedVec::new();
    for i in 0..n {
        v.push(i);
    }
    v
}

/// Build a vector holding `byte_pattern(i)` for `i in 0..n`, one push at a time.
pub fn byte_filled<const P: u32, const MIN_PAGES: u32>(n: u32) -> PagedVec<u8, P, MIN_PAGES> {
    let mut v = PagedVec::new();
    for i in 0..n {
        v.push(byte_pattern(i));
    }
    v
}

/// First offset whose element differs from `expected`, or the shorter
/// length if the lengths differ. `None` when the contents match.
pub fn first_mismatch<T, const P: u32, const MIN_PAGES: u32>(
    v: &PagedVec<T, P, MIN_PAGES>,
    expected: &[T],
) -> Option<u32>
where
    T: Copy + Default + PartialEq,
{
    let shared = (v.len() as usize).min(expected.len());
    if let Some(i) = (0..shared).find(|&i| v[i as u32] != expected[i]) {
        return Some(i as u32);
    }
    (v.len() as usize != expected.len()).then_some(shared as u32)
}

/// Reference model backed by a plain `Vec<T>`.
///
/// Mirrors the [`PagedVec`] mutation API with the obvious contiguous
/// implementation so that test code can compare the two after every step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelVec<T> {
    data: Vec<T>,
}

impl<T: Copy> ModelVec<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// `None` for an out-of-range offset, matching the paged vector's
    /// untouched-on-error behaviour.
    pub fn erase(&mut self, offset: u32) -> Option<T> {
        let offset = offset as usize;
        (offset < self.data.len()).then(|| self.data.remove(offset))
    }

    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.data.extend_from_slice(values);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
