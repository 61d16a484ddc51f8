//! Compile-time page geometry and the offset translator.
//!
//! A paged vector is configured entirely through const generics: the page-size
//! exponent `P` and the minimum number of pages added per growth step. This
//! module holds the defaults and [`Geometry`], the pure shift-and-mask
//! arithmetic that maps a logical offset to a `(page, intra-page offset)` pair.

use smallvec::SmallVec;

use crate::span::PageSpan;

/// Default page-size exponent: 2^14 = 16384 elements per page.
pub const DEFAULT_PAGE_BITS: u32 = 14;

/// Default number of pages allocated per page-table growth step.
pub const DEFAULT_MIN_PAGES: u32 = 1;

/// Offset translation for pages of `2^P` elements.
///
/// All functions are `const` and branch-free apart from [`Geometry::spans`].
/// None of them bounds-check; validating an offset against a container length
/// is the caller's job.
///
/// `P` must be below 32 because offsets are `u32`. Using a larger exponent
/// fails to compile as soon as any item of this type is used.
#[derive(Clone, Copy, Debug)]
pub struct Geometry<const P: u32>;

impl<const P: u32> Geometry<P> {
    /// Page-size exponent, checked at compile time.
    pub const BITS: u32 = {
        assert!(P < 32, "page-size exponent must be below 32");
        P
    };

    /// Elements per page.
    pub const ELEMENTS: u32 = 1 << Self::BITS;

    /// Mask selecting the intra-page part of an offset.
    pub const MASK: u32 = Self::ELEMENTS - 1;

    /// Page index holding `offset`.
    #[inline]
    pub const fn page_of(offset: u32) -> u32 {
        offset >> Self::BITS
    }

    /// Position of `offset` within its page.
    #[inline]
    pub const fn offset_in_page(offset: u32) -> u32 {
        offset & Self::MASK
    }

    /// Split `offset` into `(page, intra-page offset)`.
    #[inline]
    pub const fn split(offset: u32) -> (u32, u32) {
        (Self::page_of(offset), Self::offset_in_page(offset))
    }

    /// Logical offset of the first element of `page`.
    #[inline]
    pub const fn page_start(page: u32) -> u64 {
        (page as u64) << Self::BITS
    }

    /// Number of pages needed to hold `count` elements.
    #[inline]
    pub const fn pages_for(count: u32) -> u32 {
        ((count as u64 + Self::MASK as u64) >> Self::BITS) as u32
    }

    /// Break the logical run `[start, start + len)` into per-page spans.
    ///
    /// Spans are returned in logical order. A run of `len == 0` yields no
    /// spans. Most runs touch one or two pages, so the result stays inline.
    pub fn spans(start: u32, len: u32) -> SmallVec<[PageSpan; 4]> {
        let mut spans = SmallVec::new();
        let end = start as u64 + len as u64;
        let mut cursor = start as u64;
        while cursor < end {
            let page = (cursor >> Self::BITS) as u32;
            let offset = (cursor as u32) & Self::MASK;
            let room = (Self::ELEMENTS - offset) as u64;
            let take = room.min(end - cursor) as u32;
            spans.push(PageSpan {
                page,
                offset,
                len: take,
            });
            cursor += take as u64;
        }
        spans
    }
}
