//! The paged vector container.
//!
//! [`PagedVec`] is an append-oriented sequence of `Copy` elements stored in a
//! [`PageTable`]. Appends fill the active page and only touch the table at
//! page boundaries; bulk copies (assignment, slice append, slice read) move one
//! block per page.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::{Geometry, DEFAULT_MIN_PAGES, DEFAULT_PAGE_BITS};
use crate::error::PagedVecError;
use crate::table::PageTable;

/// Largest element count a [`PagedVec`] can hold.
const MAX_LEN: u64 = u32::MAX as u64;

/// A growable random-access sequence stored in pages of `2^P` elements.
///
/// `MIN_PAGES` pages are allocated up front and at least that many are added
/// on every page-table growth. Pages are kept until the vector is dropped;
/// [`clear`](Self::clear) only resets the length.
///
/// Indexing (`v[i]`) performs no length check in release builds. An offset
/// past [`len`](Self::len) but inside an allocated page reads a stale,
/// initialised slot; an offset past every allocated page panics. Debug builds
/// assert `i < len`. Use [`get`](Self::get) for checked access.
///
/// # Threads
///
/// The vector has no internal synchronisation. [`page_blocks_mut`] hands out
/// disjoint page slices that can be moved to scoped worker threads;
/// [`at_partitioned`](Self::at_partitioned) is only a caller-side hint.
///
/// [`page_blocks_mut`]: Self::page_blocks_mut
pub struct PagedVec<T, const P: u32 = { DEFAULT_PAGE_BITS }, const MIN_PAGES: u32 = { DEFAULT_MIN_PAGES }> {
    table: PageTable<T, P, MIN_PAGES>,
    /// Logical length.
    len: u32,
    /// Page receiving appends; `len >> P` outside of `clear`.
    active: u32,
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> PagedVec<T, P, MIN_PAGES> {
    /// Elements per page.
    pub const PAGE_ELEMENTS: u32 = Geometry::<P>::ELEMENTS;

    /// Create an empty vector with `MIN_PAGES` pre-allocated pages.
    ///
    /// # Panics
    ///
    /// Panics if the initial pages cannot be allocated.
    pub fn new() -> Self {
        Self {
            table: PageTable::new(),
            len: 0,
            active: 0,
        }
    }

    /// Fallible form of [`PagedVec::new`].
    pub fn try_new() -> Result<Self, PagedVecError> {
        Ok(Self {
            table: PageTable::try_new()?,
            len: 0,
            active: 0,
        })
    }

    /// Create an empty vector able to hold `count` elements without growing.
    pub fn with_capacity(count: u32) -> Self {
        let mut v = Self::new();
        v.reserve(count);
        v
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// `true` when the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of pages holding at least one live element.
    pub fn pages(&self) -> u32 {
        Geometry::<P>::pages_for(self.len)
    }

    /// Number of allocated page slots (the high-water mark).
    pub fn page_capacity(&self) -> usize {
        self.table.page_capacity()
    }

    /// Number of elements the allocated pages can hold.
    pub fn capacity(&self) -> usize {
        self.table.element_capacity()
    }

    /// How many times the page table has grown since construction.
    pub fn growth_events(&self) -> u32 {
        self.table.growth_events()
    }

    /// Memory held by all pages in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.table.memory_bytes()
    }

    /// Element at `offset`, without a length check in release builds.
    ///
    /// Same contract as indexing; see the type-level docs.
    #[inline]
    pub fn at(&self, offset: u32) -> &T {
        debug_assert!(
            offset < self.len,
            "offset {offset} out of range for length {}",
            self.len
        );
        let (page, intra) = Geometry::<P>::split(offset);
        &self.table.page(page)[intra as usize]
    }

    /// Mutable element at `offset`, without a length check in release builds.
    #[inline]
    pub fn at_mut(&mut self, offset: u32) -> &mut T {
        debug_assert!(
            offset < self.len,
            "offset {offset} out of range for length {}",
            self.len
        );
        let (page, intra) = Geometry::<P>::split(offset);
        &mut self.table.page_mut(page)[intra as usize]
    }

    /// Element at `offset` looked up through a page partition mask.
    ///
    /// The page index of `offset` is masked with `partition - 1`, or with `0`
    /// when `partition` is 0, so a caller that hands each worker a
    /// power-of-two `partition` can fold offsets onto a restricted set of
    /// pages. Nothing is enforced or synchronised: the mask is applied as-is
    /// and the caller owns the correctness of the scheme. No length check.
    #[inline]
    pub fn at_partitioned(&self, partition: u32, offset: u32) -> &T {
        let (page, intra) = Self::partitioned_split(partition, offset);
        &self.table.page(page)[intra as usize]
    }

    /// Mutable form of [`at_partitioned`](Self::at_partitioned).
    #[inline]
    pub fn at_partitioned_mut(&mut self, partition: u32, offset: u32) -> &mut T {
        let (page, intra) = Self::partitioned_split(partition, offset);
        &mut self.table.page_mut(page)[intra as usize]
    }

    #[inline]
    fn partitioned_split(partition: u32, offset: u32) -> (u32, u32) {
        let (page, intra) = Geometry::<P>::split(offset);
        let mask = if partition != 0 { partition - 1 } else { 0 };
        (page & mask, intra)
    }

    /// Element at `offset`, or `None` past the end.
    pub fn get(&self, offset: u32) -> Option<&T> {
        (offset < self.len).then(|| self.at(offset))
    }

    /// Mutable element at `offset`, or `None` past the end.
    pub fn get_mut(&mut self, offset: u32) -> Option<&mut T> {
        if offset < self.len {
            Some(self.at_mut(offset))
        } else {
            None
        }
    }

    /// Last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).map(|last| self.at(last))
    }

    /// Mutable last element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        Some(self.at_mut(last))
    }

    /// Append `value`.
    ///
    /// # Panics
    ///
    /// Panics if the vector already holds `u32::MAX` elements or a new page
    /// cannot be allocated.
    #[inline]
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            panic!("{err}");
        }
    }

    /// Append `value`, reporting overflow or allocation failure.
    ///
    /// The page table is consulted only when the write lands on the first
    /// slot of a page.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), PagedVecError> {
        if self.len as u64 == MAX_LEN {
            return Err(PagedVecError::CapacityOverflow {
                requested: MAX_LEN + 1,
                max: MAX_LEN,
            });
        }
        let (page, intra) = Geometry::<P>::split(self.len);
        if intra == 0 {
            self.table.try_ensure_capacity_for(page)?;
            self.active = page;
        }
        self.table.page_mut(self.active)[intra as usize] = value;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last element.
    ///
    /// The freed slot keeps its value until the next write.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;
        let (page, intra) = Geometry::<P>::split(last);
        self.len = last;
        self.active = page;
        Some(self.table.page(page)[intra as usize])
    }

    /// Remove the element at `offset`, shifting every later element down by
    /// one, and return it.
    ///
    /// Erasing the last element is a [`pop`](Self::pop). An `offset` at or
    /// past the end leaves the vector untouched and returns
    /// [`PagedVecError::OutOfRange`]. Cost is linear in the number of
    /// elements after `offset`.
    pub fn erase(&mut self, offset: u32) -> Result<T, PagedVecError> {
        if offset >= self.len {
            return Err(PagedVecError::OutOfRange {
                offset,
                len: self.len,
            });
        }
        let removed = *self.at(offset);
        if offset + 1 < self.len {
            self.shift_left(offset);
        }
        self.len -= 1;
        self.active = Geometry::<P>::page_of(self.len);
        Ok(removed)
    }

    /// Move `[offset + 1, len)` to `[offset, len - 1)`.
    ///
    /// Each page is shifted with one `copy_within`; the first element of the
    /// following page is then carried into the freed last slot.
    fn shift_left(&mut self, offset: u32) {
        let (mut page, mut start) = Geometry::<P>::split(offset);
        let (last_page, last_intra) = Geometry::<P>::split(self.len - 1);
        let tail = Geometry::<P>::MASK as usize;

        while page < last_page {
            let start_idx = start as usize;
            self.table
                .page_mut(page)
                .copy_within(start_idx + 1.., start_idx);
            let carry = self.table.page(page + 1)[0];
            self.table.page_mut(page)[tail] = carry;
            page += 1;
            start = 0;
        }

        let start_idx = start as usize;
        let end = last_intra as usize + 1;
        self.table
            .page_mut(page)
            .copy_within(start_idx + 1..end, start_idx);
    }

    /// Drop every element, keeping all pages.
    ///
    /// A refill up to the previous length allocates nothing.
    pub fn clear(&mut self) {
        self.len = 0;
        self.active = 0;
    }

    /// Grow the page table so that the vector can hold `count` elements
    /// without further growth. Never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the pages cannot be allocated.
    pub fn reserve(&mut self, count: u32) {
        if let Err(err) = self.try_reserve(count) {
            panic!("{err}");
        }
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, count: u32) -> Result<(), PagedVecError> {
        let needed = Geometry::<P>::pages_for(count);
        if needed as usize <= self.table.page_capacity() {
            return Ok(());
        }
        self.table.try_ensure_capacity_for(needed - 1)
    }

    /// Append every element of `values`, one block copy per page.
    ///
    /// # Panics
    ///
    /// Panics if the result would exceed `u32::MAX` elements or the pages
    /// cannot be allocated.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        if let Err(err) = self.try_extend_from_slice(values) {
            panic!("{err}");
        }
    }

    /// Fallible form of [`extend_from_slice`](Self::extend_from_slice).
    ///
    /// On error nothing is appended.
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), PagedVecError> {
        let new_len = self.len as u64 + values.len() as u64;
        if new_len > MAX_LEN {
            return Err(PagedVecError::CapacityOverflow {
                requested: new_len,
                max: MAX_LEN,
            });
        }
        let new_len = new_len as u32;
        self.try_reserve(new_len)?;

        let mut consumed = 0usize;
        for span in Geometry::<P>::spans(self.len, values.len() as u32) {
            let next = consumed + span.len as usize;
            self.table.page_mut(span.page)[span.range()].copy_from_slice(&values[consumed..next]);
            consumed = next;
        }
        self.len = new_len;
        self.active = Geometry::<P>::page_of(new_len);
        Ok(())
    }

    /// Copy `out.len()` elements starting at `start` into `out`, one block
    /// copy per page.
    ///
    /// Fails with [`PagedVecError::OutOfRange`] if the run extends past the
    /// end; `out` is untouched in that case.
    pub fn copy_to_slice(&self, start: u32, out: &mut [T]) -> Result<(), PagedVecError> {
        let end = start as u64 + out.len() as u64;
        if end > self.len as u64 {
            return Err(PagedVecError::OutOfRange {
                offset: end.min(MAX_LEN) as u32,
                len: self.len,
            });
        }
        let mut written = 0usize;
        for span in Geometry::<P>::spans(start, out.len() as u32) {
            let next = written + span.len as usize;
            out[written..next].copy_from_slice(&self.table.page(span.page)[span.range()]);
            written = next;
        }
        Ok(())
    }

    /// Copy the live elements into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len as usize);
        for page in 0..self.pages() {
            out.extend_from_slice(self.page_block(page).unwrap_or_default());
        }
        out
    }

    /// Live portion of page `page_index`, for bulk consumers.
    ///
    /// Returns `None` if the page holds no live element. Every page but the
    /// last is full; the last is truncated to the live length.
    pub fn page_block(&self, page_index: u32) -> Option<&[T]> {
        let live = self.live_in_page(page_index)?;
        Some(&self.table.page(page_index)[..live])
    }

    /// Mutable form of [`page_block`](Self::page_block).
    pub fn page_block_mut(&mut self, page_index: u32) -> Option<&mut [T]> {
        let live = self.live_in_page(page_index)?;
        Some(&mut self.table.page_mut(page_index)[..live])
    }

    /// Like [`page_block`](Self::page_block), but an index past the live
    /// pages falls back to page 0 instead of failing.
    ///
    /// Kept for consumers written against the clamping lookup. On an empty
    /// vector the result is an empty slice.
    pub fn page_block_or_first(&self, page_index: u32) -> &[T] {
        match self.page_block(page_index) {
            Some(block) => block,
            None => {
                let live = self.live_in_page(0).unwrap_or(0);
                &self.table.page(0)[..live]
            }
        }
    }

    /// Every live page as a disjoint mutable slice, in page order.
    ///
    /// The slices can be handed to scoped threads so that each worker owns a
    /// set of pages outright.
    pub fn page_blocks_mut(&mut self) -> Vec<&mut [T]> {
        let len = self.len as usize;
        let pages = self.pages() as usize;
        let page_elements = Self::PAGE_ELEMENTS as usize;
        self.table
            .leading_pages_mut(pages)
            .enumerate()
            .map(|(i, page)| {
                let live = (len - i * page_elements).min(page_elements);
                &mut page[..live]
            })
            .collect()
    }

    fn live_in_page(&self, page_index: u32) -> Option<usize> {
        if page_index >= self.pages() {
            return None;
        }
        let start = Geometry::<P>::page_start(page_index);
        let live = (self.len as u64 - start).min(Self::PAGE_ELEMENTS as u64);
        Some(live as usize)
    }

    /// Replace the contents of `self` with a copy of `source`.
    ///
    /// Capacity is kept and grown to fit. Full pages are copied with one
    /// block copy each, then the trailing partial page.
    pub fn assign_from(&mut self, source: &Self) {
        let count = source.len;
        self.clear();
        self.reserve(count);

        let (full_pages, remainder) = Geometry::<P>::split(count);
        for page in 0..full_pages {
            self.table
                .page_mut(page)
                .copy_from_slice(source.table.page(page));
            self.active += 1;
        }
        if remainder != 0 {
            let tail = remainder as usize;
            self.table.page_mut(full_pages)[..tail]
                .copy_from_slice(&source.table.page(full_pages)[..tail]);
        }

        self.len = count;
        debug_assert_eq!(self.active, Geometry::<P>::page_of(count));
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> Default for PagedVec<T, P, MIN_PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> Clone for PagedVec<T, P, MIN_PAGES> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.assign_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T: Copy + Default + PartialEq, const P: u32, const MIN_PAGES: u32> PartialEq
    for PagedVec<T, P, MIN_PAGES>
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && (0..self.pages()).all(|page| self.page_block(page) == other.page_block(page))
    }
}

impl<T: Copy + Default + Eq, const P: u32, const MIN_PAGES: u32> Eq for PagedVec<T, P, MIN_PAGES> {}

impl<T, const P: u32, const MIN_PAGES: u32> fmt::Debug for PagedVec<T, P, MIN_PAGES>
where
    T: Copy + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedVec")
            .field("len", &self.len)
            .field("pages", &self.pages())
            .field("page_capacity", &self.page_capacity())
            .field("page_elements", &Self::PAGE_ELEMENTS)
            .finish()
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> Index<u32> for PagedVec<T, P, MIN_PAGES> {
    type Output = T;

    #[inline]
    fn index(&self, offset: u32) -> &T {
        self.at(offset)
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> IndexMut<u32>
    for PagedVec<T, P, MIN_PAGES>
{
    #[inline]
    fn index_mut(&mut self, offset: u32) -> &mut T {
        self.at_mut(offset)
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> From<&[T]> for PagedVec<T, P, MIN_PAGES> {
    fn from(values: &[T]) -> Self {
        let mut v = Self::new();
        v.extend_from_slice(values);
        v
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> Extend<T> for PagedVec<T, P, MIN_PAGES> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
