//! Fixed-size pages and the growable page table that owns them.
//!
//! A page is a `Box<[T]>` of exactly `2^P` elements, allocated eagerly and
//! filled with `T::default()`. The [`PageTable`] is the ordered list of page
//! handles. Pages are never freed during the table's lifetime; growth only
//! replaces the handle table, so element addresses inside existing pages
//! never change.

use crate::config::Geometry;
use crate::error::PagedVecError;

/// Allocate one page of `2^P` default-initialised elements.
fn alloc_page<T: Copy + Default, const P: u32>() -> Result<Box<[T]>, PagedVecError> {
    let elements = Geometry::<P>::ELEMENTS as usize;
    let mut data = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|_| PagedVecError::AllocationFailed { pages: 1 })?;
    data.resize(elements, T::default());
    Ok(data.into_boxed_slice())
}

/// Ordered, growable table of fixed-size pages.
///
/// The table starts with `MIN_PAGES` pages. When a page index beyond the
/// current capacity is requested, a new handle table sized to
/// `page_index + MIN_PAGES` replaces the old one: existing handles are moved
/// across untouched and fresh pages fill the new slots.
pub struct PageTable<T, const P: u32, const MIN_PAGES: u32> {
    /// Page handles. `pages.len()` is the page capacity.
    pages: Vec<Box<[T]>>,
    /// Number of times the handle table has been replaced.
    growth_events: u32,
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> PageTable<T, P, MIN_PAGES> {
    /// Pages added per growth step, checked at compile time.
    pub const GROWTH_PAGES: u32 = {
        assert!(MIN_PAGES > 0, "a page table must hold at least one page");
        MIN_PAGES
    };

    /// Create a table with `MIN_PAGES` pre-allocated pages.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the initial pages.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fallible form of [`PageTable::new`].
    pub fn try_new() -> Result<Self, PagedVecError> {
        let count = Self::GROWTH_PAGES as usize;
        let mut pages = Vec::new();
        pages
            .try_reserve_exact(count)
            .map_err(|_| PagedVecError::AllocationFailed { pages: count })?;
        for _ in 0..count {
            pages.push(alloc_page::<T, P>()?);
        }
        Ok(Self {
            pages,
            growth_events: 0,
        })
    }

    /// Make sure `page_index` names an allocated page.
    ///
    /// # Panics
    ///
    /// Panics if the allocator refuses the new pages or handle table.
    pub fn ensure_capacity_for(&mut self, page_index: u32) {
        if let Err(err) = self.try_ensure_capacity_for(page_index) {
            panic!("{err}");
        }
    }

    /// Make sure `page_index` names an allocated page, growing the table if
    /// it does not.
    ///
    /// On failure the table is left exactly as it was.
    pub fn try_ensure_capacity_for(&mut self, page_index: u32) -> Result<(), PagedVecError> {
        let wanted = page_index as usize;
        let current = self.pages.len();
        if wanted < current {
            return Ok(());
        }

        let new_capacity = wanted + Self::GROWTH_PAGES as usize;

        // Allocate everything up front so a failure leaves `self` untouched.
        let mut table = Vec::new();
        table
            .try_reserve_exact(new_capacity)
            .map_err(|_| PagedVecError::AllocationFailed {
                pages: new_capacity,
            })?;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(new_capacity - current)
            .map_err(|_| PagedVecError::AllocationFailed {
                pages: new_capacity,
            })?;
        for _ in current..new_capacity {
            fresh.push(alloc_page::<T, P>()?);
        }

        // Handles move, page contents stay put.
        table.append(&mut self.pages);
        table.append(&mut fresh);
        self.pages = table;
        self.growth_events += 1;
        Ok(())
    }

    /// Shared view of page `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not an allocated page.
    #[inline]
    pub fn page(&self, index: u32) -> &[T] {
        &self.pages[index as usize]
    }

    /// Mutable view of page `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not an allocated page.
    #[inline]
    pub fn page_mut(&mut self, index: u32) -> &mut [T] {
        &mut self.pages[index as usize]
    }

    /// Mutable views of the first `count` pages, in order.
    pub fn leading_pages_mut(&mut self, count: usize) -> impl Iterator<Item = &mut [T]> {
        self.pages[..count].iter_mut().map(|page| &mut page[..])
    }

    /// Number of allocated page slots.
    pub fn page_capacity(&self) -> usize {
        self.pages.len()
    }

    /// Total element capacity across all allocated pages.
    pub fn element_capacity(&self) -> usize {
        self.pages.len() * Geometry::<P>::ELEMENTS as usize
    }

    /// Number of times the handle table has been replaced.
    pub fn growth_events(&self) -> u32 {
        self.growth_events
    }

    /// Memory held by all pages in bytes (excluding the handle table).
    pub fn memory_bytes(&self) -> usize {
        self.element_capacity() * std::mem::size_of::<T>()
    }
}

impl<T: Copy + Default, const P: u32, const MIN_PAGES: u32> Default
    for PageTable<T, P, MIN_PAGES>
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_preallocates_min_pages() {
        let table = PageTable::<u32, 4, 3>::new();
        assert_eq!(table.page_capacity(), 3);
        assert_eq!(table.element_capacity(), 48);
        assert_eq!(table.growth_events(), 0);
    }

    #[test]
    fn pages_are_default_initialised() {
        let table = PageTable::<u32, 4, 1>::new();
        let page = table.page(0);
        assert_eq!(page.len(), 16);
        assert!(page.iter().all(|&v| v == 0));
    }

    #[test]
    fn ensure_within_capacity_is_noop() {
        let mut table = PageTable::<u8, 4, 2>::new();
        table.ensure_capacity_for(1);
        assert_eq!(table.page_capacity(), 2);
        assert_eq!(table.growth_events(), 0);
    }

    #[test]
    fn growth_sizes_table_to_index_plus_min_pages() {
        let mut table = PageTable::<u8, 4, 2>::new();
        table.ensure_capacity_for(2);
        assert_eq!(table.page_capacity(), 4);
        assert_eq!(table.growth_events(), 1);

        table.ensure_capacity_for(9);
        assert_eq!(table.page_capacity(), 11);
        assert_eq!(table.growth_events(), 2);
    }

    #[test]
    fn growth_keeps_page_contents_and_addresses() {
        let mut table = PageTable::<u32, 4, 1>::new();
        table.page_mut(0)[5] = 77;
        let before = table.page(0).as_ptr();

        table.ensure_capacity_for(6);

        assert_eq!(table.page(0)[5], 77);
        assert_eq!(table.page(0).as_ptr(), before);
        assert!(table.page(6).iter().all(|&v| v == 0));
    }

    #[test]
    fn memory_bytes_counts_every_page() {
        let table = PageTable::<u64, 4, 2>::new();
        assert_eq!(table.memory_bytes(), 2 * 16 * 8);
    }

    #[test]
    fn leading_pages_mut_yields_requested_pages() {
        let mut table = PageTable::<u8, 4, 3>::new();
        for (i, page) in table.leading_pages_mut(2).enumerate() {
            page.fill(i as u8 + 1);
        }
        assert!(table.page(0).iter().all(|&v| v == 1));
        assert!(table.page(1).iter().all(|&v| v == 2));
        assert!(table.page(2).iter().all(|&v| v == 0));
    }

    #[test]
    #[should_panic]
    fn page_beyond_capacity_panics() {
        let table = PageTable::<u8, 4, 1>::new();
        let _ = table.page(1);
    }
}
