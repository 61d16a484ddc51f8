//! Per-page runs of a logical range.

use std::ops::Range;

/// A contiguous run of elements inside a single page.
///
/// Produced by [`Geometry::spans`](crate::Geometry::spans) so that bulk
/// operations can move data with one block copy per page instead of one
/// translation per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpan {
    /// Page index.
    pub page: u32,
    /// First element of the run within the page.
    pub offset: u32,
    /// Number of elements in the run.
    pub len: u32,
}

impl PageSpan {
    /// The run as an index range into the page slice.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_covers_run() {
        let span = PageSpan {
            page: 2,
            offset: 5,
            len: 3,
        };
        assert_eq!(span.range(), 5..8);
    }
}
