//! Paged vector error types.

use std::error::Error;
use std::fmt;

/// Errors reported by the fallible [`PagedVec`](crate::PagedVec) operations.
///
/// The infallible counterparts (`push`, `reserve`, ...) treat
/// [`CapacityOverflow`](Self::CapacityOverflow) and
/// [`AllocationFailed`](Self::AllocationFailed) as fatal and panic with the
/// `Display` text of the error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PagedVecError {
    /// A logical offset at or beyond the current length.
    OutOfRange {
        /// The offending offset.
        offset: u32,
        /// The container length at the time of the call.
        len: u32,
    },
    /// The requested element count does not fit the `u32` element range.
    CapacityOverflow {
        /// Number of elements requested.
        requested: u64,
        /// Largest representable element count.
        max: u64,
    },
    /// The allocator refused a page or page-table allocation.
    AllocationFailed {
        /// Number of page slots the failed allocation was sized for.
        pages: usize,
    },
}

impl fmt::Display for PagedVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for length {len}")
            }
            Self::CapacityOverflow { requested, max } => {
                write!(
                    f,
                    "capacity overflow: requested {requested} elements, max {max}"
                )
            }
            Self::AllocationFailed { pages } => {
                write!(f, "page allocation failed ({pages} page slots)")
            }
        }
    }
}

impl Error for PagedVecError {}
