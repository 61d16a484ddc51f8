//! Paged random-access vector.
//!
//! [`PagedVec`] stores its elements in fixed-size pages of `2^P` elements
//! instead of one contiguous buffer. Growing the container only ever grows a
//! small table of page handles, so existing elements are never copied or moved
//! and references into written pages stay where they are.
//!
//! # Architecture
//!
//! ```text
//! PagedVec<T, P, MIN_PAGES>
//! ├── len (u32) + active page index
//! ├── PageTable → Box<[T]>[] (2^P elements each, allocated eagerly)
//! └── Geometry<P> (offset → (page, intra-page offset) via shift + mask)
//! ```
//!
//! # Memory retention
//!
//! Pages are never released before the container is dropped. [`PagedVec::clear`]
//! resets the logical length only; a refill up to the previous high-water mark
//! allocates nothing.
//!
//! # Example
//!
//! ```rust
//! use pagevec::PagedVec;
//!
//! let mut v: PagedVec<u32, 4> = PagedVec::new();
//! for i in 0..100 {
//!     v.push(i);
//! }
//! assert_eq!(v.len(), 100);
//! assert_eq!(v[42], 42);
//! assert_eq!(v.pages(), 7);
//!
//! let copy = v.clone();
//! assert_eq!(copy, v);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod span;
pub mod table;
pub mod vector;

// Public re-exports for the primary API surface.
pub use config::{Geometry, DEFAULT_MIN_PAGES, DEFAULT_PAGE_BITS};
pub use error::PagedVecError;
pub use span::PageSpan;
pub use table::PageTable;
pub use vector::PagedVec;
