//! Page-partitioned work on scoped threads.
//!
//! Page `k` belongs to worker `k % workers`. Each worker touches only its own
//! pages and reports back over a `crossbeam-channel`; nothing inside the
//! vector is shared mutably between threads.

use std::thread;

use crossbeam_channel::unbounded;
use pagevec::{Geometry, PagedVec};

/// Check every live element against `expected`, splitting pages across
/// `workers` threads.
///
/// Returns the lowest offset whose element differs, or `None` if all match.
/// A `workers` of 0 is treated as 1.
pub fn verify_partitioned<T, F, const P: u32, const MIN_PAGES: u32>(
    v: &PagedVec<T, P, MIN_PAGES>,
    workers: usize,
    expected: F,
) -> Option<u32>
where
    T: Copy + Default + PartialEq + Sync,
    F: Fn(u32) -> T + Sync,
{
    let workers = workers.max(1);
    let pages = v.pages();
    let expected = &expected;
    let (tx, rx) = unbounded::<Option<u32>>();

    thread::scope(|scope| {
        for worker in 0..workers {
            let tx = tx.clone();
            scope.spawn(move || {
                let mut first_bad = None;
                for page in (worker as u32..pages).step_by(workers) {
                    let Some(block) = v.page_block(page) else {
                        continue;
                    };
                    let base = Geometry::<P>::page_start(page) as u32;
                    let bad = block
                        .iter()
                        .zip(base..)
                        .find(|&(&value, offset)| value != expected(offset));
                    if let Some((_, offset)) = bad {
                        first_bad = Some(offset);
                        break;
                    }
                }
                // The receiver outlives the scope.
                let _ = tx.send(first_bad);
            });
        }
    });
    drop(tx);

    rx.iter().flatten().min()
}

/// Overwrite every live element with `value(offset)`, splitting pages across
/// `workers` threads. Returns the number of elements written.
///
/// Workers receive disjoint page slices from
/// [`PagedVec::page_blocks_mut`], so the borrow checker guarantees that no
/// two threads touch the same page.
pub fn rewrite_partitioned<T, F, const P: u32, const MIN_PAGES: u32>(
    v: &mut PagedVec<T, P, MIN_PAGES>,
    workers: usize,
    value: F,
) -> usize
where
    T: Copy + Default + Send,
    F: Fn(u32) -> T + Sync,
{
    let workers = workers.max(1);
    let value = &value;

    let mut buckets: Vec<Vec<(u32, &mut [T])>> = (0..workers).map(|_| Vec::new()).collect();
    for (page, block) in v.page_blocks_mut().into_iter().enumerate() {
        buckets[page % workers].push((page as u32, block));
    }

    let (tx, rx) = unbounded::<usize>();
    thread::scope(|scope| {
        for bucket in buckets {
            let tx = tx.clone();
            scope.spawn(move || {
                let mut written = 0;
                for (page, block) in bucket {
                    let base = Geometry::<P>::page_start(page) as u32;
                    for (slot, offset) in block.iter_mut().zip(base..) {
                        *slot = value(offset);
                    }
                    written += block.len();
                }
                let _ = tx.send(written);
            });
        }
    });
    drop(tx);

    rx.iter().sum()
}
