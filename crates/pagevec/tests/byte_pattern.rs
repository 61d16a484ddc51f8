//! Integration test: fill, deep-copy and compare a large byte vector.
//!
//! Pushes `16 * 1024 * 1024 + 7` values `i mod 256` one at a time, assigns
//! the result into a second vector and checks every element of the copy.
//! The odd length leaves a partial trailing page.

use pagevec::PagedVec;
use pagevec_test_utils::{byte_filled, byte_pattern};

const LEN: u32 = 16 * 1024 * 1024 + 7;

/// 64K-element pages, four pages per growth step.
type Bytes = PagedVec<u8, 16, 4>;

#[test]
fn fill_assign_compare_is_bit_exact() {
    let source: Bytes = byte_filled(LEN);
    assert_eq!(source.len(), LEN);

    let mut copy = Bytes::new();
    copy.assign_from(&source);
    assert_eq!(copy.len(), LEN);

    for i in 0..LEN {
        assert_eq!(copy[i], byte_pattern(i), "mismatch at offset {i}");
    }
}

#[test]
fn copy_uses_page_blocks_of_source_layout() {
    let source: Bytes = byte_filled(LEN);
    let copy = source.clone();

    assert_eq!(copy.pages(), source.pages());
    assert_eq!(copy.pages(), (LEN >> 16) + 1);
    let last = copy.pages() - 1;
    assert_eq!(copy.page_block(last).map(<[u8]>::len), Some(7));
    for page in 0..copy.pages() {
        assert_eq!(copy.page_block(page), source.page_block(page));
    }
}

#[test]
fn reassign_shorter_source_keeps_high_water_mark() {
    let big: Bytes = byte_filled(LEN);
    let small: Bytes = byte_filled(1000);

    let mut target = big.clone();
    let pages = target.page_capacity();
    target.assign_from(&small);

    assert_eq!(target.len(), 1000);
    assert_eq!(target.page_capacity(), pages);
    assert_eq!(target, small);
}
