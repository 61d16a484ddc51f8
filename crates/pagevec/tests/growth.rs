//! Integration test: page-table growth accounting.
//!
//! Uses the growth-event counter as an allocation probe to check that
//! `reserve` front-loads growth, that `clear` keeps every page, and that
//! growth never moves existing pages.

use pagevec::PagedVec;
use pagevec_test_utils::sequential;

type Vec8 = PagedVec<u32, 8, 2>;

#[test]
fn reserve_then_exact_pushes_never_grow() {
    for n in [1u32, 255, 256, 257, 512, 10_000] {
        let mut v = Vec8::new();
        v.reserve(n);
        let growth = v.growth_events();
        for i in 0..n {
            v.push(i);
        }
        assert_eq!(v.growth_events(), growth, "n = {n}");
    }
}

#[test]
fn clear_then_smaller_refill_allocates_nothing() {
    let mut v: Vec8 = sequential(5_000);
    let pages = v.page_capacity();
    let growth = v.growth_events();

    for round in 0..3u32 {
        v.clear();
        for i in 0..(4_000 - round * 1_000) {
            v.push(i);
        }
        assert_eq!(v.page_capacity(), pages);
        assert_eq!(v.growth_events(), growth);
    }
}

#[test]
fn growth_adds_min_pages_past_requested_page() {
    let mut v = Vec8::new();
    assert_eq!(v.page_capacity(), 2);
    // Element 512 lives on page 2, the first page past capacity.
    for i in 0..513 {
        v.push(i);
    }
    assert_eq!(v.page_capacity(), 4);
    assert_eq!(v.growth_events(), 1);
}

#[test]
fn growth_does_not_move_written_pages() {
    let mut v: Vec8 = sequential(300);
    let first = v.page_block(0).map(<[u32]>::as_ptr);
    for i in 300..50_000 {
        v.push(i);
    }
    assert_eq!(v.page_block(0).map(<[u32]>::as_ptr), first);
    assert_eq!(v[299], 299);
}

#[test]
fn many_pages_round_trip() {
    let v: PagedVec<u32, 6, 1> = sequential(100_000);
    assert_eq!(v.pages(), 1563);
    for i in (0..100_000).step_by(97) {
        assert_eq!(v[i], i);
    }
}
