//! Fill, assign and compare a large byte vector, paged and contiguous.
//!
//! Pushes `16M + 7` values `i mod 256`, deep-copies the result, checks every
//! element of the copy, then repeats the check on worker threads with one
//! page partition per worker. The same workload runs on `Vec<u8>` for
//! comparison.
//!
//! Pass `--quick` for a 1M-element run.

use pagevec_bench::parallel::verify_partitioned;
use pagevec_bench::{fill_assign_compare, vec_fill_assign_compare, BenchProfile, DriverReport};
use pagevec_test_utils::byte_pattern;

/// 32M-element pages, four pages per growth step.
const PAGE_BITS: u32 = 25;
const MIN_PAGES: u32 = 4;

fn print_report(label: &str, report: &DriverReport) {
    println!(
        "  [{label}] fill={:>8.2?} assign={:>8.2?} cmp={:>8.2?} total={:>8.2?}",
        report.fill,
        report.assign,
        report.compare,
        report.total(),
    );
    match report.mismatch {
        None => println!("  [{label}] Ok"),
        Some(offset) => println!("  [{label}] Fail at offset {offset}"),
    }
}

fn main() {
    let profile = if std::env::args().any(|arg| arg == "--quick") {
        BenchProfile::quick()
    } else {
        BenchProfile::validation()
    };

    println!("=== pagevec fill/assign/compare ===\n");
    println!("elements: {}, workers: {}\n", profile.len, profile.workers);

    let (report, copy) = fill_assign_compare::<{ PAGE_BITS }, { MIN_PAGES }>(&profile);
    print_report("paged", &report);
    println!(
        "  [paged] pages={} page_capacity={} memory={} bytes",
        copy.pages(),
        copy.page_capacity(),
        copy.memory_bytes(),
    );

    match verify_partitioned(&copy, profile.workers, byte_pattern) {
        None => println!("  [paged/partitioned] Ok"),
        Some(offset) => println!("  [paged/partitioned] Fail at offset {offset}"),
    }
    drop(copy);

    println!();
    let baseline = vec_fill_assign_compare(&profile);
    print_report("vec", &baseline);

    if !report.passed() || !baseline.passed() {
        std::process::exit(1);
    }
}
