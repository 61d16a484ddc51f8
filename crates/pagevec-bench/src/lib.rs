//! Benchmark profiles and the validation driver for pagevec.
//!
//! - [`BenchProfile`]: workload sizes for the driver and benches
//! - [`fill_assign_compare`]: fill a byte vector with `i mod 256`, deep-copy
//!   it and check every element of the copy, timing each phase
//! - [`vec_fill_assign_compare`]: the same workload on a contiguous `Vec<u8>`
//! - [`parallel`]: page-partitioned verification and rewriting on scoped
//!   worker threads

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod parallel;

use std::time::{Duration, Instant};

use pagevec::PagedVec;
use pagevec_test_utils::byte_pattern;

/// Workload sizes for the driver and benches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchProfile {
    /// Number of elements pushed during the fill phase.
    pub len: u32,
    /// Worker threads used by the partitioned verification pass.
    pub workers: usize,
}

impl BenchProfile {
    /// Element count of the validation scenario. The odd length leaves a
    /// partial trailing page.
    pub const VALIDATION_LEN: u32 = 16 * 1024 * 1024 + 7;

    /// Default worker count for the partitioned pass.
    pub const DEFAULT_WORKERS: usize = 4;

    /// The full validation workload (`16M + 7` elements).
    pub fn validation() -> Self {
        Self {
            len: Self::VALIDATION_LEN,
            workers: Self::DEFAULT_WORKERS,
        }
    }

    /// A 1M-element workload for quick runs and benches.
    pub fn quick() -> Self {
        Self {
            len: 1024 * 1024 + 7,
            workers: Self::DEFAULT_WORKERS,
        }
    }
}

impl Default for BenchProfile {
    fn default() -> Self {
        Self::validation()
    }
}

/// Timings and outcome of one fill/assign/compare run.
#[derive(Clone, Debug)]
pub struct DriverReport {
    /// Elements processed.
    pub len: u32,
    /// Time spent pushing the source elements.
    pub fill: Duration,
    /// Time spent deep-copying into the destination.
    pub assign: Duration,
    /// Time spent checking the destination.
    pub compare: Duration,
    /// First offset whose copied value was wrong, if any.
    pub mismatch: Option<u32>,
}

impl DriverReport {
    /// `true` when every element of the copy matched.
    pub fn passed(&self) -> bool {
        self.mismatch.is_none()
    }

    /// Sum of the three phases.
    pub fn total(&self) -> Duration {
        self.fill + self.assign + self.compare
    }
}

/// Run the fill/assign/compare workload on a [`PagedVec`].
///
/// The source is filled one push at a time, assigned into a fresh vector
/// and the copy is read back by index. The filled destination is returned so
/// callers can run further checks on it.
pub fn fill_assign_compare<const P: u32, const MIN_PAGES: u32>(
    profile: &BenchProfile,
) -> (DriverReport, PagedVec<u8, P, MIN_PAGES>) {
    let started = Instant::now();
    let mut source = PagedVec::<u8, P, MIN_PAGES>::new();
    for i in 0..profile.len {
        source.push(byte_pattern(i));
    }
    let fill = started.elapsed();

    let started = Instant::now();
    let mut copy = PagedVec::<u8, P, MIN_PAGES>::new();
    copy.assign_from(&source);
    let assign = started.elapsed();

    let started = Instant::now();
    let mismatch = (0..profile.len).find(|&i| copy[i] != byte_pattern(i));
    let compare = started.elapsed();

    let report = DriverReport {
        len: profile.len,
        fill,
        assign,
        compare,
        mismatch,
    };
    (report, copy)
}

/// Run the same workload on a contiguous `Vec<u8>` for comparison.
pub fn vec_fill_assign_compare(profile: &BenchProfile) -> DriverReport {
    let started = Instant::now();
    let mut source = Vec::new();
    for i in 0..profile.len {
        source.push(byte_pattern(i));
    }
    let fill = started.elapsed();

    let started = Instant::now();
    let mut copy = Vec::new();
    copy.clone_from(&source);
    let assign = started.elapsed();

    let started = Instant::now();
    let mismatch = (0..profile.len).find(|&i| copy[i as usize] != byte_pattern(i));
    let compare = started.elapsed();

    DriverReport {
        len: profile.len,
        fill,
        assign,
        compare,
        mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> BenchProfile {
        BenchProfile {
            len: 5_000,
            workers: 3,
        }
    }

    #[test]
    fn validation_profile_has_odd_length() {
        let profile = BenchProfile::default();
        assert_eq!(profile.len, 16 * 1024 * 1024 + 7);
        assert_eq!(profile.len % 2, 1);
    }

    #[test]
    fn paged_driver_passes() {
        let (report, copy) = fill_assign_compare::<8, 2>(&tiny());
        assert!(report.passed());
        assert_eq!(copy.len(), 5_000);
        assert_eq!(copy[4_999], byte_pattern(4_999));
    }

    #[test]
    fn vec_driver_passes() {
        let report = vec_fill_assign_compare(&tiny());
        assert!(report.passed());
        assert_eq!(report.len, 5_000);
    }

    #[test]
    fn total_sums_phases() {
        let report = DriverReport {
            len: 0,
            fill: Duration::from_millis(1),
            assign: Duration::from_millis(2),
            compare: Duration::from_millis(3),
            mismatch: None,
        };
        assert_eq!(report.total(), Duration::from_millis(6));
    }
}
