//! Integration test: seeded mutation scripts against a `Vec` model.
//!
//! Every script runs under several page geometries so that the same logical
//! sequence crosses page boundaries at different points.

use pagevec_test_utils::OpScript;

const SEEDS: [u64; 6] = [1, 2, 3, 42, 1234, 0xDEAD_BEEF];

#[test]
fn tiny_pages_match_model() {
    for seed in SEEDS {
        let script = OpScript::seeded(seed, 1_500);
        if let Err(divergence) = script.run::<2, 1>() {
            panic!("seed {seed}: {divergence}");
        }
    }
}

#[test]
fn small_pages_match_model() {
    for seed in SEEDS {
        let script = OpScript::seeded(seed, 1_500);
        if let Err(divergence) = script.run::<5, 3>() {
            panic!("seed {seed}: {divergence}");
        }
    }
}

#[test]
fn single_page_geometry_matches_model() {
    for seed in SEEDS {
        let script = OpScript::seeded(seed, 800);
        if let Err(divergence) = script.run::<12, 1>() {
            panic!("seed {seed}: {divergence}");
        }
    }
}
