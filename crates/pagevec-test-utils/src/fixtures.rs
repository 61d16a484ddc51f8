//! Seeded operation scripts.
//!
//! An [`OpScript`] is a reproducible sequence of mutations generated from a
//! `ChaCha8Rng` seed. [`OpScript::run`] applies it to a [`PagedVec`] and a
//! [`ModelVec`] in lockstep and reports the first step at which they
//! disagree.

use std::fmt;

use pagevec::PagedVec;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ModelVec;

/// A single mutation applied to both the paged vector and the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Push(u32),
    Pop,
    /// Raw offset; reduced modulo `len + 1` when applied, so it can land one
    /// past the end.
    Erase(u32),
    Extend(Vec<u32>),
    Clear,
    Reserve(u32),
    /// Deep-copy into a fresh vector and continue with the copy.
    Reassign,
}

/// The first step at which the paged vector and the model disagreed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    pub step: usize,
    pub op: Op,
    pub reason: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({:?}): {}", self.step, self.op, self.reason)
    }
}

impl std::error::Error for Divergence {}

/// A reproducible mutation script.
#[derive(Clone, Debug)]
pub struct OpScript {
    pub seed: u64,
    ops: Vec<Op>,
}

impl OpScript {
    /// Generate `len` operations from `seed`.
    ///
    /// The mix is append-heavy so the vector keeps crossing page boundaries,
    /// with enough pops, erases and clears to exercise the shrink paths.
    pub fn seeded(seed: u64, len: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ops = (0..len).map(|_| Self::random_op(&mut rng)).collect();
        Self { seed, ops }
    }

    fn random_op(rng: &mut ChaCha8Rng) -> Op {
        match rng.random_range(0..100u32) {
            0..=59 => Op::Push(rng.random()),
            60..=69 => Op::Pop,
            70..=84 => Op::Erase(rng.random()),
            85..=92 => {
                let n = rng.random_range(0..48usize);
                Op::Extend((0..n).map(|_| rng.random()).collect())
            }
            93..=94 => Op::Clear,
            95..=97 => Op::Reserve(rng.random_range(0..512)),
            _ => Op::Reassign,
        }
    }

    /// Build a script from an explicit operation list.
    pub fn from_ops(ops: Vec<Op>) -> Self {
        Self { seed: 0, ops }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Apply the script to a fresh paged vector and a fresh model.
    ///
    /// Contents are compared after every step. On success both final states
    /// are returned for further assertions.
    pub fn run<const P: u32, const MIN_PAGES: u32>(
        &self,
    ) -> Result<(PagedVec<u32, P, MIN_PAGES>, ModelVec<u32>), Divergence> {
        let mut paged = PagedVec::<u32, P, MIN_PAGES>::new();
        let mut model = ModelVec::new();

        for (step, op) in self.ops.iter().enumerate() {
            let diverged = |reason: String| Divergence {
                step,
                op: op.clone(),
                reason,
            };

            match op {
                Op::Push(value) => {
                    paged.push(*value);
                    model.push(*value);
                }
                Op::Pop => {
                    let (got, want) = (paged.pop(), model.pop());
                    if got != want {
                        return Err(diverged(format!("pop returned {got:?}, model {want:?}")));
                    }
                }
                Op::Erase(raw) => {
                    let offset = raw % (model.len() + 1);
                    let (got, want) = (paged.erase(offset).ok(), model.erase(offset));
                    if got != want {
                        return Err(diverged(format!(
                            "erase({offset}) returned {got:?}, model {want:?}"
                        )));
                    }
                }
                Op::Extend(values) => {
                    paged.extend_from_slice(values);
                    model.extend_from_slice(values);
                }
                Op::Clear => {
                    let pages = paged.page_capacity();
                    paged.clear();
                    model.clear();
                    if paged.page_capacity() != pages {
                        return Err(diverged("clear released pages".into()));
                    }
                }
                Op::Reserve(count) => {
                    paged.reserve(*count);
                    if paged.capacity() < *count as usize {
                        return Err(diverged(format!(
                            "capacity {} below reserved {count}",
                            paged.capacity()
                        )));
                    }
                }
                Op::Reassign => {
                    let mut fresh = PagedVec::new();
                    fresh.assign_from(&paged);
                    paged = fresh;
                }
            }

            if paged.len() != model.len() {
                return Err(diverged(format!(
                    "len {} vs model {}",
                    paged.len(),
                    model.len()
                )));
            }
            if paged.to_vec() != model.as_slice() {
                return Err(diverged("contents differ".into()));
            }
        }

        Ok((paged, model))
    }
}
