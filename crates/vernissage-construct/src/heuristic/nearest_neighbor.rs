// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Sampled nearest-neighbor construction.
//!
//! Starting from a random slide, each step samples `k` distinct unused slides
//! uniformly at random, scores them against the current slide and moves to the
//! best one (ties go to the first sampled). Scanning all remaining slides would
//! make construction quadratic; sampling caps the work per step at `k` score
//! evaluations, at the price of sometimes missing the true best neighbor.
//!
//! The remaining pool is a plain vector; a chosen element is removed with
//! `swap_remove`, so removal is `O(1)`.
//!
//! [`greedy_chain`] is the generic form of the procedure. The mixed heuristic
//! reuses it to chain slides within a group and to chain whole groups.

use crate::{error::ConstructionError, heuristic::ConstructionHeuristic};
use rand::{Rng, seq::SliceRandom};
use vernissage_model::{index::SlideIndex, model::Model, tour::Tour};

/// Default number of sampled candidates per step.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Chains the items of `pool` greedily.
///
/// `score(current, candidate)` rates the transition between two items. The
/// sample size is clamped to `1..=remaining`.
pub fn greedy_chain<T, R, F>(mut pool: Vec<T>, sample_size: usize, rng: &mut R, score: F) -> Vec<T>
where
    R: Rng + ?Sized,
    F: Fn(&T, &T) -> u32,
{
    if pool.len() <= 1 {
        return pool;
    }

    pool.shuffle(rng);
    let mut chain = Vec::with_capacity(pool.len());
    let Some(first) = pool.pop() else {
        return chain;
    };
    chain.push(first);

    let width = sample_size.max(1);
    while !pool.is_empty() {
        let amount = width.min(pool.len());
        let Some(current) = chain.last() else {
            break;
        };

        let mut best: Option<(usize, u32)> = None;
        for position in rand::seq::index::sample(rng, pool.len(), amount) {
            let s = score(current, &pool[position]);
            if best.is_none_or(|(_, best_score)| s > best_score) {
                best = Some((position, s));
            }
        }

        let Some((position, _)) = best else {
            break;
        };
        chain.push(pool.swap_remove(position));
    }
    chain
}

/// Greedy nearest neighbor over sampled candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighborConstruction {
    sample_size: usize,
}

impl Default for NearestNeighborConstruction {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl NearestNeighborConstruction {
    #[inline]
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl ConstructionHeuristic for NearestNeighborConstruction {
    fn name(&self) -> &str {
        "NearestNeighborConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let pool: Vec<SlideIndex> = model.slide_indices().collect();
        let chain = greedy_chain(pool, self.sample_size, rng, |&a, &b| {
            model.slide_score(a, b)
        });
        tracing::debug!(
            slides = chain.len(),
            sample_size = self.sample_size,
            "nearest neighbor construction finished"
        );
        Ok(Tour::new(chain))
    }
}
