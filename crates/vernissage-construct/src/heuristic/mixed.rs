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

//! Mixed construction: nearest neighbor inside groups, then across groups.
//!
//! Each group is first chained with the sampled nearest-neighbor procedure.
//! The resulting chains are then chained themselves, scoring the transition
//! from the last slide of one chain to the first slide of the next with a
//! separate, usually much smaller, sample size. The tour is the concatenation
//! of the chains in that order.

use crate::{
    error::ConstructionError,
    grouping::{GroupKeyPolicy, Groups},
    heuristic::{
        ConstructionHeuristic,
        nearest_neighbor::{DEFAULT_SAMPLE_SIZE, greedy_chain},
    },
};
use rand::Rng;
use vernissage_model::{index::SlideIndex, model::Model, tour::Tour};

/// Default number of sampled groups per step when ordering groups.
pub const DEFAULT_GROUP_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedConstruction {
    policy: GroupKeyPolicy,
    sample_size: usize,
    group_sample_size: usize,
}

impl Default for MixedConstruction {
    fn default() -> Self {
        Self::new(
            GroupKeyPolicy::default(),
            DEFAULT_SAMPLE_SIZE,
            DEFAULT_GROUP_SAMPLE_SIZE,
        )
    }
}

impl MixedConstruction {
    #[inline]
    pub fn new(policy: GroupKeyPolicy, sample_size: usize, group_sample_size: usize) -> Self {
        Self {
            policy,
            sample_size,
            group_sample_size,
        }
    }

    #[inline]
    pub fn policy(&self) -> GroupKeyPolicy {
        self.policy
    }

    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[inline]
    pub fn group_sample_size(&self) -> usize {
        self.group_sample_size
    }
}

impl ConstructionHeuristic for MixedConstruction {
    fn name(&self) -> &str {
        "MixedConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let groups = Groups::build(model, self.policy, rng);
        let num_groups = groups.num_groups();

        let chains: Vec<Vec<SlideIndex>> = groups
            .into_members()
            .into_iter()
            .map(|members| {
                greedy_chain(members, self.sample_size, rng, |&a, &b| {
                    model.slide_score(a, b)
                })
            })
            .collect();

        // Chains are never empty: every group has at least one member.
        let ordered = greedy_chain(chains, self.group_sample_size, rng, |from, to| {
            match (from.last(), to.first()) {
                (Some(&a), Some(&b)) => model.slide_score(a, b),
                _ => 0,
            }
        });

        let slides: Vec<SlideIndex> = ordered.into_iter().flatten().collect();
        tracing::debug!(
            slides = slides.len(),
            groups = num_groups,
            sample_size = self.sample_size,
            group_sample_size = self.group_sample_size,
            "mixed construction finished"
        );
        Ok(Tour::new(slides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::test_support::{assert_permutation, topical_model};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_produces_permutation() {
        let model = topical_model(150);
        for (k, k_group) in [(1, 1), (10, 3), (500, 500), (0, 0)] {
            let mut rng = StdRng::seed_from_u64(k as u64 + 1);
            let tour = MixedConstruction::new(GroupKeyPolicy::RepresentativeMin, k, k_group)
                .construct(&model, &mut rng)
                .unwrap();
            assert_permutation(&model, &tour);
        }
    }

    #[test]
    fn test_groups_stay_contiguous() {
        let model = topical_model(60);
        let mut rng = StdRng::seed_from_u64(12);
        let tour = MixedConstruction::default()
            .construct(&model, &mut rng)
            .unwrap();
        assert_permutation(&model, &tour);

        let groups = Groups::build(
            &model,
            GroupKeyPolicy::RepresentativeMin,
            &mut StdRng::seed_from_u64(12),
        );
        let mut switches = 0;
        for w in tour.as_slice().windows(2) {
            if groups.group_of(w[0]) != groups.group_of(w[1]) {
                switches += 1;
            }
        }
        assert_eq!(switches, groups.num_groups() - 1);
    }

    #[test]
    fn test_beats_identity_on_topical_instance() {
        let model = topical_model(200);
        let mut rng = StdRng::seed_from_u64(5);
        let mixed = MixedConstruction::default()
            .construct(&model, &mut rng)
            .unwrap();
        // Consecutive identifiers share no tag, so the identity tour scores 0,
        // while every transition inside a place group scores at least 1.
        let identity = Tour::identity(model.num_slides());
        assert_eq!(identity.total_score(&model), 0);
        assert!(mixed.total_score(&model) > 0);
    }

    #[test]
    fn test_is_deterministic_for_a_seed() {
        let model = topical_model(90);
        let a = MixedConstruction::default()
            .construct(&model, &mut StdRng::seed_from_u64(31))
            .unwrap();
        let b = MixedConstruction::default()
            .construct(&model, &mut StdRng::seed_from_u64(31))
            .unwrap();
        assert_eq!(a, b);
    }
}
