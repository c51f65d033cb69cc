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

//! Grouped construction: topical groups laid out one after another.

use crate::{
    error::ConstructionError,
    grouping::{GroupKeyPolicy, Groups},
    heuristic::ConstructionHeuristic,
};
use rand::Rng;
use vernissage_model::{model::Model, tour::Tour};

/// Concatenates the groups of a [`Groups`] partition.
///
/// Group order and the members of each group are shuffled by
/// [`Groups::build`], so this heuristic only lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupedConstruction {
    policy: GroupKeyPolicy,
}

impl GroupedConstruction {
    #[inline]
    pub fn new(policy: GroupKeyPolicy) -> Self {
        Self { policy }
    }

    #[inline]
    pub fn policy(&self) -> GroupKeyPolicy {
        self.policy
    }
}

impl ConstructionHeuristic for GroupedConstruction {
    fn name(&self) -> &str {
        "GroupedConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let groups = Groups::build(model, self.policy, rng);
        let num_groups = groups.num_groups();
        let slides: Vec<_> = groups.into_members().into_iter().flatten().collect();
        tracing::debug!(
            slides = slides.len(),
            groups = num_groups,
            policy = %self.policy,
            "grouped construction finished"
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
    fn test_groups_are_contiguous() {
        let model = topical_model(90);
        let mut rng = StdRng::seed_from_u64(4);
        let tour = GroupedConstruction::new(GroupKeyPolicy::Rarest)
            .construct(&model, &mut rng)
            .unwrap();
        assert_permutation(&model, &tour);

        // Replaying the generator reproduces the grouping the heuristic used.
        let groups = Groups::build(&model, GroupKeyPolicy::Rarest, &mut StdRng::seed_from_u64(4));
        let mut expected = Vec::new();
        for (_, members) in groups.iter() {
            expected.extend_from_slice(members);
        }
        assert_eq!(tour.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_every_policy_produces_permutation() {
        let model = topical_model(50);
        for policy in [
            GroupKeyPolicy::RepresentativeMin,
            GroupKeyPolicy::RepresentativeFirst,
            GroupKeyPolicy::Rarest,
        ] {
            let mut rng = StdRng::seed_from_u64(8);
            let tour = GroupedConstruction::new(policy)
                .construct(&model, &mut rng)
                .unwrap();
            assert_permutation(&model, &tour);
        }
    }
}
