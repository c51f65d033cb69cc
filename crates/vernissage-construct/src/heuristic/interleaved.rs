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

//! Interleaved construction: one slide from every group per round.
//!
//! Round after round, each group that still has members contributes its next
//! slide. The result alternates topics as much as possible, which makes it a
//! useful contrast to [`super::grouped::GroupedConstruction`].

use crate::{
    error::ConstructionError,
    grouping::{GroupKeyPolicy, Groups},
    heuristic::ConstructionHeuristic,
};
use rand::Rng;
use vernissage_model::{model::Model, tour::Tour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterleavedConstruction {
    policy: GroupKeyPolicy,
}

impl InterleavedConstruction {
    #[inline]
    pub fn new(policy: GroupKeyPolicy) -> Self {
        Self { policy }
    }
}

impl ConstructionHeuristic for InterleavedConstruction {
    fn name(&self) -> &str {
        "InterleavedConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let groups = Groups::build(model, self.policy, rng);
        let mut slides = Vec::with_capacity(model.num_slides());
        let mut active: Vec<usize> = (0..groups.num_groups()).collect();

        let mut round = 0;
        while !active.is_empty() {
            active.retain(|&g| match groups.members(g).get(round) {
                Some(&slide) => {
                    slides.push(slide);
                    true
                }
                None => false,
            });
            round += 1;
        }

        tracing::debug!(
            slides = slides.len(),
            rounds = round,
            "interleaved construction finished"
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
        let model = topical_model(73);
        let mut rng = StdRng::seed_from_u64(21);
        let tour = InterleavedConstruction::new(GroupKeyPolicy::RepresentativeMin)
            .construct(&model, &mut rng)
            .unwrap();
        assert_permutation(&model, &tour);
    }

    #[test]
    fn test_first_round_takes_one_slide_per_group() {
        let model = Model::from_tag_sets([
            vec!["a"],
            vec!["a"],
            vec!["a"],
            vec!["b"],
            vec!["c"],
        ]);
        let mut rng = StdRng::seed_from_u64(6);
        let tour = InterleavedConstruction::new(GroupKeyPolicy::RepresentativeMin)
            .construct(&model, &mut rng)
            .unwrap();
        assert_permutation(&model, &tour);

        let groups = Groups::build(
            &model,
            GroupKeyPolicy::RepresentativeMin,
            &mut StdRng::seed_from_u64(6),
        );
        let mut first_round: Vec<usize> = tour.as_slice()[..3]
            .iter()
            .map(|&s| groups.group_of(s))
            .collect();
        first_round.sort_unstable();
        assert_eq!(first_round, vec![0, 1, 2]);
        // The large group is the only one left for the remaining rounds.
        let tail_group = groups.group_of(tour.as_slice()[3]);
        assert_eq!(groups.group_of(tour.as_slice()[4]), tail_group);
        assert_eq!(groups.members(tail_group).len(), 3);
    }
}
