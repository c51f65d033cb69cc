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

//! Grouping of slides by a representative tag.
//!
//! Groups bias construction towards topical runs: slides sharing their
//! representative tag are likely to score well against each other. Each slide
//! gets exactly one key, so the groups partition the slide identifiers.
//! Slides without tags share a single untagged group (key `None`).
//!
//! Member lists are shuffled once after assignment, and the group order is
//! shuffled once as well, so round-robin style consumers treat groups fairly.
//! Groups are discovered in slide order before shuffling, which keeps the whole
//! procedure reproducible for a fixed generator state.

use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};
use rustc_hash::FxHashMap;
use std::str::FromStr;
use vernissage_model::{
    index::{SlideIndex, TagIndex},
    model::Model,
    slide::Slide,
};

/// How the representative tag of a slide is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GroupKeyPolicy {
    /// The lexicographically smallest tag.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "min"))]
    RepresentativeMin,
    /// An arbitrary tag, drawn with the run's generator.
    #[cfg_attr(feature = "serde", serde(alias = "first"))]
    RepresentativeFirst,
    /// The tag carried by the fewest slides overall, ties broken lexicographically.
    Rarest,
}

impl GroupKeyPolicy {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKeyPolicy::RepresentativeMin => "representative-min",
            GroupKeyPolicy::RepresentativeFirst => "representative-first",
            GroupKeyPolicy::Rarest => "rarest",
        }
    }

    /// The group key of `slide` under this policy.
    pub fn key<R>(&self, model: &Model, slide: &Slide, rng: &mut R) -> Option<TagIndex>
    where
        R: Rng + ?Sized,
    {
        let tags = slide.tags();
        match self {
            GroupKeyPolicy::RepresentativeMin => tags.first().copied(),
            GroupKeyPolicy::RepresentativeFirst => tags.choose(rng).copied(),
            GroupKeyPolicy::Rarest => tags
                .iter()
                .copied()
                .min_by_key(|&tag| (model.tag_frequency(tag), tag)),
        }
    }
}

impl std::fmt::Display for GroupKeyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a group key policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group key policy '{name}' (expected min, first or rarest)")]
pub struct UnknownGroupKeyError {
    pub name: String,
}

impl FromStr for GroupKeyPolicy {
    type Err = UnknownGroupKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" | "representative-min" => Ok(GroupKeyPolicy::RepresentativeMin),
            "first" | "representative-first" => Ok(GroupKeyPolicy::RepresentativeFirst),
            "rarest" => Ok(GroupKeyPolicy::Rarest),
            other => Err(UnknownGroupKeyError {
                name: other.to_string(),
            }),
        }
    }
}

/// A partition of the slides into groups keyed by a representative tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Groups {
    keys: Vec<Option<TagIndex>>,
    members: Vec<Vec<SlideIndex>>,
    slide_group: Vec<usize>,
}

impl Groups {
    /// Assigns every slide of `model` to a group.
    pub fn build<R>(model: &Model, policy: GroupKeyPolicy, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut positions: FxHashMap<Option<TagIndex>, usize> = FxHashMap::default();
        let mut keys = Vec::new();
        let mut members: Vec<Vec<SlideIndex>> = Vec::new();

        for slide in model.slide_indices() {
            let key = policy.key(model, model.slide(slide), rng);
            let group = *positions.entry(key).or_insert_with(|| {
                keys.push(key);
                members.push(Vec::new());
                keys.len() - 1
            });
            members[group].push(slide);
        }

        for list in &mut members {
            list.shuffle(rng);
        }

        let mut permutation: Vec<usize> = (0..keys.len()).collect();
        permutation.shuffle(rng);
        let keys: Vec<Option<TagIndex>> = permutation.iter().map(|&g| keys[g]).collect();
        let members: Vec<Vec<SlideIndex>> = permutation
            .iter()
            .map(|&g| std::mem::take(&mut members[g]))
            .collect();

        let mut slide_group = vec![0; model.num_slides()];
        for (group, list) in members.iter().enumerate() {
            for slide in list {
                slide_group[slide.get()] = group;
            }
        }

        Self {
            keys,
            members,
            slide_group,
        }
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The representative tag of `group`, `None` for the untagged group.
    #[inline]
    pub fn key(&self, group: usize) -> Option<TagIndex> {
        self.keys[group]
    }

    /// The shuffled members of `group`.
    #[inline]
    pub fn members(&self, group: usize) -> &[SlideIndex] {
        &self.members[group]
    }

    /// The group a slide was assigned to.
    #[inline]
    pub fn group_of(&self, slide: SlideIndex) -> usize {
        self.slide_group[slide.get()]
    }

    /// Iterates over `(key, members)` in the shuffled group order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<TagIndex>, &[SlideIndex])> {
        self.keys
            .iter()
            .copied()
            .zip(self.members.iter().map(Vec::as_slice))
    }

    /// Consumes the grouping and returns the member lists in group order.
    #[inline]
    pub fn into_members(self) -> Vec<Vec<SlideIndex>> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;
    use rand::{SeedableRng, rngs::StdRng};

    fn assert_partition(groups: &Groups, n: usize) {
        let mut seen = FixedBitSet::with_capacity(n);
        for (g, (_, members)) in groups.iter().enumerate() {
            assert!(!members.is_empty());
            for &s in members {
                assert!(!seen.put(s.get()), "{} in two groups", s);
                assert_eq!(groups.group_of(s), g);
            }
        }
        assert_eq!(seen.count_ones(..), n);
    }

    #[test]
    fn test_min_policy_groups_by_smallest_tag() {
        let model = Model::from_tag_sets([
            vec!["b", "a"],
            vec!["a", "z"],
            vec!["c", "d"],
            vec!["d", "c", "e"],
            Vec::new(),
        ]);
        let mut rng = StdRng::seed_from_u64(11);
        let groups = Groups::build(&model, GroupKeyPolicy::RepresentativeMin, &mut rng);
        assert_eq!(groups.num_groups(), 3);
        assert_partition(&groups, model.num_slides());

        let a = model.find_tag("a");
        let g = groups.group_of(SlideIndex::new(0));
        assert_eq!(groups.key(g), a);
        assert_eq!(groups.group_of(SlideIndex::new(1)), g);
        assert_eq!(groups.key(groups.group_of(SlideIndex::new(4))), None);
    }

    #[test]
    fn test_rarest_policy_isolates_unique_tag() {
        let model = Model::from_tag_sets([
            vec!["common", "shared"],
            vec!["common", "shared"],
            vec!["common", "shared", "unique"],
            vec!["common", "shared"],
            vec!["common", "other"],
            vec!["common", "other"],
        ]);
        let mut rng = StdRng::seed_from_u64(2);
        let groups = Groups::build(&model, GroupKeyPolicy::Rarest, &mut rng);
        assert_partition(&groups, model.num_slides());

        let g = groups.group_of(SlideIndex::new(2));
        assert_eq!(groups.members(g), &[SlideIndex::new(2)]);
        assert_eq!(groups.key(g), model.find_tag("unique"));
        // "other" (2 slides) is rarer than "shared" (4) and "common" (6).
        let other = groups.group_of(SlideIndex::new(4));
        assert_eq!(groups.key(other), model.find_tag("other"));
        assert_eq!(groups.members(other).len(), 2);
    }

    #[test]
    fn test_rarest_breaks_ties_lexicographically() {
        let model = Model::from_tag_sets([vec!["m", "k"], vec!["x", "y"]]);
        let mut rng = StdRng::seed_from_u64(0);
        let groups = Groups::build(&model, GroupKeyPolicy::Rarest, &mut rng);
        let g = groups.group_of(SlideIndex::new(0));
        assert_eq!(groups.key(g), model.find_tag("k"));
    }

    #[test]
    fn test_first_policy_is_reproducible_for_a_seed() {
        let model = Model::from_tag_sets((0..50).map(|i| {
            vec![
                format!("t{}", i % 7),
                format!("u{}", i % 5),
                format!("v{}", i % 3),
            ]
        }));
        let a = Groups::build(
            &model,
            GroupKeyPolicy::RepresentativeFirst,
            &mut StdRng::seed_from_u64(42),
        );
        let b = Groups::build(
            &model,
            GroupKeyPolicy::RepresentativeFirst,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
        assert_partition(&a, model.num_slides());
        for (key, members) in a.iter() {
            let key = key.unwrap();
            assert!(members.iter().all(|&s| model.slide(s).tags().contains(&key)));
        }
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "min".parse::<GroupKeyPolicy>(),
            Ok(GroupKeyPolicy::RepresentativeMin)
        );
        assert_eq!(
            "representative-first".parse::<GroupKeyPolicy>(),
            Ok(GroupKeyPolicy::RepresentativeFirst)
        );
        assert_eq!("rarest".parse::<GroupKeyPolicy>(), Ok(GroupKeyPolicy::Rarest));
        assert_eq!(
            "largest".parse::<GroupKeyPolicy>(),
            Err(UnknownGroupKeyError {
                name: "largest".to_string()
            })
        );
        assert_eq!(GroupKeyPolicy::Rarest.to_string(), "rarest");
    }

    #[test]
    fn test_empty_model_has_no_groups() {
        let model = Model::default();
        let groups = Groups::build(&model, GroupKeyPolicy::Rarest, &mut StdRng::seed_from_u64(0));
        assert!(groups.is_empty());
    }
}
