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

//! Pairing of vertical photos into two-photo slides.
//!
//! Vertical photos can only be shown in pairs. This module decides which
//! photos share a slide and assembles a complete [`Model`] from a mixed list
//! of horizontal and vertical photos.
//!
//! # Strategies
//!
//! - `Random`: shuffle and pair neighbours.
//! - `Similar`: repeatedly pair the two unused photos with the most common
//!   tags, preferring pairs with similar tag counts.
//! - `Different`: repeatedly pair the two unused photos with the fewest
//!   common tags, which maximizes the tag count of the resulting slide.
//!
//! The greedy strategies pick the best remaining pair in every round, ties
//! going to the smallest index pair. Instead of ranking all `n (n - 1) / 2`
//! pairs up front, each photo keeps only its best partner among the unused
//! photos with a larger index, stored in a heap. An entry whose partner got
//! used is recomputed when it reaches the top. Memory stays linear in the
//! number of vertical photos; time is at least quadratic.
//!
//! With an odd number of vertical photos the last one is left out.

use crate::{
    model::{Model, ModelBuilder, ModelError},
    photo::{Orientation, Photo},
    score::common_count,
    slide::SlideKind,
};
use fixedbitset::FixedBitSet;
use rand::{Rng, seq::SliceRandom};
use std::{cmp::Reverse, collections::BinaryHeap, str::FromStr};

/// How vertical photos are combined into slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PairingStrategy {
    Random,
    Similar,
    #[default]
    Different,
}

impl PairingStrategy {
    pub const ALL: [PairingStrategy; 3] = [
        PairingStrategy::Random,
        PairingStrategy::Similar,
        PairingStrategy::Different,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PairingStrategy::Random => "random",
            PairingStrategy::Similar => "similar",
            PairingStrategy::Different => "different",
        }
    }
}

impl std::fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a pairing strategy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pairing strategy '{name}' (expected random, similar or different)")]
pub struct UnknownPairingError {
    pub name: String,
}

impl FromStr for PairingStrategy {
    type Err = UnknownPairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PairingStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownPairingError {
                name: s.to_string(),
            })
    }
}

/// Pairs the given vertical photos and returns pairs of positions into `photos`.
///
/// Orientation is not checked here; [`ModelBuilder::add_vertical`] does that.
pub fn pair_vertical_photos<R>(
    photos: &[&Photo],
    strategy: PairingStrategy,
    rng: &mut R,
) -> Vec<(usize, usize)>
where
    R: Rng + ?Sized,
{
    let usable = photos.len() - photos.len() % 2;
    match strategy {
        PairingStrategy::Random => {
            let mut positions: Vec<usize> = (0..usable).collect();
            positions.shuffle(rng);
            positions.chunks_exact(2).map(|c| (c[0], c[1])).collect()
        }
        PairingStrategy::Similar => greedy_pairs(&photos[..usable], |a, b| {
            let common = common_count(a.tags(), b.tags());
            let diff = a.num_tags().abs_diff(b.num_tags());
            // Most common tags first, then smallest size difference.
            (usize::MAX - common, diff)
        }),
        PairingStrategy::Different => greedy_pairs(&photos[..usable], |a, b| {
            (common_count(a.tags(), b.tags()), 0)
        }),
    }
}

fn greedy_pairs<F>(photos: &[&Photo], key: F) -> Vec<(usize, usize)>
where
    F: Fn(&Photo, &Photo) -> (usize, usize),
{
    let n = photos.len();
    if n < 2 {
        return Vec::new();
    }

    // Best unused partner `j > i` of photo `i`, smallest `(key, j)` first.
    let best_partner = |i: usize, used: &FixedBitSet| {
        ((i + 1)..n)
            .filter(|&j| !used.contains(j))
            .map(|j| (key(photos[i], photos[j]), j))
            .min()
    };

    let mut used = FixedBitSet::with_capacity(n);
    let mut heap: BinaryHeap<Reverse<((usize, usize), usize, usize)>> = (0..n)
        .filter_map(|i| best_partner(i, &used).map(|(k, j)| Reverse((k, i, j))))
        .collect();

    let mut pairs = Vec::with_capacity(n / 2);
    while let Some(Reverse((_, i, j))) = heap.pop() {
        if used.contains(i) {
            continue;
        }
        if used.contains(j) {
            if let Some((k, j)) = best_partner(i, &used) {
                heap.push(Reverse((k, i, j)));
            }
            continue;
        }
        used.insert(i);
        used.insert(j);
        pairs.push((i, j));
        if pairs.len() == n / 2 {
            break;
        }
    }
    pairs
}

/// Builds a model from a mixed list of photos.
///
/// Every horizontal photo becomes its own slide, vertical photos are paired with
/// `strategy`. The resulting slide list is shuffled so that slide identifiers
/// carry no information about the input order.
pub fn assemble_model<R>(
    photos: &[Photo],
    strategy: PairingStrategy,
    rng: &mut R,
) -> Result<Model, ModelError>
where
    R: Rng + ?Sized,
{
    let verticals: Vec<&Photo> = photos
        .iter()
        .filter(|p| p.orientation() == Orientation::Vertical)
        .collect();

    let mut plan: Vec<SlideKind> = photos
        .iter()
        .filter(|p| p.orientation() == Orientation::Horizontal)
        .map(|p| SlideKind::Horizontal(p.id()))
        .collect();
    let mut by_id: rustc_hash::FxHashMap<u64, &Photo> =
        photos.iter().map(|p| (p.id(), p)).collect();

    for (i, j) in pair_vertical_photos(&verticals, strategy, rng) {
        plan.push(SlideKind::Vertical(verticals[i].id(), verticals[j].id()));
    }
    plan.shuffle(rng);

    let mut builder = ModelBuilder::preallocated(plan.len());
    for kind in plan {
        match kind {
            SlideKind::Horizontal(id) => {
                let photo = lookup(&mut by_id, id)?;
                builder.add_horizontal(photo)?;
            }
            SlideKind::Vertical(first, second) => {
                let first = lookup(&mut by_id, first)?;
                let second = lookup(&mut by_id, second)?;
                builder.add_vertical(first, second)?;
            }
        }
    }
    Ok(builder.build())
}

/// Removes the photo from the lookup so that a second use of the same id
/// (two input photos sharing one id) is reported as a duplicate.
fn lookup<'a>(
    by_id: &mut rustc_hash::FxHashMap<u64, &'a Photo>,
    id: u64,
) -> Result<&'a Photo, ModelError> {
    by_id
        .remove(&id)
        .ok_or(ModelError::DuplicatePhoto { photo_id: id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn verticals() -> Vec<Photo> {
        vec![
            Photo::vertical(10, ["a", "b", "c"]),
            Photo::vertical(11, ["a", "b", "c"]),
            Photo::vertical(12, ["x", "y"]),
            Photo::vertical(13, ["a", "x"]),
            Photo::vertical(14, ["q"]),
        ]
    }

    fn assert_disjoint(pairs: &[(usize, usize)], n: usize) {
        let mut seen = FixedBitSet::with_capacity(n);
        for &(i, j) in pairs {
            assert_ne!(i, j);
            assert!(!seen.put(i), "position {} paired twice", i);
            assert!(!seen.put(j), "position {} paired twice", j);
        }
    }

    #[test]
    fn test_odd_photo_is_left_out() {
        let photos = verticals();
        let refs: Vec<&Photo> = photos.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        for strategy in [
            PairingStrategy::Random,
            PairingStrategy::Similar,
            PairingStrategy::Different,
        ] {
            let pairs = pair_vertical_photos(&refs, strategy, &mut rng);
            assert_eq!(pairs.len(), 2, "strategy {}", strategy);
            assert_disjoint(&pairs, refs.len());
            assert!(pairs.iter().all(|&(i, j)| i < 4 && j < 4));
        }
    }

    #[test]
    fn test_similar_pairs_identical_photos() {
        let photos = verticals();
        let refs: Vec<&Photo> = photos.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        let pairs = pair_vertical_photos(&refs[..4], PairingStrategy::Similar, &mut rng);
        assert_eq!(pairs[0], (0, 1));
        assert_eq!(pairs[1], (2, 3));
    }

    #[test]
    fn test_different_avoids_shared_tags() {
        let photos = verticals();
        let refs: Vec<&Photo> = photos.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        let pairs = pair_vertical_photos(&refs[..4], PairingStrategy::Different, &mut rng);
        // (0, 2) is the first pair without common tags; (1, 3) remains.
        assert_eq!(pairs, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_assemble_model_uses_every_photo_once() {
        let mut photos = verticals();
        photos.push(Photo::horizontal(1, ["a", "q"]));
        photos.push(Photo::horizontal(2, ["b"]));

        let mut rng = StdRng::seed_from_u64(3);
        let model = assemble_model(&photos, PairingStrategy::Different, &mut rng).unwrap();
        assert_eq!(model.num_slides(), 4);

        let mut ids: Vec<u64> = model
            .slides()
            .iter()
            .flat_map(|s| s.photo_ids().into_iter())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 10, 11, 12, 13]);
        assert_eq!(model.slides().iter().filter(|s| s.is_vertical()).count(), 2);
    }

    #[test]
    fn test_assemble_model_rejects_shared_ids() {
        let photos = vec![Photo::horizontal(1, ["a"]), Photo::horizontal(1, ["b"])];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            assemble_model(&photos, PairingStrategy::Random, &mut rng),
            Err(ModelError::DuplicatePhoto { photo_id: 1 })
        );
    }

    /// Ranks every pair once and sweeps the ranking.
    fn exhaustive_pairs<F>(photos: &[&Photo], key: F) -> Vec<(usize, usize)>
    where
        F: Fn(&Photo, &Photo) -> (usize, usize),
    {
        let n = photos.len();
        let mut candidates = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                candidates.push((key(photos[i], photos[j]), i, j));
            }
        }
        candidates.sort_unstable();

        let mut used = FixedBitSet::with_capacity(n);
        let mut pairs = Vec::new();
        for (_, i, j) in candidates {
            if !used.contains(i) && !used.contains(j) {
                used.insert(i);
                used.insert(j);
                pairs.push((i, j));
            }
        }
        pairs
    }

    #[test]
    fn test_heap_pairing_matches_exhaustive_ranking() {
        let mut rng = StdRng::seed_from_u64(13);
        let photos: Vec<Photo> = (0..60)
            .map(|id| {
                let count = rng.random_range(1..6);
                let tags: Vec<String> = (0..count)
                    .map(|_| format!("t{}", rng.random_range(0..8)))
                    .collect();
                Photo::vertical(id, tags)
            })
            .collect();
        let refs: Vec<&Photo> = photos.iter().collect();

        let similar = |a: &Photo, b: &Photo| {
            (
                usize::MAX - common_count(a.tags(), b.tags()),
                a.num_tags().abs_diff(b.num_tags()),
            )
        };
        let different = |a: &Photo, b: &Photo| (common_count(a.tags(), b.tags()), 0);

        assert_eq!(
            greedy_pairs(&refs, similar),
            exhaustive_pairs(&refs, similar)
        );
        assert_eq!(
            greedy_pairs(&refs, different),
            exhaustive_pairs(&refs, different)
        );
        assert_eq!(greedy_pairs(&refs[..1], different), Vec::new());
    }

    #[test]
    fn test_strategy_names() {
        for strategy in PairingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<PairingStrategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.as_str());
        }
        assert_eq!(
            "closest".parse::<PairingStrategy>(),
            Err(UnknownPairingError {
                name: "closest".to_string()
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_pairing_of_deserialized_photos() {
        let json = r#"[
            { "id": 0, "orientation": "vertical", "tags": ["z", "a", "a"] },
            { "id": 1, "orientation": "vertical", "tags": ["a", "z"] },
            { "id": 2, "orientation": "vertical", "tags": ["q", "r"] },
            { "id": 3, "orientation": "vertical", "tags": ["s", "r", "q"] }
        ]"#;
        let photos: Vec<Photo> = serde_json::from_str(json).unwrap();
        let refs: Vec<&Photo> = photos.iter().collect();
        assert_eq!(common_count(refs[0].tags(), refs[1].tags()), 2);

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            pair_vertical_photos(&refs, PairingStrategy::Similar, &mut rng),
            vec![(0, 1), (2, 3)]
        );
    }
}
