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

//! The interest score and the total-score evaluator.
//!
//! The interest score of two tag sets `A` and `B` is
//! `min(|A ∩ B|, |A \ B|, |B \ A|)`: a transition is only interesting when the
//! slides share something *and* each slide adds something new. Tag sets are
//! sorted slices, so the intersection size is found with a single merge pass
//! and the two differences follow from the set sizes. Nothing is allocated,
//! which matters because the construction heuristics call this millions of
//! times per run.

use crate::{index::SlideIndex, model::Model};
use std::cmp::Ordering;

/// Counts the elements shared by two strictly ascending slices.
#[inline]
pub fn common_count<T>(a: &[T], b: &[T]) -> usize
where
    T: Ord,
{
    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}

/// Returns `min(|A ∩ B|, |A \ B|, |B \ A|)` for two strictly ascending slices.
///
/// # Examples
///
/// ```rust
/// use vernissage_model::score::interest_score;
///
/// assert_eq!(interest_score(&["a", "b", "c"], &["b", "c", "d"]), 1);
/// assert_eq!(interest_score(&["a", "b"], &["a", "b"]), 0);
/// ```
#[inline]
pub fn interest_score<T>(a: &[T], b: &[T]) -> u32
where
    T: Ord,
{
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let common = common_count(a, b);
    let only_a = a.len() - common;
    let only_b = b.len() - common;
    common.min(only_a).min(only_b) as u32
}

/// Sums the interest scores of all consecutive slide pairs in `order`.
///
/// Meant for reporting and tests; the local search never rescores a full tour.
///
/// # Panics
///
/// Panics if `order` contains an index outside `0..model.num_slides()`.
pub fn total_score(model: &Model, order: &[SlideIndex]) -> u64 {
    order
        .windows(2)
        .map(|pair| model.slide_score(pair[0], pair[1]) as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tags: &[&'static str]) -> Vec<&'static str> {
        let mut v = tags.to_vec();
        v.sort_unstable();
        v.dedup();
        v
    }

    #[test]
    fn test_score_is_symmetric() {
        let sets = [
            sorted(&["a", "b", "c"]),
            sorted(&["b", "c", "d", "e"]),
            sorted(&["x"]),
            sorted(&[]),
            sorted(&["a", "b", "c", "d", "e", "f"]),
        ];
        for a in &sets {
            for b in &sets {
                assert_eq!(interest_score(a, b), interest_score(b, a));
            }
        }
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        assert_eq!(interest_score(&["a", "b"], &["c", "d"]), 0);
    }

    #[test]
    fn test_identical_sets_score_zero() {
        // No tag is exclusive to either side.
        let a = sorted(&["a", "b", "c"]);
        assert_eq!(interest_score(&a, &a), 0);
    }

    #[test]
    fn test_subset_scores_zero() {
        assert_eq!(interest_score(&["a", "b"], &["a", "b", "c", "d"]), 0);
    }

    #[test]
    fn test_balanced_overlap() {
        // common = {c, d}, only_a = {a, b}, only_b = {e, f, g}
        let a = sorted(&["a", "b", "c", "d"]);
        let b = sorted(&["c", "d", "e", "f", "g"]);
        assert_eq!(common_count(&a, &b), 2);
        assert_eq!(interest_score(&a, &b), 2);
    }

    #[test]
    fn test_score_is_bounded_by_smaller_set() {
        let a = sorted(&["a", "b", "c", "d", "e", "f"]);
        let b = sorted(&["a", "z"]);
        let s = interest_score(&a, &b);
        assert!(s as usize <= a.len().min(b.len()));
        assert_eq!(s, 1);
    }

    #[test]
    fn test_total_score_of_tour() {
        let model = Model::from_tag_sets([
            vec!["a", "b"],
            vec!["b", "c"],
            vec!["c", "d"],
            vec!["a", "d"],
        ]);
        let order: Vec<SlideIndex> = (0..4).map(SlideIndex::new).collect();
        assert_eq!(total_score(&model, &order), 3);
        assert_eq!(total_score(&model, &order[..1]), 0);
        assert_eq!(total_score(&model, &[]), 0);
    }
}
