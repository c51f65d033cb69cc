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

//! Score deltas of the local search moves.
//!
//! The interest score is symmetric, so reversing a segment or swapping two
//! neighbors leaves every edge strictly inside the affected range unchanged.
//! Each delta below therefore only looks at the at most four edges whose
//! endpoints change. Edge `p` joins positions `p` and `p + 1`; edges outside
//! `0..len - 1` do not exist and contribute nothing.
//!
//! None of the functions mutate the tour. A positive delta means the move
//! would increase the total score.

use smallvec::SmallVec;
use vernissage_model::{index::SlideIndex, model::Model};

#[inline]
fn score(model: &Model, a: SlideIndex, b: SlideIndex) -> i64 {
    i64::from(model.slide_score(a, b))
}

/// Score of the edge between positions `p` and `p + 1`, zero if it does not exist.
#[inline]
pub fn edge_score(model: &Model, tour: &[SlideIndex], p: usize) -> i64 {
    match (tour.get(p), p.checked_add(1).and_then(|q| tour.get(q))) {
        (Some(&a), Some(&b)) => score(model, a, b),
        _ => 0,
    }
}

/// Delta of swapping positions `i` and `i + 1`.
///
/// # Panics
///
/// Panics if `i + 1 >= tour.len()`.
pub fn adjacent_swap_delta(model: &Model, tour: &[SlideIndex], i: usize) -> i64 {
    let (b, c) = (tour[i], tour[i + 1]);
    let mut delta = 0;
    if i > 0 {
        let a = tour[i - 1];
        delta += score(model, a, c) - score(model, a, b);
    }
    if let Some(&d) = tour.get(i + 2) {
        delta += score(model, b, d) - score(model, c, d);
    }
    delta
}

/// The distinct existing edges touching positions `i` or `j`.
fn swap_edges(i: usize, j: usize, len: usize) -> SmallVec<[usize; 4]> {
    let mut edges: SmallVec<[usize; 4]> = SmallVec::new();
    for p in [i.checked_sub(1), Some(i), j.checked_sub(1), Some(j)]
        .into_iter()
        .flatten()
    {
        if p + 1 < len && !edges.contains(&p) {
            edges.push(p);
        }
    }
    edges
}

/// Delta of swapping the slides at positions `i` and `j`.
///
/// Works for any pair of distinct positions, adjacent ones included.
///
/// # Panics
///
/// Panics if `i` or `j` is out of bounds.
pub fn swap_delta(model: &Model, tour: &[SlideIndex], i: usize, j: usize) -> i64 {
    if i == j {
        return 0;
    }
    let len = tour.len();
    let swapped = |p: usize| {
        if p == i {
            tour[j]
        } else if p == j {
            tour[i]
        } else {
            tour[p]
        }
    };

    swap_edges(i, j, len)
        .into_iter()
        .map(|p| score(model, swapped(p), swapped(p + 1)) - score(model, tour[p], tour[p + 1]))
        .sum()
}

/// Delta of reversing the segment `i..=j`.
///
/// Only the two boundary edges `(i - 1, i)` and `(j, j + 1)` change.
///
/// # Panics
///
/// Panics if `i > j` or `j >= tour.len()`.
pub fn reversal_delta(model: &Model, tour: &[SlideIndex], i: usize, j: usize) -> i64 {
    assert!(
        i <= j && j < tour.len(),
        "called `reversal_delta` with invalid segment {}..={} for a tour of length {}",
        i,
        j,
        tour.len()
    );
    let (first, last) = (tour[i], tour[j]);
    let mut delta = 0;
    if i > 0 {
        let before = tour[i - 1];
        delta += score(model, before, last) - score(model, before, first);
    }
    if let Some(&after) = tour.get(j + 1) {
        delta += score(model, first, after) - score(model, last, after);
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
    use vernissage_model::score::total_score;

    fn model() -> Model {
        Model::from_tag_sets((0..12).map(|i| {
            vec![
                format!("a{}", i % 3),
                format!("b{}", i % 4),
                format!("c{}", i % 2),
                format!("d{}", i),
            ]
        }))
    }

    fn shuffled(model: &Model, seed: u64) -> Vec<SlideIndex> {
        let mut tour: Vec<SlideIndex> = model.slide_indices().collect();
        tour.shuffle(&mut StdRng::seed_from_u64(seed));
        tour
    }

    fn full(model: &Model, tour: &[SlideIndex]) -> i64 {
        total_score(model, tour) as i64
    }

    #[test]
    fn test_adjacent_swap_delta_matches_full_recompute() {
        let m = model();
        for seed in 0..5 {
            let tour = shuffled(&m, seed);
            for i in 0..tour.len() - 1 {
                let mut moved = tour.clone();
                moved.swap(i, i + 1);
                assert_eq!(
                    adjacent_swap_delta(&m, &tour, i),
                    full(&m, &moved) - full(&m, &tour),
                    "i = {}",
                    i
                );
            }
        }
    }

    #[test]
    fn test_swap_delta_matches_full_recompute() {
        let m = model();
        for seed in 0..3 {
            let tour = shuffled(&m, seed);
            for i in 0..tour.len() {
                for j in 0..tour.len() {
                    let mut moved = tour.clone();
                    moved.swap(i, j);
                    assert_eq!(
                        swap_delta(&m, &tour, i, j),
                        full(&m, &moved) - full(&m, &tour),
                        "i = {}, j = {}",
                        i,
                        j
                    );
                }
            }
        }
    }

    #[test]
    fn test_reversal_delta_matches_full_recompute() {
        let m = model();
        for seed in 0..3 {
            let tour = shuffled(&m, seed);
            for i in 0..tour.len() {
                for j in i..tour.len() {
                    let mut moved = tour.clone();
                    moved[i..=j].reverse();
                    assert_eq!(
                        reversal_delta(&m, &tour, i, j),
                        full(&m, &moved) - full(&m, &tour),
                        "i = {}, j = {}",
                        i,
                        j
                    );
                }
            }
        }
    }

    #[test]
    fn test_short_reversal_equals_adjacent_swap() {
        let m = model();
        let tour = shuffled(&m, 42);
        for i in 0..tour.len() - 1 {
            assert_eq!(
                reversal_delta(&m, &tour, i, i + 1),
                adjacent_swap_delta(&m, &tour, i)
            );
            assert_eq!(swap_delta(&m, &tour, i, i + 1), adjacent_swap_delta(&m, &tour, i));
        }
    }

    #[test]
    fn test_edge_score_out_of_range_is_zero() {
        let m = model();
        let tour = shuffled(&m, 1);
        assert_eq!(edge_score(&m, &tour, tour.len() - 1), 0);
        assert_eq!(edge_score(&m, &tour, usize::MAX), 0);
        assert_eq!(edge_score(&m, &tour, 0), i64::from(m.slide_score(tour[0], tour[1])));
    }

    #[test]
    fn test_swap_edges_are_deduplicated_and_clipped() {
        assert_eq!(swap_edges(0, 1, 5).as_slice(), &[0, 1]);
        assert_eq!(swap_edges(1, 4, 5).as_slice(), &[0, 1, 3]);
        assert_eq!(swap_edges(0, 1, 2).as_slice(), &[0]);
    }
}
