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

//! Inverted tag index with monotone cursors.
//!
//! For every tag the index keeps the list of slides carrying it, shuffled once
//! at build time so that truncated scans are not biased towards low slide
//! identifiers, plus a cursor into that list.
//!
//! # Cursor semantics
//!
//! [`TagInvertedIndex::pick`] advances a tag's cursor over every entry it
//! inspects, including entries that turn out to be already used, and cursors
//! are never rewound. The total work over a whole construction run is
//! therefore bounded by the number of tag–slide memberships. The price is that
//! a still-unused slide that was inspected but not chosen is never offered
//! again through that tag.

use fixedbitset::FixedBitSet;
use rand::{Rng, seq::SliceRandom};
use vernissage_model::{
    index::{SlideIndex, TagIndex},
    model::Model,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagInvertedIndex {
    postings: Vec<Vec<SlideIndex>>,
    cursors: Vec<usize>,
}

impl TagInvertedIndex {
    /// Builds the index for all tags of `model`.
    pub fn build<R>(model: &Model, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut postings: Vec<Vec<SlideIndex>> = (0..model.num_tags())
            .map(|t| Vec::with_capacity(model.tag_frequency(TagIndex::new(t))))
            .collect();

        for slide in model.slide_indices() {
            for &tag in model.slide(slide).tags() {
                postings[tag.get()].push(slide);
            }
        }
        for list in &mut postings {
            list.shuffle(rng);
        }

        let cursors = vec![0; postings.len()];
        Self { postings, cursors }
    }

    #[inline]
    pub fn num_tags(&self) -> usize {
        self.postings.len()
    }

    /// The shuffled slide list of `tag`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not within `0..num_tags()`.
    #[inline]
    pub fn postings(&self, tag: TagIndex) -> &[SlideIndex] {
        &self.postings[tag.get()]
    }

    /// How far the cursor of `tag` has advanced into its list.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not within `0..num_tags()`.
    #[inline]
    pub fn cursor(&self, tag: TagIndex) -> usize {
        self.cursors[tag.get()]
    }

    /// Collects unused candidate slides sharing a tag with the query.
    ///
    /// Tags are visited in the order given; slide tag sets are ascending, which
    /// makes the visit order lexicographic. For each tag up to `per_tag` unused
    /// slides are collected, and the scan stops as soon as `limit` candidates
    /// are in `out`. `out` is cleared first. A slide carrying several query tags
    /// may be reported more than once.
    ///
    /// Returns the number of candidates collected.
    pub fn pick(
        &mut self,
        tags: &[TagIndex],
        used: &FixedBitSet,
        limit: usize,
        per_tag: usize,
        out: &mut Vec<SlideIndex>,
    ) -> usize {
        out.clear();
        if limit == 0 || per_tag == 0 {
            return 0;
        }

        for &tag in tags {
            let t = tag.get();
            let Some(list) = self.postings.get(t) else {
                continue;
            };
            let cursor = &mut self.cursors[t];
            let mut taken = 0;

            while *cursor < list.len() && taken < per_tag && out.len() < limit {
                let slide = list[*cursor];
                *cursor += 1;
                if !used.contains(slide.get()) {
                    out.push(slide);
                    taken += 1;
                }
            }

            if out.len() >= limit {
                break;
            }
        }
        out.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn model() -> Model {
        Model::from_tag_sets([
            vec!["a", "b"],
            vec!["a"],
            vec!["a", "c"],
            vec!["b", "c"],
            vec!["a"],
        ])
    }

    #[test]
    fn test_postings_cover_every_membership() {
        let m = model();
        let mut rng = StdRng::seed_from_u64(5);
        let index = TagInvertedIndex::build(&m, &mut rng);
        let a = m.find_tag("a").unwrap();
        let mut slides: Vec<usize> = index.postings(a).iter().map(|s| s.get()).collect();
        slides.sort_unstable();
        assert_eq!(slides, vec![0, 1, 2, 4]);
        assert_eq!(index.num_tags(), 3);
    }

    #[test]
    fn test_pick_skips_used_and_respects_limits() {
        let m = model();
        let mut rng = StdRng::seed_from_u64(5);
        let mut index = TagInvertedIndex::build(&m, &mut rng);
        let a = m.find_tag("a").unwrap();

        let mut used = FixedBitSet::with_capacity(m.num_slides());
        used.insert(1);
        let mut out = Vec::new();

        let n = index.pick(&[a], &used, 10, 2, &mut out);
        assert_eq!(n, 2);
        assert!(out.iter().all(|s| s.get() != 1));

        let n = index.pick(&[a], &used, 1, 5, &mut out);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_cursor_never_rewinds() {
        let m = model();
        let mut rng = StdRng::seed_from_u64(9);
        let mut index = TagInvertedIndex::build(&m, &mut rng);
        let a = m.find_tag("a").unwrap();
        let used = FixedBitSet::with_capacity(m.num_slides());
        let mut out = Vec::new();

        let mut total = 0;
        let mut last_cursor = 0;
        loop {
            let n = index.pick(&[a], &used, 1, 1, &mut out);
            assert!(index.cursor(a) >= last_cursor);
            last_cursor = index.cursor(a);
            if n == 0 {
                break;
            }
            total += n;
        }
        // Every slide with tag `a` is offered exactly once, then the list is exhausted.
        assert_eq!(total, 4);
        assert_eq!(index.cursor(a), 4);
    }

    #[test]
    fn test_zero_limits_are_clamped() {
        let m = model();
        let mut rng = StdRng::seed_from_u64(1);
        let mut index = TagInvertedIndex::build(&m, &mut rng);
        let used = FixedBitSet::with_capacity(m.num_slides());
        let mut out = vec![SlideIndex::new(0)];
        let tags = m.slide(SlideIndex::new(0)).tags().to_vec();
        assert_eq!(index.pick(&tags, &used, 0, 3, &mut out), 0);
        assert!(out.is_empty());
        assert_eq!(index.pick(&tags, &used, 3, 0, &mut out), 0);
        assert_eq!(index.cursor(tags[0]), 0);
    }

    #[test]
    fn test_empty_model() {
        let m = Model::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut index = TagInvertedIndex::build(&m, &mut rng);
        let used = FixedBitSet::new();
        let mut out = Vec::new();
        assert_eq!(index.pick(&[], &used, 4, 4, &mut out), 0);
    }
}
