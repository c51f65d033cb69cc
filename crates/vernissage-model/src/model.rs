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

//! The immutable slideshow model and its builder.
//!
//! The `Model` is the read-only input of every solver component: a fixed list
//! of slides, addressed by `SlideIndex`, whose tags are interned into
//! `TagIndex` values. Interning happens once in [`ModelBuilder::build`], where
//! the distinct tag names are sorted lexicographically before ids are handed
//! out. As a consequence:
//!
//! - every slide stores its tags as a strictly ascending slice of ids,
//! - `TagIndex` ordering coincides with lexicographic ordering of tag names, so
//!   "the smallest tag of a slide" is simply its first tag id,
//! - per-tag slide frequencies can be kept in a flat vector.
//!
//! The builder is the single place that enforces the photo invariants: a
//! horizontal slide wraps one horizontal photo, a vertical slide wraps two
//! distinct vertical photos, and no photo id is used twice.

use crate::{
    index::{SlideIndex, TagIndex},
    photo::{Orientation, Photo},
    slide::{Slide, SlideKind, TagSet},
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Errors raised while assembling a model from photos.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The photo id was already used by another slide.
    #[error("photo {photo_id} is used by more than one slide")]
    DuplicatePhoto { photo_id: u64 },

    /// The photo does not have the orientation the slide kind requires.
    #[error("photo {photo_id} is {found} but a {expected} photo was required")]
    OrientationMismatch {
        photo_id: u64,
        expected: Orientation,
        found: Orientation,
    },

    /// A vertical slide was requested with the same photo twice.
    #[error("vertical slide pairs photo {photo_id} with itself")]
    IdenticalPair { photo_id: u64 },
}

/// The immutable slideshow instance consumed by the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    slides: Vec<Slide>,
    tag_names: Vec<String>,
    tag_frequencies: Vec<usize>,
}

impl Model {
    /// Builds a model of horizontal slides from raw tag sets.
    ///
    /// Slide `i` wraps the horizontal photo with id `i`. Mostly useful for tests,
    /// benchmarks and callers that already paired their photos.
    pub fn from_tag_sets<I, J, S>(tag_sets: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = ModelBuilder::new();
        for (id, tags) in tag_sets.into_iter().enumerate() {
            builder.push_unchecked(SlideKind::Horizontal(id as u64), tags);
        }
        builder.build()
    }

    #[inline]
    pub fn num_slides(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn num_tags(&self) -> usize {
        self.tag_names.len()
    }

    #[inline]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Returns the slide at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not within `0..num_slides()`.
    #[inline]
    pub fn slide(&self, index: SlideIndex) -> &Slide {
        let i = index.get();
        assert!(
            i < self.slides.len(),
            "called `Model::slide` with index out of bounds: the len is {} but the index is {}",
            self.slides.len(),
            i
        );
        &self.slides[i]
    }

    /// Iterates over all slide indices in ascending order.
    #[inline]
    pub fn slide_indices(&self) -> impl ExactSizeIterator<Item = SlideIndex> + use<> {
        (0..self.slides.len()).map(SlideIndex::new)
    }

    /// The interest score between two slides.
    #[inline]
    pub fn slide_score(&self, a: SlideIndex, b: SlideIndex) -> u32 {
        self.slide(a).score(self.slide(b))
    }

    /// The name of an interned tag.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not within `0..num_tags()`.
    #[inline]
    pub fn tag_name(&self, tag: TagIndex) -> &str {
        &self.tag_names[tag.get()]
    }

    /// Number of slides that carry `tag`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not within `0..num_tags()`.
    #[inline]
    pub fn tag_frequency(&self, tag: TagIndex) -> usize {
        self.tag_frequencies[tag.get()]
    }

    /// Looks up the interned index of a tag name.
    #[inline]
    pub fn find_tag(&self, name: &str) -> Option<TagIndex> {
        self.tag_names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
            .map(TagIndex::new)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vertical = self.slides.iter().filter(|s| s.is_vertical()).count();
        write!(
            f,
            "Model(slides: {}, horizontal: {}, vertical: {}, tags: {})",
            self.slides.len(),
            self.slides.len() - vertical,
            vertical,
            self.tag_names.len()
        )
    }
}

#[derive(Debug, Clone)]
struct PendingSlide {
    kind: SlideKind,
    tags: Vec<String>,
}

/// Collects slides with string tags and validates photo usage.
///
/// Slide identifiers are handed out in insertion order and remain valid in the
/// built [`Model`].
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    pending: Vec<PendingSlide>,
    used_photos: FxHashSet<u64>,
}

impl ModelBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with room for `num_slides` slides.
    #[inline]
    pub fn preallocated(num_slides: usize) -> Self {
        Self {
            pending: Vec::with_capacity(num_slides),
            used_photos: FxHashSet::with_capacity_and_hasher(num_slides * 2, Default::default()),
        }
    }

    #[inline]
    pub fn num_slides(&self) -> usize {
        self.pending.len()
    }

    /// Adds a slide showing a single horizontal photo.
    pub fn add_horizontal(&mut self, photo: &Photo) -> Result<SlideIndex, ModelError> {
        Self::expect_orientation(photo, Orientation::Horizontal)?;
        if self.used_photos.contains(&photo.id()) {
            return Err(ModelError::DuplicatePhoto {
                photo_id: photo.id(),
            });
        }
        self.used_photos.insert(photo.id());
        Ok(self.push_unchecked(
            SlideKind::Horizontal(photo.id()),
            photo.tags().iter().cloned(),
        ))
    }

    /// Adds a slide showing two vertical photos. The slide's tags are the union
    /// of both photos' tags.
    pub fn add_vertical(&mut self, first: &Photo, second: &Photo) -> Result<SlideIndex, ModelError> {
        Self::expect_orientation(first, Orientation::Vertical)?;
        Self::expect_orientation(second, Orientation::Vertical)?;
        if first.id() == second.id() {
            return Err(ModelError::IdenticalPair {
                photo_id: first.id(),
            });
        }
        for id in [first.id(), second.id()] {
            if self.used_photos.contains(&id) {
                return Err(ModelError::DuplicatePhoto { photo_id: id });
            }
        }
        self.used_photos.insert(first.id());
        self.used_photos.insert(second.id());

        let tags = first.tags().iter().chain(second.tags()).cloned();
        Ok(self.push_unchecked(SlideKind::Vertical(first.id(), second.id()), tags))
    }

    fn expect_orientation(photo: &Photo, expected: Orientation) -> Result<(), ModelError> {
        if photo.orientation() == expected {
            Ok(())
        } else {
            Err(ModelError::OrientationMismatch {
                photo_id: photo.id(),
                expected,
                found: photo.orientation(),
            })
        }
    }

    fn push_unchecked<I, S>(&mut self, kind: SlideKind, tags: I) -> SlideIndex
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = SlideIndex::new(self.pending.len());
        self.pending.push(PendingSlide {
            kind,
            tags: tags.into_iter().map(Into::into).collect(),
        });
        index
    }

    /// Interns all tags and freezes the slide list.
    pub fn build(self) -> Model {
        let mut tag_names: Vec<String> = self
            .pending
            .iter()
            .flat_map(|slide| slide.tags.iter().cloned())
            .collect();
        tag_names.sort_unstable();
        tag_names.dedup();

        let mut tag_frequencies = vec![0usize; tag_names.len()];
        let slides: Vec<Slide> = {
            let lookup: FxHashMap<&str, TagIndex> = tag_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.as_str(), TagIndex::new(i)))
                .collect();

            self.pending
                .iter()
                .map(|pending| {
                    let mut tags: TagSet =
                        pending.tags.iter().map(|t| lookup[t.as_str()]).collect();
                    tags.sort_unstable();
                    tags.dedup();
                    for tag in &tags {
                        tag_frequencies[tag.get()] += 1;
                    }
                    Slide::new(pending.kind, tags)
                })
                .collect()
        };

        Model {
            slides,
            tag_names,
            tag_frequencies,
        }
    }
}
