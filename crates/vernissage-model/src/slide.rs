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

//! Slides: one horizontal photo or a pair of vertical photos.

use crate::{index::TagIndex, score::interest_score};
use smallvec::SmallVec;

/// Inline storage for a slide's interned tags. Most slides carry a handful of
/// tags, so the common case never touches the heap.
pub type TagSet = SmallVec<[TagIndex; 16]>;

/// The photos shown on a slide.
///
/// The arity is part of the type: a horizontal slide holds exactly one photo id,
/// a vertical slide exactly two. The order of the vertical pair does not affect
/// scoring but is preserved for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Horizontal(u64),
    Vertical(u64, u64),
}

impl SlideKind {
    /// Returns the photo ids in output order.
    #[inline]
    pub fn photo_ids(&self) -> SmallVec<[u64; 2]> {
        match *self {
            SlideKind::Horizontal(id) => smallvec::smallvec![id],
            SlideKind::Vertical(first, second) => smallvec::smallvec![first, second],
        }
    }

    #[inline]
    pub fn num_photos(&self) -> usize {
        match self {
            SlideKind::Horizontal(_) => 1,
            SlideKind::Vertical(_, _) => 2,
        }
    }
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideKind::Horizontal(id) => write!(f, "{}", id),
            SlideKind::Vertical(first, second) => write!(f, "{} {}", first, second),
        }
    }
}

/// A slide of the slideshow together with its interned, sorted tag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slide {
    kind: SlideKind,
    tags: TagSet,
}

impl Slide {
    /// Creates a slide from a kind and a tag set.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `tags` is not strictly ascending.
    #[inline]
    pub fn new(kind: SlideKind, tags: TagSet) -> Self {
        debug_assert!(
            tags.windows(2).all(|w| w[0] < w[1]),
            "called `Slide::new` with tags that are not strictly ascending: {:?}",
            tags
        );
        Self { kind, tags }
    }

    #[inline]
    pub fn kind(&self) -> SlideKind {
        self.kind
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self.kind, SlideKind::Horizontal(_))
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self.kind, SlideKind::Vertical(_, _))
    }

    /// The photo ids shown on this slide, in output order.
    #[inline]
    pub fn photo_ids(&self) -> SmallVec<[u64; 2]> {
        self.kind.photo_ids()
    }

    /// The sorted tag set of this slide.
    #[inline]
    pub fn tags(&self) -> &[TagIndex] {
        &self.tags
    }

    #[inline]
    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    /// The interest score of the transition from `self` to `other`.
    #[inline]
    pub fn score(&self, other: &Slide) -> u32 {
        interest_score(&self.tags, &other.tags)
    }
}
