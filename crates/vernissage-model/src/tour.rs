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

//! The ordering of slides produced by the solvers.
//!
//! A `Tour` is a permutation of all slide indices of a model. Construction
//! heuristics produce one, the local search mutates it in place, and
//! [`Tour::validate`] checks that a tour really is a permutation before it is
//! handed to an output layer.

use crate::{index::SlideIndex, model::Model, score::total_score};
use fixedbitset::FixedBitSet;

/// The reasons a sequence of slide indices is not a valid tour of a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    #[error("tour has {found} slides but the model has {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("{slide} at position {position} is out of range for a model with {num_slides} slides")]
    OutOfRange {
        slide: SlideIndex,
        position: usize,
        num_slides: usize,
    },

    #[error("{slide} appears a second time at position {position}")]
    Duplicate { slide: SlideIndex, position: usize },
}

/// An ordering of slides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tour {
    slides: Vec<SlideIndex>,
}

impl Tour {
    #[inline]
    pub fn new(slides: Vec<SlideIndex>) -> Self {
        Self { slides }
    }

    /// The tour `0, 1, ..., len - 1`.
    #[inline]
    pub fn identity(len: usize) -> Self {
        Self {
            slides: (0..len).map(SlideIndex::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<SlideIndex> {
        self.slides.get(position).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[SlideIndex] {
        &self.slides
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [SlideIndex] {
        &mut self.slides
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SlideIndex> {
        self.slides.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<SlideIndex> {
        self.slides
    }

    /// The sum of interest scores along the tour.
    #[inline]
    pub fn total_score(&self, model: &Model) -> u64 {
        total_score(model, &self.slides)
    }

    /// Checks that the tour is a permutation of `0..model.num_slides()`.
    pub fn validate(&self, model: &Model) -> Result<(), TourError> {
        let num_slides = model.num_slides();
        if self.slides.len() != num_slides {
            return Err(TourError::LengthMismatch {
                expected: num_slides,
                found: self.slides.len(),
            });
        }

        let mut seen = FixedBitSet::with_capacity(num_slides);
        for (position, &slide) in self.slides.iter().enumerate() {
            let raw = slide.get();
            if raw >= num_slides {
                return Err(TourError::OutOfRange {
                    slide,
                    position,
                    num_slides,
                });
            }
            if seen.put(raw) {
                return Err(TourError::Duplicate { slide, position });
            }
        }
        Ok(())
    }

    /// `true` if the tour is a permutation of the model's slides.
    #[inline]
    pub fn is_valid(&self, model: &Model) -> bool {
        self.validate(model).is_ok()
    }
}

impl From<Vec<SlideIndex>> for Tour {
    #[inline]
    fn from(slides: Vec<SlideIndex>) -> Self {
        Self::new(slides)
    }
}

impl From<Tour> for Vec<SlideIndex> {
    #[inline]
    fn from(tour: Tour) -> Self {
        tour.slides
    }
}

impl AsRef<[SlideIndex]> for Tour {
    #[inline]
    fn as_ref(&self) -> &[SlideIndex] {
        &self.slides
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a SlideIndex;
    type IntoIter = std::slice::Iter<'a, SlideIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, slide) in self.slides.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slide.get())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(raw: &[usize]) -> Tour {
        Tour::new(raw.iter().copied().map(SlideIndex::new).collect())
    }

    fn model(n: usize) -> Model {
        Model::from_tag_sets((0..n).map(|i| vec![format!("t{}", i)]))
    }

    #[test]
    fn test_identity_is_valid() {
        let m = model(5);
        let t = Tour::identity(5);
        assert_eq!(t.len(), 5);
        assert!(t.is_valid(&m));
        assert_eq!(t.to_string(), "[0, 1, 2, 3, 4]");
    }

    #[test]
    fn test_length_mismatch() {
        let m = model(3);
        assert_eq!(
            tour(&[0, 1]).validate(&m),
            Err(TourError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        let m = model(3);
        assert_eq!(
            tour(&[0, 3, 1]).validate(&m),
            Err(TourError::OutOfRange {
                slide: SlideIndex::new(3),
                position: 1,
                num_slides: 3
            })
        );
    }

    #[test]
    fn test_duplicate() {
        let m = model(3);
        assert_eq!(
            tour(&[2, 0, 2]).validate(&m),
            Err(TourError::Duplicate {
                slide: SlideIndex::new(2),
                position: 2
            })
        );
    }

    #[test]
    fn test_empty_tour_of_empty_model_is_valid() {
        let m = Model::default();
        assert!(Tour::default().is_valid(&m));
        assert_eq!(Tour::default().total_score(&m), 0);
    }
}
