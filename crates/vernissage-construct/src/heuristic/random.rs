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

//! Uniformly random construction.

use crate::{error::ConstructionError, heuristic::ConstructionHeuristic};
use rand::{Rng, seq::SliceRandom};
use vernissage_model::{model::Model, tour::Tour};

/// Shuffles all slide identifiers. A baseline without any scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomConstruction;

impl RandomConstruction {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl ConstructionHeuristic for RandomConstruction {
    fn name(&self) -> &str {
        "RandomConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let mut tour = Tour::identity(model.num_slides());
        tour.as_mut_slice().shuffle(rng);
        Ok(tour)
    }
}
