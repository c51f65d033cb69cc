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

//! Construction heuristics.
//!
//! A construction heuristic turns a model into a complete tour: a permutation
//! of all slide indices. Heuristics differ in how much scoring work they spend
//! per placed slide:
//!
//! - `random`: no scoring at all.
//! - `grouped`: concatenation of topical groups, no scoring.
//! - `interleaved`: one slide from each group per round, no scoring.
//! - `nearest_neighbor`: `k` sampled candidates per step.
//! - `mixed`: nearest neighbor inside groups, then across group boundaries.
//! - `round_robin`: group queues with a run cap, probe windows and a tag-index
//!   fallback.
//!
//! All heuristics return an empty tour for an empty model.

pub mod grouped;
pub mod interleaved;
pub mod mixed;
pub mod nearest_neighbor;
pub mod random;
pub mod round_robin;

use crate::error::ConstructionError;
use rand::Rng;
use vernissage_model::{model::Model, tour::Tour};

/// Builds an initial tour for a model.
pub trait ConstructionHeuristic {
    /// Returns the name of the heuristic for logging and identification purposes.
    fn name(&self) -> &str;

    /// Constructs a tour visiting every slide of `model` exactly once.
    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized;
}
