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

//! # Vernissage Construct
//!
//! Construction heuristics that turn a [`vernissage_model::model::Model`] into
//! an initial tour without paying the full `O(n²)` cost of scoring every pair
//! of slides.
//!
//! ## Modules
//!
//! - `tag_index`: Inverted index from tag to slides with monotone cursors, used
//!   as a cheap candidate picker.
//! - `grouping`: Partition of slides by a representative tag (smallest, random
//!   or globally rarest).
//! - `heuristic`: The `ConstructionHeuristic` trait and its implementations
//!   (random, sampled nearest neighbor, grouped, mixed, round-robin with run
//!   cap, interleaved).
//! - `error`: The construction error type.
//!
//! Every heuristic takes an explicitly passed random generator, so a fixed seed
//! reproduces the same tour.

pub mod error;
pub mod grouping;
pub mod heuristic;
pub mod tag_index;
