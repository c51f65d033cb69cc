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

//! # Vernissage Model
//!
//! **The domain model for slideshow ordering.**
//!
//! A slideshow is a sequence of slides, each showing either one horizontal
//! photo or a pair of vertical photos. Consecutive slides are rewarded by the
//! interest score of their tag sets, and the goal of the solver crates is to
//! find an ordering with a large total score.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed wrappers (`SlideIndex`, `TagIndex`) so slide positions and
//!   interned tags cannot be mixed up.
//! * **`photo`**: Input photo records with orientation and tags.
//! * **`slide`**: The `Slide` variant type (one horizontal photo or two vertical photos).
//! * **`model`**: The immutable `Model` and the `ModelBuilder` that validates photo usage and
//!   interns tags.
//! * **`score`**: The interest score and the total-score evaluator.
//! * **`tour`**: The ordering (`Tour`) and its validation.
//! * **`pairing`**: Strategies that turn loose vertical photos into two-photo slides.
//!
//! ## Design Philosophy
//!
//! 1.  **Reference by index**: Every downstream structure refers to slides by `SlideIndex`,
//!     never by value, so tag sets are never copied in the hot loops.
//! 2.  **Interned tags**: Tags are interned once, in lexicographic order, so tag sets become
//!     sorted integer slices and scoring is a single allocation-free merge.
//! 3.  **Fail-Fast**: The builder rejects reused photos and wrong orientations eagerly, so the
//!     solvers never see an invalid slide list.

pub mod index;
pub mod model;
pub mod pairing;
pub mod photo;
pub mod score;
pub mod slide;
pub mod tour;
