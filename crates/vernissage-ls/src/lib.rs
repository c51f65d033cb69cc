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

//! # Vernissage Local Search
//!
//! A randomized hill climber that improves an existing tour in place.
//!
//! Each iteration draws one of three move kinds by weight, evaluates only the
//! edges the move touches and applies the move only when it strictly increases
//! the total score. Work per iteration is constant, independent of the tour
//! length, which keeps budgets of many thousands of iterations cheap on large
//! instances.
//!
//! ## Modules
//!
//! - `moves`: Move kinds and the weighted move distribution.
//! - `eval`: Score deltas of the moves, computed from the affected edges only.
//! - `engine`: The `LocalSearchEngine` driving the iterations.
//! - `stats`: Per-run counters (proposals and acceptances per move kind, gain, time).
//! - `result`: The outcome of a run and its termination reason.
//! - `monitor`: Hooks for observing a run and requesting early termination.

pub mod engine;
pub mod eval;
pub mod monitor;
pub mod moves;
pub mod result;
pub mod stats;
