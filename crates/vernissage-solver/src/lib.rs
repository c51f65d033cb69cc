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

//! # Vernissage Solver
//!
//! Ties the workspace together: a validated [`config::SolverConfig`] selects a
//! construction heuristic and a local search budget, and a [`solver::Solver`]
//! runs one or more seeded construct-then-improve rounds, keeping the best
//! tour.
//!
//! ```ignore
//! let config = SolverConfig::builder()
//!     .with_method(ConstructionMethod::GroupedRoundRobin)
//!     .with_local_iters(50_000)
//!     .with_seed(7)
//!     .build()?;
//! let outcome = Solver::new(config)?.solve(&model)?;
//! println!("score {}", outcome.score());
//! ```

pub mod config;
pub mod error;
pub mod solver;
