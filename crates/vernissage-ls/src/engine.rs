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

//! Iterative local search driver.
//!
//! The engine runs a fixed number of randomized trial moves on a tour. Every
//! iteration draws a move kind from the configured [`MoveWeights`], draws the
//! move's positions, computes its score delta from the affected edges (see
//! [`crate::eval`]) and applies the move only if the delta is strictly
//! positive. Rejected moves never touch the tour, so the tour is a valid
//! permutation after every iteration and the total score never decreases.
//!
//! Position sampling per kind, for a tour of length `n`:
//!
//! - adjacent swap: `i` uniform in `0..n - 1`, swap `i` and `i + 1`;
//! - arbitrary swap: two distinct positions uniform in `0..n`;
//! - segment reversal: `i` uniform in `0..n - 1`, `j` uniform in
//!   `i + 1..=min(n - 1, i + max_reversal_span)`.
//!
//! Tours with fewer than three slides are returned untouched: the only
//! possible move there reverses the whole tour and cannot change its score.
//! A budget of zero also returns immediately.
//!
//! Monitors are polled before every iteration and may end the run early.

use crate::{
    eval::{adjacent_swap_delta, reversal_delta, swap_delta},
    monitor::local_search_monitor::{LocalSearchMonitor, SearchCommand},
    moves::{DEFAULT_MAX_REVERSAL_SPAN, MoveKind, MoveWeights},
    result::{LocalSearchOutcome, LocalSearchTerminationReason},
    stats::LocalSearchStatistics,
};
use rand::Rng;
use std::time::Instant;
use vernissage_model::{index::SlideIndex, model::Model, tour::Tour};

/// Local search engine for slideshow tours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearchEngine {
    weights: MoveWeights,
    max_reversal_span: usize,
}

impl Default for LocalSearchEngine {
    #[inline]
    fn default() -> Self {
        Self::new(MoveWeights::default())
    }
}

impl LocalSearchEngine {
    #[inline]
    pub fn new(weights: MoveWeights) -> Self {
        Self {
            weights,
            max_reversal_span: DEFAULT_MAX_REVERSAL_SPAN,
        }
    }

    /// Bounds `j - i` of segment reversals. Values below 1 are treated as 1.
    #[inline]
    pub fn with_max_reversal_span(mut self, span: usize) -> Self {
        self.max_reversal_span = span.max(1);
        self
    }

    #[inline]
    pub fn weights(&self) -> &MoveWeights {
        &self.weights
    }

    #[inline]
    pub fn max_reversal_span(&self) -> usize {
        self.max_reversal_span
    }

    /// Improves `tour` in place for at most `iterations` iterations.
    ///
    /// `tour` must be a permutation of the slides of `model`; this is checked
    /// in debug builds only.
    pub fn run<R, M>(
        &self,
        model: &Model,
        tour: &mut Tour,
        iterations: u64,
        rng: &mut R,
        monitor: &mut M,
    ) -> LocalSearchOutcome
    where
        R: Rng + ?Sized,
        M: LocalSearchMonitor + ?Sized,
    {
        debug_assert!(
            tour.is_valid(model),
            "called `LocalSearchEngine::run` with a tour that is not a permutation of the model's {} slides",
            model.num_slides()
        );

        let n = tour.len();
        if n < 3 {
            return LocalSearchOutcome::unchanged(
                LocalSearchTerminationReason::TooShort,
                tour.total_score(model),
            );
        }
        if iterations == 0 {
            return LocalSearchOutcome::unchanged(
                LocalSearchTerminationReason::BudgetExhausted,
                tour.total_score(model),
            );
        }

        let start_time = Instant::now();
        let mut stats = LocalSearchStatistics::default();
        let initial_score = tour.total_score(model);
        monitor.on_start(tour, initial_score);

        let termination_reason = loop {
            if stats.iterations >= iterations {
                break LocalSearchTerminationReason::BudgetExhausted;
            }
            if let SearchCommand::Terminate(reason) = monitor.search_command(&stats) {
                break LocalSearchTerminationReason::Aborted(reason);
            }

            stats.on_iteration();
            let kind = self.weights.sample(rng);
            stats.on_proposed(kind);

            let gain = self.try_move(model, tour.as_mut_slice(), kind, rng);
            if gain > 0 {
                let gain = gain.unsigned_abs();
                stats.on_accepted(kind, gain);
                monitor.on_move_accepted(kind, gain, &stats);
            }

            monitor.on_iteration(&stats);
        };

        stats.set_total_time(start_time.elapsed());
        monitor.on_end(tour, &stats);

        let final_score = initial_score.saturating_add(stats.total_gain);
        debug_assert_eq!(
            final_score,
            tour.total_score(model),
            "called `LocalSearchEngine::run`: accumulated gains diverged from the tour score"
        );

        tracing::debug!(
            iterations = stats.iterations,
            accepted = stats.total_accepted(),
            initial_score,
            final_score,
            reason = %termination_reason,
            "local search finished"
        );

        LocalSearchOutcome::new(termination_reason, stats, initial_score, final_score)
    }

    /// Proposes one move of `kind` and applies it if it strictly improves the
    /// score. Returns the delta of the proposed move. `slides.len() >= 3`.
    fn try_move<R>(
        &self,
        model: &Model,
        slides: &mut [SlideIndex],
        kind: MoveKind,
        rng: &mut R,
    ) -> i64
    where
        R: Rng + ?Sized,
    {
        let n = slides.len();
        match kind {
            MoveKind::AdjacentSwap => {
                let i = rng.random_range(0..n - 1);
                let delta = adjacent_swap_delta(model, slides, i);
                if delta > 0 {
                    slides.swap(i, i + 1);
                }
                delta
            }
            MoveKind::ArbitrarySwap => {
                let a = rng.random_range(0..n);
                let mut b = rng.random_range(0..n - 1);
                if b >= a {
                    b += 1;
                }
                let (i, j) = if a < b { (a, b) } else { (b, a) };
                let delta = swap_delta(model, slides, i, j);
                if delta > 0 {
                    slides.swap(i, j);
                }
                delta
            }
            MoveKind::SegmentReversal => {
                let i = rng.random_range(0..n - 1);
                let last = (n - 1).min(i.saturating_add(self.max_reversal_span));
                let j = rng.random_range(i + 1..=last);
                let delta = reversal_delta(model, slides, i, j);
                if delta > 0 {
                    slides[i..=j].reverse();
                }
                delta
            }
        }
    }
}
