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

//! Periodic progress reporting through `tracing`.
//!
//! The clock is only read on iterations whose counter masked with
//! `clock_check_mask` is zero, and a line is emitted at most once per
//! `log_interval`. A summary is emitted when the run ends.

use crate::{
    monitor::local_search_monitor::LocalSearchMonitor, moves::MoveKind,
    stats::LocalSearchStatistics,
};
use std::time::{Duration, Instant};
use vernissage_model::tour::Tour;

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    initial_score: u64,
    current_score: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            initial_score: 0,
            current_score: 0,
        }
    }

    /// The score of the tour as tracked from accepted gains.
    #[inline]
    pub fn current_score(&self) -> u64 {
        self.current_score
    }

    fn log_line(&mut self, statistics: &LocalSearchStatistics) {
        let now = Instant::now();
        tracing::info!(
            elapsed_secs = now.duration_since(self.start_time).as_secs_f64(),
            iterations = statistics.iterations,
            score = self.current_score,
            accepted = statistics.total_accepted(),
            "local search progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl LocalSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, tour: &Tour, score: u64) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.initial_score = score;
        self.current_score = score;
        tracing::info!(slides = tour.len(), score, "local search started");
    }

    fn on_end(&mut self, _tour: &Tour, statistics: &LocalSearchStatistics) {
        tracing::info!(
            iterations = statistics.iterations,
            accepted = statistics.total_accepted(),
            initial_score = self.initial_score,
            final_score = self.current_score,
            elapsed = ?statistics.time_total,
            "local search finished"
        );
    }

    fn on_iteration(&mut self, statistics: &LocalSearchStatistics) {
        if (statistics.iterations & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }

    fn on_move_accepted(&mut self, _kind: MoveKind, gain: u64, _statistics: &LocalSearchStatistics) {
        self.current_score = self.current_score.saturating_add(gain);
    }
}
