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

//! Monitoring interface for local search runs.
//!
//! Monitors observe the start and end of a run, every iteration and every
//! accepted move. They can stop a run early by returning
//! [`SearchCommand::Terminate`] from `search_command`, which the engine polls
//! before each iteration. The default `search_command` continues, so a monitor
//! that only observes stays lightweight.

use crate::{moves::MoveKind, stats::LocalSearchStatistics};
use vernissage_model::tour::Tour;

/// What the engine should do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

pub trait LocalSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first iteration with the initial tour and its score.
    fn on_start(&mut self, tour: &Tour, score: u64);

    /// Called once after the last iteration with the final tour.
    fn on_end(&mut self, tour: &Tour, statistics: &LocalSearchStatistics);

    /// Called after every iteration, whether or not its move was accepted.
    fn on_iteration(&mut self, statistics: &LocalSearchStatistics);

    /// Called when a move was applied. `gain` is strictly positive.
    fn on_move_accepted(&mut self, kind: MoveKind, gain: u64, statistics: &LocalSearchStatistics);

    /// Determines whether the run continues.
    fn search_command(&mut self, _statistics: &LocalSearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn LocalSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn LocalSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor: {}", self.name())
    }
}
