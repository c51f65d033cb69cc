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

use crate::{
    monitor::local_search_monitor::LocalSearchMonitor, moves::MoveKind,
    stats::LocalSearchStatistics,
};
use vernissage_model::tour::Tour;

/// A monitor that does nothing on any event and never terminates the search.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOpMonitor {
    _private: (),
}

impl NoOpMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl LocalSearchMonitor for NoOpMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    #[inline(always)]
    fn on_start(&mut self, _tour: &Tour, _score: u64) {}

    #[inline(always)]
    fn on_end(&mut self, _tour: &Tour, _statistics: &LocalSearchStatistics) {}

    #[inline(always)]
    fn on_iteration(&mut self, _statistics: &LocalSearchStatistics) {}

    #[inline(always)]
    fn on_move_accepted(
        &mut self,
        _kind: MoveKind,
        _gain: u64,
        _statistics: &LocalSearchStatistics,
    ) {
    }
}
