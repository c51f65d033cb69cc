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

//! Outcome of a local search run.
//!
//! The engine never fails; a run always ends with the tour in a valid state
//! and an outcome naming why it stopped, together with the run statistics and
//! the score before and after.

use crate::stats::LocalSearchStatistics;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalSearchTerminationReason {
    /// The iteration budget was used up.
    BudgetExhausted,

    /// The tour has fewer than three slides; no move can change its score.
    TooShort,

    /// A monitor requested termination. The string carries its reason.
    Aborted(String),
}

impl std::fmt::Display for LocalSearchTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearchTerminationReason::BudgetExhausted => write!(f, "Iteration Budget Exhausted"),
            LocalSearchTerminationReason::TooShort => write!(f, "Tour Too Short"),
            LocalSearchTerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    termination_reason: LocalSearchTerminationReason,
    statistics: LocalSearchStatistics,
    initial_score: u64,
    final_score: u64,
}

impl LocalSearchOutcome {
    #[inline]
    pub fn new(
        termination_reason: LocalSearchTerminationReason,
        statistics: LocalSearchStatistics,
        initial_score: u64,
        final_score: u64,
    ) -> Self {
        Self {
            termination_reason,
            statistics,
            initial_score,
            final_score,
        }
    }

    /// An outcome for a tour that was returned untouched.
    #[inline]
    pub fn unchanged(
        termination_reason: LocalSearchTerminationReason,
        score: u64,
    ) -> Self {
        Self::new(
            termination_reason,
            LocalSearchStatistics::default(),
            score,
            score,
        )
    }

    #[inline]
    pub fn termination_reason(&self) -> &LocalSearchTerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &LocalSearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn initial_score(&self) -> u64 {
        self.initial_score
    }

    #[inline]
    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    #[inline]
    pub fn improvement(&self) -> u64 {
        self.final_score.saturating_sub(self.initial_score)
    }
}

impl std::fmt::Display for LocalSearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        writeln!(
            f,
            "Score: {} -> {} (+{})",
            self.initial_score,
            self.final_score,
            self.improvement()
        )?;
        write!(f, "{}", self.statistics)
    }
}
