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

//! Counters collected during a local search run.
//!
//! Updates use saturating arithmetic so that very long runs never trap on
//! overflow. The per-kind counters are indexed by [`MoveKind::index`].

use crate::moves::MoveKind;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalSearchStatistics {
    /// Number of iterations performed.
    pub iterations: u64,

    /// Proposed moves per kind.
    pub proposed: [u64; 3],

    /// Accepted (strictly improving) moves per kind.
    pub accepted: [u64; 3],

    /// Sum of the score gains of all accepted moves.
    pub total_gain: u64,

    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl LocalSearchStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_proposed(&mut self, kind: MoveKind) {
        let slot = &mut self.proposed[kind.index()];
        *slot = slot.saturating_add(1);
    }

    #[inline]
    pub fn on_accepted(&mut self, kind: MoveKind, gain: u64) {
        let slot = &mut self.accepted[kind.index()];
        *slot = slot.saturating_add(1);
        self.total_gain = self.total_gain.saturating_add(gain);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn proposed_moves(&self, kind: MoveKind) -> u64 {
        self.proposed[kind.index()]
    }

    #[inline]
    pub fn accepted_moves(&self, kind: MoveKind) -> u64 {
        self.accepted[kind.index()]
    }

    pub fn total_accepted(&self) -> u64 {
        self.accepted.iter().fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    pub fn total_rejected(&self) -> u64 {
        self.proposed
            .iter()
            .fold(0u64, |acc, &n| acc.saturating_add(n))
            .saturating_sub(self.total_accepted())
    }

    /// Merges the counters of another run into this one.
    pub fn absorb(&mut self, other: &LocalSearchStatistics) {
        self.iterations = self.iterations.saturating_add(other.iterations);
        for kind in MoveKind::ALL {
            let k = kind.index();
            self.proposed[k] = self.proposed[k].saturating_add(other.proposed[k]);
            self.accepted[k] = self.accepted[k].saturating_add(other.accepted[k]);
        }
        self.total_gain = self.total_gain.saturating_add(other.total_gain);
        self.time_total = self.time_total.saturating_add(other.time_total);
    }
}

impl std::fmt::Display for LocalSearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vernissage-LS Statistics:")?;
        writeln!(f, "   Iterations:          {}", self.iterations)?;
        for kind in MoveKind::ALL {
            writeln!(
                f,
                "   {:<20} {} / {}",
                format!("{}:", kind),
                self.accepted_moves(kind),
                self.proposed_moves(kind)
            )?;
        }
        writeln!(f, "   Rejected Moves:      {}", self.total_rejected())?;
        writeln!(f, "   Total Gain:          {}", self.total_gain)?;
        writeln!(f, "   Total Time:          {:?}", self.time_total)?;
        Ok(())
    }
}
