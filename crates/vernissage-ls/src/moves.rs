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

//! Move kinds and their sampling weights.

use rand::Rng;

/// Default upper bound on `j - i` for segment reversals.
pub const DEFAULT_MAX_REVERSAL_SPAN: usize = 2000;

/// The three moves the local search proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Swap the slides at positions `i` and `i + 1`.
    AdjacentSwap,
    /// Swap the slides at two distinct positions `i < j`.
    ArbitrarySwap,
    /// Reverse the segment `i..=j`.
    SegmentReversal,
}

impl MoveKind {
    pub const ALL: [MoveKind; 3] = [
        MoveKind::AdjacentSwap,
        MoveKind::ArbitrarySwap,
        MoveKind::SegmentReversal,
    ];

    /// Dense index of the kind, used by per-kind counters.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MoveKind::AdjacentSwap => 0,
            MoveKind::ArbitrarySwap => 1,
            MoveKind::SegmentReversal => 2,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::AdjacentSwap => "adjacent-swap",
            MoveKind::ArbitrarySwap => "arbitrary-swap",
            MoveKind::SegmentReversal => "segment-reversal",
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative weights of the move kinds.
///
/// Weights need not sum to one; a kind is drawn with probability
/// `weight / sum`. A kind with weight zero is never drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct MoveWeights {
    pub adjacent_swap: f64,
    pub arbitrary_swap: f64,
    pub segment_reversal: f64,
}

impl Default for MoveWeights {
    fn default() -> Self {
        Self {
            adjacent_swap: 0.6,
            arbitrary_swap: 0.3,
            segment_reversal: 0.1,
        }
    }
}

impl MoveWeights {
    #[inline]
    pub fn new(adjacent_swap: f64, arbitrary_swap: f64, segment_reversal: f64) -> Self {
        Self {
            adjacent_swap,
            arbitrary_swap,
            segment_reversal,
        }
    }

    /// Weights that only ever propose `kind`.
    pub fn only(kind: MoveKind) -> Self {
        let mut weights = Self::new(0.0, 0.0, 0.0);
        match kind {
            MoveKind::AdjacentSwap => weights.adjacent_swap = 1.0,
            MoveKind::ArbitrarySwap => weights.arbitrary_swap = 1.0,
            MoveKind::SegmentReversal => weights.segment_reversal = 1.0,
        }
        weights
    }

    #[inline]
    pub fn weight(&self, kind: MoveKind) -> f64 {
        match kind {
            MoveKind::AdjacentSwap => self.adjacent_swap,
            MoveKind::ArbitrarySwap => self.arbitrary_swap,
            MoveKind::SegmentReversal => self.segment_reversal,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.adjacent_swap + self.arbitrary_swap + self.segment_reversal
    }

    /// Every weight is finite and non-negative, and at least one is positive.
    pub fn is_valid(&self) -> bool {
        MoveKind::ALL.iter().all(|&kind| {
            let w = self.weight(kind);
            w.is_finite() && w >= 0.0
        }) && self.total() > 0.0
    }

    /// Draws a move kind.
    ///
    /// Invalid weights fall back to [`MoveKind::AdjacentSwap`].
    pub fn sample<R>(&self, rng: &mut R) -> MoveKind
    where
        R: Rng + ?Sized,
    {
        if !self.is_valid() {
            return MoveKind::AdjacentSwap;
        }
        let r = rng.random::<f64>() * self.total();
        if r < self.adjacent_swap {
            MoveKind::AdjacentSwap
        } else if r < self.adjacent_swap + self.arbitrary_swap || self.segment_reversal == 0.0 {
            MoveKind::ArbitrarySwap
        } else {
            MoveKind::SegmentReversal
        }
    }
}
