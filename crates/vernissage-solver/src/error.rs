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

use vernissage_construct::{error::ConstructionError, grouping::UnknownGroupKeyError};
use vernissage_ls::moves::MoveWeights;
use vernissage_model::{model::ModelError, pairing::UnknownPairingError};

/// Rejected solver configurations. Raised before any work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "unknown construction method '{name}' (expected random, nn, grouped, mixed, grouped-roundrobin or interleaved)"
    )]
    UnknownMethod { name: String },

    #[error(transparent)]
    UnknownGroupKey(#[from] UnknownGroupKeyError),

    #[error(transparent)]
    UnknownPairing(#[from] UnknownPairingError),

    #[error("max_run must be at least 1")]
    InvalidRunCap,

    #[error(
        "move weights must be finite, non-negative and not all zero, got {}/{}/{}",
        .weights.adjacent_swap,
        .weights.arbitrary_swap,
        .weights.segment_reversal
    )]
    InvalidMoveWeights { weights: MoveWeights },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid photo input: {0}")]
    Model(#[from] ModelError),

    #[error("construction failed: {0}")]
    Construction(#[from] ConstructionError),
}
