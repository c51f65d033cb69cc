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

//! Solver configuration.
//!
//! [`SolverConfig`] carries every knob of a run. It can be built in code
//! through [`SolverConfigBuilder`], or deserialized with `serde` from any
//! format the caller prefers; missing fields take their default value and
//! field names are kebab-case (`local-iters`, `group-key`, ...). Method and
//! group key names also parse with [`FromStr`].
//!
//! A configuration is checked by [`SolverConfig::validate`] before a solver
//! accepts it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vernissage_construct::{
    grouping::GroupKeyPolicy,
    heuristic::{
        mixed::DEFAULT_GROUP_SAMPLE_SIZE,
        nearest_neighbor::DEFAULT_SAMPLE_SIZE,
        round_robin::{
            DEFAULT_GROUP_PROBE, DEFAULT_MAX_RUN, DEFAULT_TAG_CANDIDATES, DEFAULT_TAG_PER_TAG,
        },
    },
};
use vernissage_ls::moves::{DEFAULT_MAX_REVERSAL_SPAN, MoveWeights};
use vernissage_model::pairing::PairingStrategy;

/// Which construction heuristic builds the initial tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionMethod {
    Random,
    #[serde(rename = "nn")]
    NearestNeighbor,
    Grouped,
    #[default]
    Mixed,
    #[serde(rename = "grouped-roundrobin")]
    GroupedRoundRobin,
    Interleaved,
}

impl ConstructionMethod {
    pub const ALL: [ConstructionMethod; 6] = [
        ConstructionMethod::Random,
        ConstructionMethod::NearestNeighbor,
        ConstructionMethod::Grouped,
        ConstructionMethod::Mixed,
        ConstructionMethod::GroupedRoundRobin,
        ConstructionMethod::Interleaved,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructionMethod::Random => "random",
            ConstructionMethod::NearestNeighbor => "nn",
            ConstructionMethod::Grouped => "grouped",
            ConstructionMethod::Mixed => "mixed",
            ConstructionMethod::GroupedRoundRobin => "grouped-roundrobin",
            ConstructionMethod::Interleaved => "interleaved",
        }
    }
}

impl std::fmt::Display for ConstructionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstructionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstructionMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMethod {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SolverConfig {
    /// Construction heuristic.
    pub method: ConstructionMethod,

    /// Candidates sampled per nearest-neighbor step.
    pub k: usize,

    /// Groups sampled per step when the mixed heuristic orders its groups.
    pub k_group: usize,

    /// Total candidates taken from the tag index per round-robin fallback.
    #[serde(alias = "tag-cands")]
    pub tag_candidates: usize,

    /// Candidates taken per tag in a round-robin fallback.
    pub tag_per_tag: usize,

    /// Queue entries scored per round-robin step.
    pub group_probe: usize,

    /// Longest run of consecutive slides from one group in round-robin.
    pub max_run: usize,

    pub group_key: GroupKeyPolicy,

    /// Local search iterations per restart. Zero keeps the constructed tour.
    pub local_iters: u64,

    /// Number of construct-then-improve rounds; the best tour wins.
    pub restarts: usize,

    /// Seed of the run's generator. `None` seeds from the operating system.
    pub seed: Option<u64>,

    pub move_weights: MoveWeights,

    pub max_reversal_span: usize,

    /// How vertical photos are paired when solving from photos.
    pub pairing: PairingStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: ConstructionMethod::default(),
            k: DEFAULT_SAMPLE_SIZE,
            k_group: DEFAULT_GROUP_SAMPLE_SIZE,
            tag_candidates: DEFAULT_TAG_CANDIDATES,
            tag_per_tag: DEFAULT_TAG_PER_TAG,
            group_probe: DEFAULT_GROUP_PROBE,
            max_run: DEFAULT_MAX_RUN,
            group_key: GroupKeyPolicy::default(),
            local_iters: 0,
            restarts: 1,
            seed: None,
            move_weights: MoveWeights::default(),
            max_reversal_span: DEFAULT_MAX_REVERSAL_SPAN,
            pairing: PairingStrategy::default(),
        }
    }
}

impl SolverConfig {
    #[inline]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::new()
    }

    /// Checks the settings that cannot be clamped to a sensible value.
    ///
    /// Sampling widths are clamped by the heuristics and never rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_run == 0 {
            return Err(ConfigError::InvalidRunCap);
        }
        if !self.move_weights.is_valid() {
            return Err(ConfigError::InvalidMoveWeights {
                weights: self.move_weights,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(method: {}, group_key: {}, k: {}, local_iters: {}, restarts: {}, seed: {})",
            self.method,
            self.group_key,
            self.k,
            self.local_iters,
            self.restarts,
            self.seed
                .map_or_else(|| "os".to_string(), |seed| seed.to_string())
        )
    }
}

/// Step-by-step construction of a [`SolverConfig`], validated on `build`.
#[derive(Debug, Clone, Default)]
pub struct SolverConfigBuilder {
    config: SolverConfig,
}

impl SolverConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_method(mut self, method: ConstructionMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Parses and sets the construction method.
    pub fn with_method_name(self, name: &str) -> Result<Self, ConfigError> {
        Ok(self.with_method(name.parse()?))
    }

    #[inline]
    pub fn with_k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    #[inline]
    pub fn with_k_group(mut self, k_group: usize) -> Self {
        self.config.k_group = k_group;
        self
    }

    #[inline]
    pub fn with_tag_candidates(mut self, limit: usize, per_tag: usize) -> Self {
        self.config.tag_candidates = limit;
        self.config.tag_per_tag = per_tag;
        self
    }

    #[inline]
    pub fn with_group_probe(mut self, group_probe: usize) -> Self {
        self.config.group_probe = group_probe;
        self
    }

    #[inline]
    pub fn with_max_run(mut self, max_run: usize) -> Self {
        self.config.max_run = max_run;
        self
    }

    #[inline]
    pub fn with_group_key(mut self, group_key: GroupKeyPolicy) -> Self {
        self.config.group_key = group_key;
        self
    }

    /// Parses and sets the group key policy.
    pub fn with_group_key_name(self, name: &str) -> Result<Self, ConfigError> {
        let policy: GroupKeyPolicy = name.parse()?;
        Ok(self.with_group_key(policy))
    }

    #[inline]
    pub fn with_local_iters(mut self, local_iters: u64) -> Self {
        self.config.local_iters = local_iters;
        self
    }

    #[inline]
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.config.restarts = restarts;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[inline]
    pub fn with_move_weights(mut self, weights: MoveWeights) -> Self {
        self.config.move_weights = weights;
        self
    }

    #[inline]
    pub fn with_max_reversal_span(mut self, span: usize) -> Self {
        self.config.max_reversal_span = span;
        self
    }

    #[inline]
    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.config.pairing = pairing;
        self
    }

    /// Parses and sets the vertical pairing strategy.
    pub fn with_pairing_name(self, name: &str) -> Result<Self, ConfigError> {
        let pairing: PairingStrategy = name.parse()?;
        Ok(self.with_pairing(pairing))
    }

    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vernissage_construct::grouping::UnknownGroupKeyError;
    use vernissage_model::pairing::UnknownPairingError;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.method, ConstructionMethod::Mixed);
        assert_eq!(config.k, 100);
        assert_eq!(config.k_group, 10);
        assert_eq!(config.tag_candidates, 64);
        assert_eq!(config.tag_per_tag, 16);
        assert_eq!(config.group_probe, 32);
        assert_eq!(config.max_run, 3);
        assert_eq!(config.group_key, GroupKeyPolicy::RepresentativeMin);
        assert_eq!(config.local_iters, 0);
        assert_eq!(config.restarts, 1);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_reversal_span, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_method_names_round_trip() {
        for method in ConstructionMethod::ALL {
            assert_eq!(method.as_str().parse::<ConstructionMethod>(), Ok(method));
        }
        assert_eq!(
            "greedy".parse::<ConstructionMethod>(),
            Err(ConfigError::UnknownMethod {
                name: "greedy".to_string()
            })
        );
    }

    #[test]
    fn test_builder_rejects_bad_settings() {
        assert_eq!(
            SolverConfig::builder().with_max_run(0).build(),
            Err(ConfigError::InvalidRunCap)
        );

        let weights = MoveWeights::new(0.0, 0.0, 0.0);
        assert_eq!(
            SolverConfig::builder().with_move_weights(weights).build(),
            Err(ConfigError::InvalidMoveWeights { weights })
        );

        assert_eq!(
            SolverConfig::builder().with_method_name("annealing").err(),
            Some(ConfigError::UnknownMethod {
                name: "annealing".to_string()
            })
        );
        assert_eq!(
            SolverConfig::builder().with_group_key_name("largest").err(),
            Some(ConfigError::UnknownGroupKey(UnknownGroupKeyError {
                name: "largest".to_string()
            }))
        );
        assert_eq!(
            SolverConfig::builder().with_pairing_name("closest").err(),
            Some(ConfigError::UnknownPairing(UnknownPairingError {
                name: "closest".to_string()
            }))
        );
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = SolverConfig::builder()
            .with_method_name("grouped-roundrobin")
            .and_then(|b| b.with_group_key_name("rarest"))
            .map(|b| {
                b.with_k(5)
                    .with_k_group(2)
                    .with_tag_candidates(8, 2)
                    .with_group_probe(4)
                    .with_max_run(2)
                    .with_local_iters(1_000)
                    .with_restarts(3)
                    .with_seed(9)
            })
            .and_then(|b| b.with_pairing_name("similar"))
            .and_then(SolverConfigBuilder::build)
            .unwrap();
        assert_eq!(config.method, ConstructionMethod::GroupedRoundRobin);
        assert_eq!(config.group_key, GroupKeyPolicy::Rarest);
        assert_eq!((config.tag_candidates, config.tag_per_tag), (8, 2));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.pairing, PairingStrategy::Similar);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{
            "method": "nn",
            "k": 20,
            "group-key": "min",
            "tag-cands": 12,
            "local-iters": 5000,
            "seed": 42,
            "move-weights": { "adjacent-swap": 1.0, "arbitrary-swap": 0.0, "segment-reversal": 1.0 }
        }"#;
        let config: SolverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.method, ConstructionMethod::NearestNeighbor);
        assert_eq!(config.k, 20);
        assert_eq!(config.group_key, GroupKeyPolicy::RepresentativeMin);
        assert_eq!(config.tag_candidates, 12);
        assert_eq!(config.local_iters, 5000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.move_weights, MoveWeights::new(1.0, 0.0, 1.0));
        // Everything else keeps its default.
        assert_eq!(config.max_run, 3);
        assert_eq!(config.restarts, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_unknown_method() {
        let result = serde_json::from_str::<SolverConfig>(r#"{ "method": "annealing" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_cli_names() {
        let config = SolverConfig::builder()
            .with_method(ConstructionMethod::GroupedRoundRobin)
            .with_group_key(GroupKeyPolicy::Rarest)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""method":"grouped-roundrobin""#));
        assert!(json.contains(r#""group-key":"rarest""#));
        assert!(json.contains(r#""local-iters":0"#));
    }
}
