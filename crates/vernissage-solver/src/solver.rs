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

//! Construct-then-improve orchestration.
//!
//! A [`Solver`] owns a validated configuration. Each call to `solve` creates
//! one generator (seeded from the configuration, or from the operating system)
//! and threads it through every restart: construction, then local search.
//! Restarts run sequentially and the tour with the highest total score is
//! kept; on ties the earliest restart wins.

use crate::{
    config::{ConstructionMethod, SolverConfig},
    error::{ConfigError, SolverError},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::{Duration, Instant};
use vernissage_construct::{
    error::ConstructionError,
    heuristic::{
        ConstructionHeuristic, grouped::GroupedConstruction,
        interleaved::InterleavedConstruction, mixed::MixedConstruction,
        nearest_neighbor::NearestNeighborConstruction, random::RandomConstruction,
        round_robin::RoundRobinConstruction,
    },
};
use vernissage_ls::{
    engine::LocalSearchEngine,
    monitor::{local_search_monitor::LocalSearchMonitor, no_op::NoOpMonitor},
    stats::LocalSearchStatistics,
};
use vernissage_model::{model::Model, pairing::assemble_model, photo::Photo, tour::Tour};

/// The best tour of a solve together with its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    tour: Tour,
    score: u64,
    best_restart: usize,
    restarts: Vec<LocalSearchStatistics>,
    elapsed: Duration,
}

impl SolverOutcome {
    #[inline]
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    #[inline]
    pub fn into_tour(self) -> Tour {
        self.tour
    }

    /// Total score of [`Self::tour`].
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Index of the restart that produced the tour.
    #[inline]
    pub fn best_restart(&self) -> usize {
        self.best_restart
    }

    /// Local search statistics, one entry per restart.
    #[inline]
    pub fn restarts(&self) -> &[LocalSearchStatistics] {
        &self.restarts
    }

    /// Statistics of all restarts merged.
    pub fn total_statistics(&self) -> LocalSearchStatistics {
        let mut total = LocalSearchStatistics::default();
        for stats in &self.restarts {
            total.absorb(stats);
        }
        total
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverOutcome(score: {}, slides: {}, restarts: {}, best_restart: {}, elapsed: {:?})",
            self.score,
            self.tour.len(),
            self.restarts.len(),
            self.best_restart,
            self.elapsed
        )
    }
}

#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    engine: LocalSearchEngine,
}

impl Solver {
    /// Creates a solver, rejecting invalid configurations.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = LocalSearchEngine::new(config.move_weights)
            .with_max_reversal_span(config.max_reversal_span);
        Ok(Self { config, engine })
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves with a generator derived from the configured seed.
    pub fn solve(&self, model: &Model) -> Result<SolverOutcome, SolverError> {
        self.solve_with_monitor(model, &mut NoOpMonitor::new())
    }

    /// Like [`Self::solve`], reporting local search progress to `monitor`.
    pub fn solve_with_monitor<M>(
        &self,
        model: &Model,
        monitor: &mut M,
    ) -> Result<SolverOutcome, SolverError>
    where
        M: LocalSearchMonitor + ?Sized,
    {
        let mut rng = self.make_rng();
        self.solve_with_rng(model, &mut rng, monitor)
    }

    /// Pairs the vertical photos, builds the model and solves it.
    ///
    /// Pairing and solving share one generator, so a seeded configuration
    /// reproduces both.
    pub fn solve_photos(&self, photos: &[Photo]) -> Result<(Model, SolverOutcome), SolverError> {
        let mut rng = self.make_rng();
        let model = assemble_model(photos, self.config.pairing, &mut rng)?;
        tracing::debug!(
            photos = photos.len(),
            slides = model.num_slides(),
            tags = model.num_tags(),
            pairing = %self.config.pairing,
            "model assembled"
        );
        let outcome = self.solve_with_rng(&model, &mut rng, &mut NoOpMonitor::new())?;
        Ok((model, outcome))
    }

    /// Runs all restarts with an explicitly passed generator.
    pub fn solve_with_rng<R, M>(
        &self,
        model: &Model,
        rng: &mut R,
        monitor: &mut M,
    ) -> Result<SolverOutcome, SolverError>
    where
        R: Rng + ?Sized,
        M: LocalSearchMonitor + ?Sized,
    {
        let start_time = Instant::now();
        let num_restarts = self.config.restarts.max(1);
        let mut restarts = Vec::with_capacity(num_restarts);
        let mut best: Option<(Tour, u64, usize)> = None;

        for restart in 0..num_restarts {
            let mut tour = self.construct(model, rng)?;
            let outcome = self
                .engine
                .run(model, &mut tour, self.config.local_iters, rng, monitor);
            let score = outcome.final_score();

            tracing::debug!(
                restart,
                method = %self.config.method,
                construction_score = outcome.initial_score(),
                score,
                reason = %outcome.termination_reason(),
                "restart finished"
            );

            restarts.push(outcome.statistics().clone());
            if best.as_ref().is_none_or(|&(_, best_score, _)| score > best_score) {
                best = Some((tour, score, restart));
            }
        }

        let (tour, score, best_restart) = best.unwrap_or_else(|| (Tour::default(), 0, 0));
        let elapsed = start_time.elapsed();
        tracing::debug!(
            slides = tour.len(),
            score,
            best_restart,
            elapsed = ?elapsed,
            "solve finished"
        );

        Ok(SolverOutcome {
            tour,
            score,
            best_restart,
            restarts,
            elapsed,
        })
    }

    /// Builds one initial tour with the configured heuristic.
    pub fn construct<R>(&self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let c = &self.config;
        match c.method {
            ConstructionMethod::Random => RandomConstruction::new().construct(model, rng),
            ConstructionMethod::NearestNeighbor => {
                NearestNeighborConstruction::new(c.k).construct(model, rng)
            }
            ConstructionMethod::Grouped => GroupedConstruction::new(c.group_key).construct(model, rng),
            ConstructionMethod::Mixed => {
                MixedConstruction::new(c.group_key, c.k, c.k_group).construct(model, rng)
            }
            ConstructionMethod::GroupedRoundRobin => RoundRobinConstruction::new(c.group_key)
                .with_max_run(c.max_run)
                .with_group_probe(c.group_probe)
                .with_tag_candidates(c.tag_candidates, c.tag_per_tag)
                .construct(model, rng),
            ConstructionMethod::Interleaved => {
                InterleavedConstruction::new(c.group_key).construct(model, rng)
            }
        }
    }

    fn make_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vernissage_construct::grouping::GroupKeyPolicy;
    use vernissage_ls::moves::MoveWeights;
    use vernissage_model::pairing::PairingStrategy;

    fn topical_model(n: usize) -> Model {
        Model::from_tag_sets((0..n).map(|i| {
            vec![
                format!("topic{}", i % 5),
                format!("style{}", i % 7),
                format!("place{}", i % 4),
                format!("uid{}", i),
            ]
        }))
    }

    fn solver(method: ConstructionMethod, local_iters: u64, seed: u64) -> Solver {
        let config = SolverConfig::builder()
            .with_method(method)
            .with_local_iters(local_iters)
            .with_seed(seed)
            .build()
            .unwrap();
        Solver::new(config).unwrap()
    }

    #[test]
    fn test_every_method_yields_a_valid_tour() {
        let model = topical_model(120);
        for method in ConstructionMethod::ALL {
            for group_key in [
                GroupKeyPolicy::RepresentativeMin,
                GroupKeyPolicy::RepresentativeFirst,
                GroupKeyPolicy::Rarest,
            ] {
                let config = SolverConfig::builder()
                    .with_method(method)
                    .with_group_key(group_key)
                    .with_local_iters(500)
                    .with_seed(3)
                    .build()
                    .unwrap();
                let outcome = Solver::new(config).unwrap().solve(&model).unwrap();
                assert!(outcome.tour().is_valid(&model), "{} / {}", method, group_key);
                assert_eq!(outcome.score(), outcome.tour().total_score(&model));
            }
        }
    }

    #[test]
    fn test_same_seed_same_tour() {
        let model = topical_model(150);
        for method in ConstructionMethod::ALL {
            let a = solver(method, 2_000, 11).solve(&model).unwrap();
            let b = solver(method, 2_000, 11).solve(&model).unwrap();
            assert_eq!(a.tour(), b.tour(), "{}", method);
            assert_eq!(a.score(), b.score());
        }
    }

    #[test]
    fn test_local_search_never_lowers_construction_score() {
        let model = topical_model(200);
        let plain = solver(ConstructionMethod::Random, 0, 5).solve(&model).unwrap();
        let improved = solver(ConstructionMethod::Random, 20_000, 5)
            .solve(&model)
            .unwrap();
        // Same seed, so both start from the same random tour.
        assert!(improved.score() >= plain.score());
        assert_eq!(plain.total_statistics().iterations, 0);
        assert_eq!(improved.total_statistics().iterations, 20_000);
    }

    #[test]
    fn test_restarts_keep_the_best_tour() {
        let model = topical_model(100);
        let config = SolverConfig::builder()
            .with_method(ConstructionMethod::Random)
            .with_restarts(6)
            .with_local_iters(200)
            .with_seed(21)
            .build()
            .unwrap();
        let solver = Solver::new(config).unwrap();
        let outcome = solver.solve(&model).unwrap();
        assert_eq!(outcome.restarts().len(), 6);
        assert!(outcome.best_restart() < 6);
        assert!(outcome.tour().is_valid(&model));

        // Replaying the generator by hand reproduces every restart's score.
        let mut rng = StdRng::seed_from_u64(21);
        let mut scores = Vec::new();
        for _ in 0..6 {
            let mut tour = solver.construct(&model, &mut rng).unwrap();
            let result = LocalSearchEngine::default().run(
                &model,
                &mut tour,
                200,
                &mut rng,
                &mut NoOpMonitor::new(),
            );
            scores.push(result.final_score());
        }
        let best = scores.iter().copied().max().unwrap();
        assert_eq!(outcome.score(), best);
        assert_eq!(
            outcome.best_restart(),
            scores.iter().position(|&s| s == best).unwrap()
        );
    }

    #[test]
    fn test_zero_restarts_are_clamped_to_one() {
        let model = topical_model(20);
        let config = SolverConfig::builder().with_restarts(0).with_seed(1).build().unwrap();
        let outcome = Solver::new(config).unwrap().solve(&model).unwrap();
        assert_eq!(outcome.restarts().len(), 1);
        assert!(outcome.tour().is_valid(&model));
    }

    #[test]
    fn test_empty_model() {
        for method in ConstructionMethod::ALL {
            let outcome = solver(method, 100, 0).solve(&Model::default()).unwrap();
            assert!(outcome.tour().is_empty());
            assert_eq!(outcome.score(), 0);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_solving() {
        let config = SolverConfig {
            move_weights: MoveWeights::new(-1.0, 0.5, 0.5),
            ..SolverConfig::default()
        };
        assert!(matches!(
            Solver::new(config),
            Err(ConfigError::InvalidMoveWeights { .. })
        ));
    }

    #[test]
    fn test_solve_photos() {
        let photos = vec![
            Photo::horizontal(0, ["cat", "beach", "sun"]),
            Photo::vertical(1, ["selfie", "smile"]),
            Photo::vertical(2, ["garden", "selfie"]),
            Photo::horizontal(3, ["garden", "cat"]),
            Photo::vertical(4, ["sun"]),
        ];
        let config = SolverConfig::builder()
            .with_pairing(PairingStrategy::Different)
            .with_local_iters(1_000)
            .with_seed(4)
            .build()
            .unwrap();
        let (model, outcome) = Solver::new(config).unwrap().solve_photos(&photos).unwrap();
        // Two horizontal slides and one vertical pair; the odd vertical is dropped.
        assert_eq!(model.num_slides(), 3);
        assert!(outcome.tour().is_valid(&model));
        assert_eq!(outcome.score(), outcome.tour().total_score(&model));
    }

    #[test]
    fn test_solve_photos_loaded_from_json() {
        let json = r#"[
            { "id": 0, "orientation": "vertical", "tags": ["z", "a", "a"] },
            { "id": 1, "orientation": "vertical", "tags": ["a", "z"] },
            { "id": 2, "orientation": "vertical", "tags": ["q", "r"] },
            { "id": 3, "orientation": "vertical", "tags": ["s", "r", "q"] }
        ]"#;
        let photos: Vec<Photo> = serde_json::from_str(json).unwrap();
        let config = SolverConfig::builder()
            .with_pairing_name("similar")
            .and_then(|b| b.with_seed(2).build())
            .unwrap();
        let (model, outcome) = Solver::new(config).unwrap().solve_photos(&photos).unwrap();
        assert!(outcome.tour().is_valid(&model));

        let mut pairs: Vec<Vec<u64>> = model
            .slides()
            .iter()
            .map(|slide| {
                let mut ids = slide.photo_ids().to_vec();
                ids.sort_unstable();
                ids
            })
            .collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(model.num_tags(), 5);
    }

    #[test]
    fn test_reused_photo_is_reported() {
        let photos = vec![
            Photo::horizontal(7, ["a", "b"]),
            Photo::horizontal(7, ["c", "d"]),
        ];
        let config = SolverConfig::builder().with_seed(0).build().unwrap();
        let result = Solver::new(config).unwrap().solve_photos(&photos);
        assert!(matches!(result, Err(SolverError::Model(_))));
    }
}
