//! Run controller: owns the colony state between runs.
//!
//! # Algorithm
//!
//! For each of `num_ants` ants, in order:
//!
//! 1. Build a tour against the current trails
//! 2. Measure its cyclic length
//! 3. Evaporate the whole matrix, then deposit along the tour
//! 4. Replace the best tour if the new one is strictly shorter
//!
//! Every ant sees the trails left by all previous ants of the same run.
//! Steps 3 and 4 only happen once the tour is known to be valid, so a failing
//! ant leaves the matrix and the best result untouched.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ant::construct_tour;
use super::config::AcoConfig;
use super::error::{AcoError, AcoResult};
use super::pheromone::PheromoneMatrix;
use super::types::{AntEvent, AntObserver, BestResult, RunSummary};
use super::world::{City, World};

/// Stateful ant colony over a fixed world.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AcoEngine};
///
/// let config = AcoConfig::default().with_num_ants(10).with_seed(42);
/// let mut engine = AcoEngine::with_default_cities(config).unwrap();
/// assert!(engine.best_tour().is_none());
///
/// let summary = engine.run().unwrap();
/// assert_eq!(summary.ants, 10);
/// assert!(engine.best_distance().is_finite());
/// assert_eq!(engine.best_tour().map(|t| t.len()), Some(12));
/// ```
pub struct AcoEngine<R = StdRng> {
    world: World,
    config: AcoConfig,
    pheromones: PheromoneMatrix,
    best: BestResult,
    ants_simulated: usize,
    rng: R,
    observer: Option<Box<dyn AntObserver>>,
}

impl AcoEngine<StdRng> {
    /// Creates an engine seeded from `config.seed`, or randomly when unset.
    pub fn new(world: World, config: AcoConfig) -> AcoResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(world, config, StdRng::seed_from_u64(seed))
    }

    /// Creates an engine over [`World::default`].
    pub fn with_default_cities(config: AcoConfig) -> AcoResult<Self> {
        Self::new(World::default(), config)
    }

    /// Restarts the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
    }
}

impl<R: Rng> AcoEngine<R> {
    /// Creates an engine drawing from an explicit random generator.
    ///
    /// `config.seed` is ignored in favor of `rng`.
    pub fn with_rng(world: World, config: AcoConfig, rng: R) -> AcoResult<Self> {
        config.validate()?;
        let pheromones = PheromoneMatrix::new(world.len());
        Ok(Self {
            world,
            config,
            pheromones,
            best: BestResult::empty(),
            ants_simulated: 0,
            rng,
            observer: None,
        })
    }

    /// Replaces the colony parameters, keeping the seed.
    ///
    /// Takes effect on the next [`run`](Self::run). On error the current
    /// parameters stay in place.
    pub fn set_parameters(
        &mut self,
        num_ants: usize,
        evaporation_rate: f64,
        alpha: f64,
        beta: f64,
    ) -> AcoResult<()> {
        let config = AcoConfig {
            num_ants,
            evaporation_rate,
            alpha,
            beta,
            seed: self.config.seed,
        };
        self.set_config(config)
    }

    /// Replaces the whole configuration after validating it.
    ///
    /// The random stream is not reseeded; see [`AcoEngine::reseed`].
    pub fn set_config(&mut self, config: AcoConfig) -> AcoResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Installs an observer notified after every ant and every run.
    pub fn set_observer(&mut self, observer: Box<dyn AntObserver>) {
        self.observer = Some(observer);
    }

    /// Removes the observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Simulates `num_ants` ants one after another.
    ///
    /// # Errors
    ///
    /// - [`AcoError::EmptyWorld`] with fewer than two cities
    /// - [`AcoError::DegenerateGeometry`] when a zero-length edge is met
    /// - [`AcoError::NumericalInstability`] when weights or lengths stop
    ///   being finite
    ///
    /// Ants that completed before the failure keep their updates.
    pub fn run(&mut self) -> AcoResult<RunSummary> {
        let n = self.world.len();
        if n < 2 {
            return Err(AcoError::EmptyWorld { cities: n });
        }

        let AcoConfig {
            num_ants,
            evaporation_rate,
            alpha,
            beta,
            ..
        } = self.config;

        tracing::debug!(
            num_ants,
            evaporation_rate,
            alpha,
            beta,
            cities = n,
            "starting colony run"
        );

        let mut improvements = 0usize;
        let mut cost_history = Vec::new();

        for ant in 0..num_ants {
            let tour = construct_tour(&self.world, &self.pheromones, alpha, beta, &mut self.rng)?;
            let distance = self.world.tour_length(&tour);

            self.pheromones.update(&tour, distance, evaporation_rate)?;
            self.ants_simulated += 1;

            let improved = self.best.offer(&tour, distance);
            if improved {
                improvements += 1;
                tracing::debug!(ant, distance, "new best tour");
            }
            cost_history.push(self.best.distance);

            if let Some(observer) = self.observer.as_mut() {
                observer.on_ant(&AntEvent {
                    ant,
                    tour: &tour,
                    distance,
                    improved,
                    best_distance: self.best.distance,
                });
            }
        }

        let summary = RunSummary {
            ants: num_ants,
            improvements,
            best_distance: self.best.distance,
            cost_history,
        };

        tracing::debug!(
            improvements,
            best_distance = summary.best_distance,
            "colony run finished"
        );

        if let Some(observer) = self.observer.as_mut() {
            observer.on_run(&summary);
        }

        Ok(summary)
    }

    /// Forgets the best tour and restores every trail to its initial value.
    ///
    /// Cities and parameters are kept.
    pub fn reset(&mut self) {
        self.best = BestResult::empty();
        self.pheromones.reset();
        self.ants_simulated = 0;
    }

    /// The cities, in load order.
    pub fn cities(&self) -> &[City] {
        self.world.cities()
    }

    /// The world the colony runs on.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current parameters.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Current trail strengths.
    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// Best result since the last reset.
    pub fn best(&self) -> &BestResult {
        &self.best
    }

    /// Best tour since the last reset, or `None` if no ant has finished one.
    pub fn best_tour(&self) -> Option<&[usize]> {
        self.best.tour.as_deref()
    }

    /// Length of the best tour, `+∞` when there is none.
    pub fn best_distance(&self) -> f64 {
        self.best.distance
    }

    /// Ants simulated since the last reset.
    pub fn ants_simulated(&self) -> usize {
        self.ants_simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::pheromone::INITIAL_TRAIL;
    use crate::aco::types::TracingObserver;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn triangle() -> World {
        World::from_coordinates(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)])
    }

    fn seeded(world: World, num_ants: usize) -> AcoEngine {
        let config = AcoConfig::default().with_num_ants(num_ants).with_seed(42);
        AcoEngine::new(world, config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AcoConfig::default().with_evaporation_rate(1.0);
        assert!(matches!(
            AcoEngine::new(World::default(), config),
            Err(AcoError::Config { .. })
        ));
    }

    #[test]
    fn test_set_parameters_validates() {
        let mut engine = seeded(World::default(), 5);
        let before = engine.config().clone();

        assert!(engine.set_parameters(0, 0.5, 1.0, 2.0).is_err());
        assert!(engine.set_parameters(10, 1.0, 1.0, 2.0).is_err());
        assert!(engine.set_parameters(10, 0.5, -1.0, 2.0).is_err());
        assert!(engine.set_parameters(10, 0.5, 1.0, -2.0).is_err());
        assert_eq!(engine.config(), &before);

        engine.set_parameters(7, 0.1, 0.5, 3.0).unwrap();
        assert_eq!(engine.config().num_ants, 7);
        assert_eq!(engine.config().seed, Some(42));
    }

    #[test]
    fn test_parameters_apply_to_next_run() {
        let mut engine = seeded(World::default(), 5);
        assert_eq!(engine.run().unwrap().ants, 5);
        engine.set_parameters(2, 0.5, 1.0, 2.0).unwrap();
        assert_eq!(engine.run().unwrap().ants, 2);
        assert_eq!(engine.ants_simulated(), 7);
    }

    #[test]
    fn test_no_tour_before_first_run() {
        let engine = seeded(World::default(), 5);
        assert!(engine.best_tour().is_none());
        assert!(engine.best_distance().is_infinite());
        assert_eq!(engine.cities().len(), 12);
    }

    #[test]
    fn test_right_triangle_converges_to_perimeter() {
        for alpha in [0.0, 1.0, 3.0] {
            let mut engine = seeded(triangle(), 5);
            engine.set_parameters(5, 0.5, alpha, 2.0).unwrap();
            engine.run().unwrap();
            assert!((engine.best_distance() - 12.0).abs() < 1e-9);
            assert_eq!(engine.best_tour().map(<[usize]>::len), Some(3));
        }
    }

    #[test]
    fn test_default_cities_run_stays_finite() {
        let mut engine = seeded(World::default(), 50);
        engine.set_parameters(10, 0.5, 1.0, 2.0).unwrap();
        let summary = engine.run().unwrap();

        assert_eq!(summary.ants, 10);
        assert!(summary.improvements >= 1);
        let best = engine.best_distance();
        assert!(best.is_finite() && best > 0.0);
        assert!(engine.pheromones().values().iter().all(|v| v.is_finite() && *v > 0.0));
        assert!(engine.pheromones().is_symmetric());
    }

    #[test]
    fn test_best_tour_matches_best_distance() {
        let mut engine = seeded(World::default(), 20);
        engine.run().unwrap();
        let tour = engine.best_tour().unwrap().to_vec();
        let length = engine.world().tour_length(&tour);
        assert!((length - engine.best_distance()).abs() < 1e-12);
    }

    #[test]
    fn test_evaporation_applied_per_ant() {
        let mut engine = seeded(triangle(), 3);
        engine.run().unwrap();
        // the diagonal only ever evaporates
        let diagonal = engine.pheromones().get(0, 0);
        assert!((diagonal - 0.125).abs() < 1e-15);
        // every triangle tour covers all three edges
        let expected = ((0.5 + 1.0 / 12.0) * 0.5 + 1.0 / 12.0) * 0.5 + 1.0 / 12.0;
        assert!((engine.pheromones().get(0, 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = seeded(World::default(), 15);
        engine.run().unwrap();
        assert!(engine.best_tour().is_some());

        engine.reset();
        assert!(engine.best_tour().is_none());
        assert_eq!(engine.best_distance(), f64::INFINITY);
        assert_eq!(engine.ants_simulated(), 0);
        assert!(engine.pheromones().values().iter().all(|&v| v == INITIAL_TRAIL));
        assert_eq!(engine.config().num_ants, 15);
        assert_eq!(engine.cities().len(), 12);
    }

    #[test]
    fn test_best_distance_non_increasing_across_runs() {
        let mut engine = seeded(World::default(), 25);
        let mut history = Vec::new();
        for _ in 0..4 {
            history.extend(engine.run().unwrap().cost_history);
        }
        assert_eq!(history.len(), 100);
        for window in history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best distance increased: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut a = seeded(World::default(), 30);
        let mut b = seeded(World::default(), 30);
        for _ in 0..3 {
            a.run().unwrap();
            b.run().unwrap();
        }
        assert_eq!(a.best_tour(), b.best_tour());
        assert_eq!(a.best_distance(), b.best_distance());
        assert_eq!(a.pheromones(), b.pheromones());
    }

    #[test]
    fn test_injected_rng_matches_seeded_engine() {
        let config = AcoConfig::default().with_num_ants(10);
        let mut injected =
            AcoEngine::with_rng(World::default(), config.clone(), StdRng::seed_from_u64(9))
                .unwrap();
        let mut from_seed = AcoEngine::new(World::default(), config.with_seed(9)).unwrap();
        injected.run().unwrap();
        from_seed.run().unwrap();
        assert_eq!(injected.best_tour(), from_seed.best_tour());
    }

    #[test]
    fn test_reseed_replays_run() {
        let mut engine = seeded(World::default(), 10);
        engine.run().unwrap();
        let first = engine.best_tour().map(<[usize]>::to_vec);

        engine.reset();
        engine.reseed(42);
        engine.run().unwrap();
        assert_eq!(engine.best_tour().map(<[usize]>::to_vec), first);
    }

    #[test]
    fn test_steep_distance_exponent_runs() {
        for (rate, beta) in [(0.5, 40.0), (0.1, 300.0), (0.0, 400.0)] {
            let mut engine = seeded(World::default(), 50);
            engine.set_parameters(50, rate, 1.0, beta).unwrap();
            for _ in 0..40 {
                engine.run().unwrap();
            }
            assert!(engine.best_distance().is_finite());
            assert!(engine.pheromones().is_symmetric());
        }
    }

    #[test]
    fn test_huge_ant_count_does_not_preallocate() {
        // every ant fails on the duplicated city, so the run stops at once
        let world = World::from_coordinates(&[(0.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        let mut engine = seeded(world, 1);
        engine.set_parameters(usize::MAX, 0.5, 1.0, 2.0).unwrap();
        assert!(matches!(
            engine.run(),
            Err(AcoError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_too_few_cities() {
        let mut engine = seeded(World::from_coordinates(&[(1.0, 2.0)]), 5);
        assert_eq!(engine.run(), Err(AcoError::EmptyWorld { cities: 1 }));

        let mut engine = seeded(World::new(Vec::new()), 5);
        assert_eq!(engine.run(), Err(AcoError::EmptyWorld { cities: 0 }));
        assert!(engine.best_tour().is_none());
    }

    #[test]
    fn test_two_cities() {
        let mut engine = seeded(World::from_coordinates(&[(0.0, 0.0), (0.0, 2.5)]), 3);
        engine.run().unwrap();
        assert!((engine.best_distance() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_cities_fail_without_corruption() {
        let world = World::from_coordinates(&[(0.0, 0.0), (1.0, 1.0), (4.0, 0.0), (1.0, 1.0)]);
        let mut engine = seeded(world, 10);
        let err = engine.run().unwrap_err();
        assert!(matches!(err, AcoError::DegenerateGeometry { .. }));
        assert!(engine.pheromones().values().iter().all(|&v| v == INITIAL_TRAIL));
        assert!(engine.best_tour().is_none());
        assert_eq!(engine.ants_simulated(), 0);
    }

    #[derive(Default)]
    struct Recorder {
        ants: Vec<(usize, f64, bool)>,
        runs: usize,
    }

    struct Shared(Rc<RefCell<Recorder>>);

    impl AntObserver for Shared {
        fn on_ant(&mut self, event: &AntEvent<'_>) {
            self.0
                .borrow_mut()
                .ants
                .push((event.tour.len(), event.best_distance, event.improved));
        }

        fn on_run(&mut self, _summary: &RunSummary) {
            self.0.borrow_mut().runs += 1;
        }
    }

    #[test]
    fn test_observer_sees_every_ant() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut engine = seeded(World::default(), 8);
        engine.set_observer(Box::new(Shared(Rc::clone(&recorder))));

        let summary = engine.run().unwrap();
        {
            let seen = recorder.borrow();
            assert_eq!(seen.runs, 1);
            assert_eq!(seen.ants.len(), 8);
            assert!(seen.ants.iter().all(|&(len, _, _)| len == 12));
            assert!(seen.ants[0].2, "first ant always improves on +inf");
            let improved = seen.ants.iter().filter(|a| a.2).count();
            assert_eq!(improved, summary.improvements);
        }

        engine.clear_observer();
        engine.run().unwrap();
        assert_eq!(recorder.borrow().runs, 1);
    }

    #[test]
    fn test_tracing_observer_runs_without_subscriber() {
        let mut engine = seeded(triangle(), 4);
        engine.set_observer(Box::new(TracingObserver));
        let summary = engine.run().unwrap();
        assert_eq!(summary.cost_history.len(), 4);
    }
}
