//! Tours, results and the per-ant observer hook.

/// A closed tour: a permutation of city indices, returning to the first.
pub type Tour = Vec<usize>;

/// Best tour found in the current session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestResult {
    /// The tour, or `None` before any ant has completed one.
    pub tour: Option<Tour>,
    /// Cyclic length of `tour`; `+∞` when there is none.
    pub distance: f64,
}

impl BestResult {
    /// A result holding no tour.
    pub fn empty() -> Self {
        Self {
            tour: None,
            distance: f64::INFINITY,
        }
    }

    /// Replaces the best tour if `distance` is strictly shorter.
    ///
    /// Returns whether the replacement happened.
    pub fn offer(&mut self, tour: &[usize], distance: f64) -> bool {
        if distance < self.distance {
            self.tour = Some(tour.to_vec());
            self.distance = distance;
            true
        } else {
            false
        }
    }
}

impl Default for BestResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Emitted after each ant has finished its tour and the trails are updated.
#[derive(Debug, Clone, Copy)]
pub struct AntEvent<'a> {
    /// Position of the ant within the current run, starting at 0.
    pub ant: usize,
    /// The tour the ant built.
    pub tour: &'a [usize],
    /// Cyclic length of `tour`.
    pub distance: f64,
    /// Whether this tour became the new best.
    pub improved: bool,
    /// Best distance after this ant.
    pub best_distance: f64,
}

/// Outcome of one call to [`AcoEngine::run`](super::AcoEngine::run).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Ants simulated during the call.
    pub ants: usize,
    /// How many of them improved the best tour.
    pub improvements: usize,
    /// Best distance once the call finished.
    pub best_distance: f64,
    /// Best distance after each ant, in order. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Receives progress notifications from the engine.
///
/// Both methods default to doing nothing.
pub trait AntObserver {
    /// Called once per ant, after its pheromone update.
    fn on_ant(&mut self, _event: &AntEvent<'_>) {}

    /// Called once when a run completes successfully.
    fn on_run(&mut self, _summary: &RunSummary) {}
}

/// Forwards engine progress to `tracing` as structured events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AntObserver for TracingObserver {
    fn on_ant(&mut self, event: &AntEvent<'_>) {
        tracing::trace!(
            ant = event.ant,
            tour = ?event.tour,
            distance = event.distance,
            improved = event.improved,
            "ant completed tour"
        );
    }

    fn on_run(&mut self, summary: &RunSummary) {
        tracing::info!(
            ants = summary.ants,
            improvements = summary.improvements,
            best_distance = summary.best_distance,
            "colony run finished"
        );
    }
}
