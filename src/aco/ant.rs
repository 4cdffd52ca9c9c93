//! Tour construction for a single ant.
//!
//! # Algorithm
//!
//! 1. Start at a uniformly random city
//! 2. While unvisited cities remain:
//!    a. Weight every unvisited city `j` by `τ(i,j)^α · (1/d(i,j))^β`
//!    b. Normalize the weights into a probability distribution
//!    c. Draw `r ∈ [0, 1)` and walk the candidates in ascending index order,
//!       taking the first one whose cumulative probability reaches `r`
//! 3. The tour closes implicitly back to the start
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::Rng;

use super::error::{AcoError, AcoResult};
use super::pheromone::PheromoneMatrix;
use super::types::Tour;
use super::world::World;

/// Builds one complete tour against the current pheromone state.
///
/// The matrix is only read. Returns a permutation of `0..world.len()`.
///
/// # Errors
///
/// - [`AcoError::EmptyWorld`] if the world has no cities
/// - [`AcoError::DegenerateGeometry`] if an unvisited candidate sits at
///   distance zero from the current city
/// - [`AcoError::NumericalInstability`] if a transition weight is NaN, as
///   with NaN coordinates
pub fn construct_tour<R: Rng>(
    world: &World,
    pheromones: &PheromoneMatrix,
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> AcoResult<Tour> {
    let n = world.len();
    if n == 0 {
        return Err(AcoError::EmptyWorld { cities: 0 });
    }

    let start = rng.random_range(0..n);
    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    tour.push(start);
    visited[start] = true;

    let mut current = start;
    let mut candidates = Vec::with_capacity(n);
    let mut probabilities = Vec::with_capacity(n);

    while tour.len() < n {
        candidates.clear();
        candidates.extend((0..n).filter(|&j| !visited[j]));

        transition_probabilities(
            world,
            pheromones,
            current,
            &candidates,
            alpha,
            beta,
            &mut probabilities,
        )?;

        let r: f64 = rng.random();
        let next = select_next(&candidates, &probabilities, r).ok_or_else(|| {
            AcoError::InvalidTour {
                message: "no unvisited city left to select".into(),
            }
        })?;

        visited[next] = true;
        tour.push(next);
        current = next;
    }

    Ok(tour)
}

/// Fills `out` with the transition probabilities from `current` to each of
/// `candidates`, in the same order.
///
/// Weights are taken in log space, `α·ln τ − β·ln d`, and shifted by the
/// largest one before exponentiation. The best candidate always gets weight 1,
/// so large exponents or long decay cannot underflow the whole distribution.
/// The probabilities sum to 1 up to rounding.
pub fn transition_probabilities(
    world: &World,
    pheromones: &PheromoneMatrix,
    current: usize,
    candidates: &[usize],
    alpha: f64,
    beta: f64,
    out: &mut Vec<f64>,
) -> AcoResult<()> {
    out.clear();
    let mut max_log = f64::NEG_INFINITY;

    for &j in candidates {
        let d = world.distance(current, j);
        if d <= 0.0 {
            return Err(AcoError::DegenerateGeometry {
                from: current,
                to: j,
            });
        }
        let log_weight = alpha * pheromones.get(current, j).ln() - beta * d.ln();
        if log_weight.is_nan() {
            return Err(instability(current));
        }
        max_log = max_log.max(log_weight);
        out.push(log_weight);
    }

    if !max_log.is_finite() {
        return Err(instability(current));
    }

    let mut sum = 0.0;
    for w in out.iter_mut() {
        *w = (*w - max_log).exp();
        sum += *w;
    }
    for p in out.iter_mut() {
        *p /= sum;
    }
    Ok(())
}

fn instability(current: usize) -> AcoError {
    AcoError::NumericalInstability {
        location: format!("transition weights from city {current}"),
    }
}

/// Roulette-wheel selection over `candidates` with draw `r ∈ [0, 1)`.
///
/// Returns the first candidate whose cumulative probability is `>= r`.
/// Accumulated rounding can leave the running sum just short of `r`; the
/// last candidate is returned in that case so selection always terminates.
/// This is a floating-point fallback, not a tie-break rule.
///
/// Returns `None` only when `candidates` is empty.
pub fn select_next(candidates: &[usize], probabilities: &[f64], r: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (&city, &p) in candidates.iter().zip(probabilities) {
        cumulative += p;
        if cumulative >= r {
            return Some(city);
        }
    }
    candidates.last().copied()
}
