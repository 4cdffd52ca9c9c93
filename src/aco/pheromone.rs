//! Shared pheromone trails.
//!
//! Only the run controller mutates the matrix. Every mutation is symmetric:
//! evaporation scales all entries by the same factor and deposits add the
//! same amount to `(i, j)` and `(j, i)`.

use super::error::{AcoError, AcoResult};

/// Initial value of every trail, diagonal included.
pub const INITIAL_TRAIL: f64 = 1.0;

/// Smallest value evaporation may leave in a cell.
///
/// Keeps trails strictly positive once repeated decay would underflow.
pub const MIN_TRAIL: f64 = f64::MIN_POSITIVE;

/// Square, symmetric matrix of trail strengths.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    trails: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with every entry set to [`INITIAL_TRAIL`].
    pub fn new(n: usize) -> Self {
        Self {
            n,
            trails: vec![INITIAL_TRAIL; n * n],
        }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Trail strength on edge `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.trails[i * self.n + j]
    }

    /// Row-major view of all entries.
    pub fn values(&self) -> &[f64] {
        &self.trails
    }

    /// Restores every entry to [`INITIAL_TRAIL`].
    pub fn reset(&mut self) {
        self.trails.fill(INITIAL_TRAIL);
    }

    /// Multiplies every entry by `1 - rate`, in place.
    ///
    /// Entries never drop below [`MIN_TRAIL`].
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for trail in &mut self.trails {
            *trail = (*trail * keep).max(MIN_TRAIL);
        }
    }

    /// Adds `1 / length` to every edge of the closed tour, both directions.
    pub fn deposit(&mut self, tour: &[usize], length: f64) -> AcoResult<()> {
        self.check_deposit(tour, length)?;
        self.deposit_unchecked(tour, length);
        Ok(())
    }

    /// Evaporates with `rate` and then deposits `tour`.
    ///
    /// Inputs are validated before anything is touched, so on error the
    /// matrix is left exactly as it was.
    pub fn update(&mut self, tour: &[usize], length: f64, rate: f64) -> AcoResult<()> {
        if !(0.0..1.0).contains(&rate) {
            return Err(AcoError::config(format!(
                "evaporation_rate must be in [0, 1), got {rate}"
            )));
        }
        self.check_deposit(tour, length)?;
        self.evaporate(rate);
        self.deposit_unchecked(tour, length);
        Ok(())
    }

    /// Whether `(i, j) == (j, i)` holds for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min_value(&self) -> Option<f64> {
        self.trails.iter().copied().reduce(f64::min)
    }

    fn check_deposit(&self, tour: &[usize], length: f64) -> AcoResult<()> {
        if tour.is_empty() {
            return Err(AcoError::InvalidTour {
                message: "tour is empty".into(),
            });
        }
        if let Some(&bad) = tour.iter().find(|&&c| c >= self.n) {
            return Err(AcoError::InvalidTour {
                message: format!("city index {bad} out of range for {} cities", self.n),
            });
        }
        if length.is_nan() || length.is_infinite() {
            return Err(AcoError::NumericalInstability {
                location: "pheromone deposit".into(),
            });
        }
        if length <= 0.0 {
            let (from, to) = zero_edge(tour);
            return Err(AcoError::DegenerateGeometry { from, to });
        }
        Ok(())
    }

    fn deposit_unchecked(&mut self, tour: &[usize], length: f64) {
        let amount = 1.0 / length;
        for (i, &from) in tour.iter().enumerate() {
            let to = tour[(i + 1) % tour.len()];
            self.trails[from * self.n + to] += amount;
            self.trails[to * self.n + from] += amount;
        }
    }
}

/// First edge of a zero-length tour, used for error reporting.
fn zero_edge(tour: &[usize]) -> (usize, usize) {
    let first = tour[0];
    let second = tour.get(1).copied().unwrap_or(first);
    (first, second)
}
