//! Error taxonomy for the ant colony engine.
//!
//! Every public operation that can fail returns [`AcoResult`]. Errors are
//! raised synchronously and never leave the pheromone matrix half-updated.

use thiserror::Error;

/// Result alias for ant colony operations.
pub type AcoResult<T> = Result<T, AcoError>;

/// Errors produced by the ant colony engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A parameter is outside its valid range.
    #[error("configuration error: {message}")]
    Config {
        /// Which parameter was rejected and why.
        message: String,
    },

    /// Two distinct cities share coordinates, so an edge has zero length.
    #[error("degenerate geometry: cities {from} and {to} are at distance zero")]
    DegenerateGeometry {
        /// First city of the zero-length edge.
        from: usize,
        /// Second city of the zero-length edge.
        to: usize,
    },

    /// The world has too few cities for a tour to exist.
    #[error("world has {cities} cities, at least 2 are required")]
    EmptyWorld {
        /// Number of cities in the world.
        cities: usize,
    },

    /// A tour handed to the pheromone matrix does not fit it.
    #[error("invalid tour: {message}")]
    InvalidTour {
        /// What is wrong with the tour.
        message: String,
    },

    /// A transition weight or tour length was NaN, infinite or underflowed.
    #[error("non-finite value detected at {location}")]
    NumericalInstability {
        /// Where the value was produced.
        location: String,
    },
}

impl AcoError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        AcoError::Config {
            message: message.into(),
        }
    }
}
