//! Ant Colony Optimization (ACO) for the symmetric TSP.
//!
//! Artificial ants build closed tours city by city, choosing each next city
//! with a probability biased by a shared pheromone matrix and by inverse
//! distance. After every ant the whole matrix evaporates and the ant's tour
//! is reinforced in proportion to `1 / length`, so short tours attract later
//! ants.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*, MIT Press

mod ant;
mod config;
mod error;
mod pheromone;
mod runner;
mod types;
mod world;

pub use ant::{construct_tour, select_next, transition_probabilities};
pub use config::AcoConfig;
pub use error::{AcoError, AcoResult};
pub use pheromone::{PheromoneMatrix, INITIAL_TRAIL, MIN_TRAIL};
pub use runner::AcoEngine;
pub use types::{AntEvent, AntObserver, BestResult, RunSummary, Tour, TracingObserver};
pub use world::{City, World};
