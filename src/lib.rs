//! Ant Colony Optimization solver for the symmetric Traveling Salesman Problem.
//!
//! - **World**: a fixed list of named cities with cached Euclidean distances.
//! - **Pheromone matrix**: symmetric trail strengths, evaporated and
//!   reinforced after every ant.
//! - **Ants**: stochastic tour construction with the classic
//!   `τ^α · (1/d)^β` transition rule.
//! - **Engine**: the run controller that owns the trails and the best tour
//!   for one in-memory session.
//!
//! # Architecture
//!
//! Everything is synchronous and single-threaded. Randomness is injected
//! through an explicit [`rand::Rng`], so seeded runs are reproducible.
//! Rendering and parameter forms are left to the caller, which only sets
//! parameters and reads back the cities and the best tour. The `wasm`
//! feature exposes exactly that surface to JavaScript.
//!
//! ```
//! use u_antcolony::aco::{AcoConfig, AcoEngine, World};
//!
//! let world = World::from_coordinates(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
//! let mut engine = AcoEngine::new(world, AcoConfig::default().with_seed(1)).unwrap();
//! engine.run().unwrap();
//! assert!((engine.best_distance() - 12.0).abs() < 1e-9);
//! ```

pub mod aco;

#[cfg(feature = "wasm")]
pub mod wasm;
