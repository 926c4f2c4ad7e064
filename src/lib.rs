//! Structural causal model simulation.
//!
//! Draws observational data from a confounded three variable model and
//! contrasts the naive regression slope with a Monte Carlo estimate of the
//! average treatment effect obtained by simulated intervention.

// Modules
pub mod config;
pub mod equation;
pub mod errors;
pub mod regression;
pub mod scm;
pub mod simulation;
pub mod toy;
pub mod utils;

// Individual classes, and functions
pub use config::{AteQuery, ConfigIO, SimulationConfig};
pub use errors::CausalError;
pub use scm::{InterventionalSample, ObservationalSample, StructuralCausalModel};
pub use simulation::{EffectComparison, Simulation, ToySimulation};
pub use toy::{make_toy_scm, ToyParams};
