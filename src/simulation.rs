//! Simulation
//!
//! Binds a structural causal model to its own seeded generator, so callers can
//! sample and estimate without threading a generator through every call. Two
//! simulations built with the same seed replay the same draws.
use crate::config::{AteQuery, SimulationConfig};
use crate::equation::{ConfounderSampler, OutcomeFunction, TreatmentFunction};
use crate::errors::CausalError;
use crate::regression::{linear_fit, LinearFit};
use crate::scm::{InterventionalSample, ObservationalSample, StructuralCausalModel};
use crate::toy::{make_toy_scm, ToyConfounder, ToyOutcome, ToyScm, ToyTreatment};
use crate::utils::{ensure_finite, fmt_vec_output};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Naive observational estimate next to the interventional one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectComparison {
    /// Least squares line of outcome on treatment, without adjustment.
    pub naive: LinearFit,
    /// Monte Carlo estimate of `E[Y | do(X = x1)] - E[Y | do(X = x0)]`.
    pub ate: f64,
    /// `ate / (x1 - x0)`, on the same scale as the naive slope.
    pub effect_per_unit: f64,
}

impl EffectComparison {
    /// Part of the naive slope explained by confounding.
    pub fn confounding_bias(&self) -> f64 {
        self.naive.slope - self.effect_per_unit
    }
}

#[derive(Debug)]
pub struct Simulation<C, T, O> {
    model: StructuralCausalModel<C, T, O>,
    rng: StdRng,
    seed: u64,
    check_finite: bool,
}

impl<C, T, O> Simulation<C, T, O>
where
    C: ConfounderSampler,
    T: TreatmentFunction,
    O: OutcomeFunction,
{
    /// Create a new simulation.
    ///
    /// * `model` - Structural causal model to draw from.
    /// * `seed` - Seed for the generator shared by all equations.
    pub fn new(model: StructuralCausalModel<C, T, O>, seed: u64) -> Self {
        Simulation {
            model,
            rng: StdRng::seed_from_u64(seed),
            seed,
            check_finite: false,
        }
    }

    /// Set whether non-finite values fail with `NumericAnomaly`.
    /// * `check_finite` - Off by default, in which case NaN and infinite values pass through.
    pub fn set_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind the generator to its seed.
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Draw `n` units respecting every structural equation.
    pub fn sample_observational(&mut self, n: usize) -> Result<ObservationalSample, CausalError> {
        let sample = self.model.sample_observational(n, &mut self.rng)?;
        if self.check_finite {
            self.guard("confounder", &sample.confounder)?;
            self.guard("treatment", &sample.treatment)?;
            self.guard("outcome", &sample.outcome)?;
        }
        debug!("First outcomes: {}", fmt_vec_output(&sample.outcome[..sample.len().min(5)]));
        Ok(sample)
    }

    /// Draw `n` units under `do(X = level)`.
    pub fn sample_interventional(&mut self, n: usize, level: f64) -> Result<InterventionalSample, CausalError> {
        let sample = self.model.sample_interventional(n, level, &mut self.rng)?;
        if self.check_finite {
            self.guard("confounder", &sample.confounder)?;
            self.guard("outcome", &sample.outcome)?;
        }
        Ok(sample)
    }

    /// Monte Carlo estimate of the effect of moving treatment from `x0` to `x1`.
    pub fn monte_carlo_ate(&mut self, n: usize, x0: f64, x1: f64) -> Result<f64, CausalError> {
        let ate = self.model.monte_carlo_ate(n, x0, x1, &mut self.rng)?;
        if self.check_finite {
            self.guard("ate", &[ate])?;
        }
        info!("Monte Carlo ATE (x = {} -> {}, n = {}): {:.4}", x0, x1, n, ate);
        Ok(ate)
    }

    pub fn estimate_ate(&mut self, query: &AteQuery) -> Result<f64, CausalError> {
        self.monte_carlo_ate(query.n, query.x0, query.x1)
    }

    /// Naive slope from an observational sample against the Monte Carlo effect.
    ///
    /// The effect is also reported per unit of treatment so it is comparable
    /// with the slope. A zero or overflowing contrast cannot be scaled and fails
    /// with `InvalidArgument`.
    ///
    /// * `n_observational` - Size of the observational sample.
    /// * `query` - Interventional contrast.
    pub fn compare(&mut self, n_observational: usize, query: &AteQuery) -> Result<EffectComparison, CausalError> {
        let contrast = query.x1 - query.x0;
        if contrast == 0.0 || !contrast.is_finite() {
            return Err(CausalError::InvalidArgument(
                "x1".to_string(),
                "a finite level different from x0".to_string(),
                query.x1.to_string(),
            ));
        }

        let sample = self.sample_observational(n_observational)?;
        let naive = linear_fit(&sample.treatment, &sample.outcome)?;
        let ate = self.estimate_ate(query)?;

        let comparison = EffectComparison {
            naive,
            ate,
            effect_per_unit: ate / contrast,
        };
        info!(
            "Naive slope {:.4}, Monte Carlo effect per unit {:.4}, confounding bias {:.4}",
            naive.slope,
            comparison.effect_per_unit,
            comparison.confounding_bias()
        );
        Ok(comparison)
    }

    fn guard(&self, variable: &str, values: &[f64]) -> Result<(), CausalError> {
        ensure_finite(variable, values).map_err(|e| {
            warn!("{}", e);
            e
        })
    }
}

pub type ToySimulation = Simulation<ToyConfounder, ToyTreatment, ToyOutcome>;

impl ToySimulation {
    /// Build the toy model simulation described by `config`.
    pub fn toy(config: &SimulationConfig) -> Result<Self, CausalError> {
        config.validate()?;
        let model: ToyScm = make_toy_scm(&config.toy)?;
        Ok(Simulation::new(model, config.seed).set_check_finite(config.check_finite))
    }

    /// Run the naive against adjusted comparison described by `config`.
    pub fn run(config: &SimulationConfig) -> Result<EffectComparison, CausalError> {
        let mut simulation = Self::toy(config)?;
        simulation.compare(config.observational_samples, &config.ate)
    }
}
