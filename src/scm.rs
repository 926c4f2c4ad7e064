//! Structural Causal Model
//!
//! A confounder `Z`, a treatment `X` and an outcome `Y` in the fixed causal
//! order `Z -> X -> Y` with `Z -> Y`. The model supports two sampling regimes:
//!
//! * **Observational**: every structural equation is evaluated, so `X` and `Y`
//!   share the confounder and their association is biased.
//! * **Interventional**: the treatment equation is bypassed and `X` is forced
//!   to a fixed level, `do(X = x)`.
//!
//! The Monte Carlo average treatment effect is built on interventional sampling.
use crate::equation::{ConfounderSampler, OutcomeFunction, TreatmentFunction};
use crate::errors::CausalError;
use crate::utils::{check_length, mean, validate_finite_parameter, validate_sample_count};
use log::debug;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Index aligned draw from the observational distribution.
/// Position `i` in every sequence describes the same simulated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationalSample {
    pub confounder: Vec<f64>,
    pub treatment: Vec<f64>,
    pub outcome: Vec<f64>,
}

impl ObservationalSample {
    /// Number of units in the sample.
    pub fn len(&self) -> usize {
        self.confounder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confounder.is_empty()
    }

    /// Iterate over `(confounder, treatment, outcome)` per unit.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.confounder
            .iter()
            .zip(&self.treatment)
            .zip(&self.outcome)
            .map(|((z, x), y)| (*z, *x, *y))
    }
}

/// Draw under `do(X = level)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionalSample {
    /// Treatment level every unit was forced to.
    pub level: f64,
    pub confounder: Vec<f64>,
    pub outcome: Vec<f64>,
}

impl InterventionalSample {
    pub fn len(&self) -> usize {
        self.confounder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confounder.is_empty()
    }

    /// Monte Carlo estimate of `E[Y | do(X = level)]`.
    pub fn mean_outcome(&self) -> f64 {
        mean(&self.outcome)
    }
}

/// Structural causal model over a confounder, a treatment and an outcome.
///
/// The model is immutable once built. The only state that changes between
/// sampling calls is the generator passed in by the caller, so reusing one
/// generator yields fresh noise on every call while replaying a seed replays
/// the draws exactly.
///
/// Equation outputs are checked against the expected number of units and a
/// mismatch fails with [`CausalError::ShapeMismatch`]. NaN or infinite values
/// produced by the equations are passed through untouched.
#[derive(Debug, Clone)]
pub struct StructuralCausalModel<C, T, O> {
    confounder: C,
    treatment: T,
    outcome: O,
}

impl<C, T, O> StructuralCausalModel<C, T, O>
where
    C: ConfounderSampler,
    T: TreatmentFunction,
    O: OutcomeFunction,
{
    /// Create a new model from its three structural equations.
    ///
    /// * `confounder` - Samples the confounder.
    /// * `treatment` - Treatment as a function of the confounder.
    /// * `outcome` - Outcome as a function of treatment and confounder.
    pub fn new(confounder: C, treatment: T, outcome: O) -> Self {
        StructuralCausalModel {
            confounder,
            treatment,
            outcome,
        }
    }

    /// Draw `n` units respecting every structural equation.
    ///
    /// * `n` - Number of units, must be positive.
    /// * `rng` - Generator consumed by the equations.
    pub fn sample_observational(&self, n: usize, rng: &mut StdRng) -> Result<ObservationalSample, CausalError> {
        validate_sample_count(n, "n")?;
        let confounder = self.draw_confounder(n, rng)?;

        let treatment = self.treatment.apply(&confounder, rng);
        check_length("treatment", n, treatment.len())?;

        let outcome = self.outcome.apply(&treatment, &confounder, rng);
        check_length("outcome", n, outcome.len())?;

        debug!("Drew {} observational units.", n);
        Ok(ObservationalSample {
            confounder,
            treatment,
            outcome,
        })
    }

    /// Draw `n` units under `do(X = level)`, bypassing the treatment equation.
    ///
    /// * `n` - Number of units, must be positive.
    /// * `level` - Finite treatment level every unit is forced to.
    /// * `rng` - Generator consumed by the equations.
    pub fn sample_interventional(
        &self,
        n: usize,
        level: f64,
        rng: &mut StdRng,
    ) -> Result<InterventionalSample, CausalError> {
        validate_sample_count(n, "n")?;
        validate_finite_parameter(level, "level")?;
        let confounder = self.draw_confounder(n, rng)?;
        let outcome = self.outcome_under(level, &confounder, rng)?;

        debug!("Drew {} interventional units at do(X = {}).", n, level);
        Ok(InterventionalSample {
            level,
            confounder,
            outcome,
        })
    }

    /// Monte Carlo estimate of `E[Y | do(X = x1)] - E[Y | do(X = x0)]`.
    ///
    /// One confounder draw is shared by both arms, so every unit is compared
    /// against itself. The generator is consumed in a fixed order: the
    /// confounder, then the outcome at `x0`, then the outcome at `x1`.
    ///
    /// * `n` - Number of units, must be positive.
    /// * `x0` - Baseline treatment level.
    /// * `x1` - Contrast treatment level. Equal levels are allowed and give an estimate near zero.
    /// * `rng` - Generator consumed by the equations.
    pub fn monte_carlo_ate(&self, n: usize, x0: f64, x1: f64, rng: &mut StdRng) -> Result<f64, CausalError> {
        validate_sample_count(n, "n")?;
        validate_finite_parameter(x0, "x0")?;
        validate_finite_parameter(x1, "x1")?;

        let confounder = self.draw_confounder(n, rng)?;
        let y0 = self.outcome_under(x0, &confounder, rng)?;
        let y1 = self.outcome_under(x1, &confounder, rng)?;

        let diff: Vec<f64> = y1.iter().zip(&y0).map(|(a, b)| a - b).collect();
        let ate = mean(&diff);
        debug!("Monte Carlo ATE over {} units, x = {} -> {}: {}", n, x0, x1, ate);
        Ok(ate)
    }

    fn draw_confounder(&self, n: usize, rng: &mut StdRng) -> Result<Vec<f64>, CausalError> {
        let confounder = self.confounder.sample(n, rng);
        check_length("confounder", n, confounder.len())?;
        Ok(confounder)
    }

    fn outcome_under(&self, level: f64, confounder: &[f64], rng: &mut StdRng) -> Result<Vec<f64>, CausalError> {
        let forced = vec![level; confounder.len()];
        let outcome = self.outcome.apply(&forced, confounder, rng);
        check_length("outcome", confounder.len(), outcome.len())?;
        Ok(outcome)
    }
}
