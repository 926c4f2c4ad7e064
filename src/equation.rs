//! Structural Equations
//!
//! One trait per role a structural equation can play in the three variable
//! model. Each equation receives the random number generator explicitly, so
//! the only state advanced between calls is the generator the caller owns.
//!
//! Any closure with the matching signature is a structural equation:
//!
//! ```
//! use causal_mc::equation::{ConfounderSampler, TreatmentFunction};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let sampler = |n: usize, _rng: &mut StdRng| vec![1.0; n];
//! let treatment = |z: &[f64], _rng: &mut StdRng| z.iter().map(|v| 2.0 * v).collect::<Vec<f64>>();
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let z = sampler.sample(3, &mut rng);
//! assert_eq!(treatment.apply(&z, &mut rng), vec![2.0, 2.0, 2.0]);
//! ```
use rand::rngs::StdRng;

/// Draws values of the confounder. Arity 0, parameterized only by the sample count.
pub trait ConfounderSampler {
    /// Draw `n` confounder values.
    fn sample(&self, n: usize, rng: &mut StdRng) -> Vec<f64>;
}

/// Derives treatment values from the confounder.
pub trait TreatmentFunction {
    /// Compute one treatment value per confounder value, possibly adding noise.
    fn apply(&self, confounder: &[f64], rng: &mut StdRng) -> Vec<f64>;
}

/// Derives outcome values from treatment and confounder.
pub trait OutcomeFunction {
    /// Compute one outcome value per unit. `treatment[i]` and `confounder[i]`
    /// describe the same unit, and so must the returned `outcome[i]`.
    fn apply(&self, treatment: &[f64], confounder: &[f64], rng: &mut StdRng) -> Vec<f64>;
}

impl<F> ConfounderSampler for F
where
    F: Fn(usize, &mut StdRng) -> Vec<f64>,
{
    fn sample(&self, n: usize, rng: &mut StdRng) -> Vec<f64> {
        self(n, rng)
    }
}

impl<F> TreatmentFunction for F
where
    F: Fn(&[f64], &mut StdRng) -> Vec<f64>,
{
    fn apply(&self, confounder: &[f64], rng: &mut StdRng) -> Vec<f64> {
        self(confounder, rng)
    }
}

impl<F> OutcomeFunction for F
where
    F: Fn(&[f64], &[f64], &mut StdRng) -> Vec<f64>,
{
    fn apply(&self, treatment: &[f64], confounder: &[f64], rng: &mut StdRng) -> Vec<f64> {
        self(treatment, confounder, rng)
    }
}
