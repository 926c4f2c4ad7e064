//! Toy Model
//!
//! The default structural equations:
//!
//! * `Z ~ N(0, 1)`
//! * `X = 1(Z > 0) + w * Z + N(0, sigma_x)`
//! * `Y = effect * X + gamma * Z + interaction * X * Z + N(0, sigma_y)`
//!
//! Both the treatment and the outcome load on `Z`, so an unadjusted regression
//! of `Y` on `X` overstates the effect. Since `E[Z] = 0`, the true average
//! treatment effect of moving `X` from `x0` to `x1` is `effect * (x1 - x0)`.
use crate::equation::{ConfounderSampler, OutcomeFunction, TreatmentFunction};
use crate::errors::CausalError;
use crate::scm::StructuralCausalModel;
use crate::utils::{validate_finite_parameter, validate_non_negative_parameter};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::{Deserialize, Serialize};

fn default_treatment_confounder_weight() -> f64 {
    0.1
}
fn default_treatment_noise() -> f64 {
    0.5
}
fn default_effect() -> f64 {
    2.0
}
fn default_confounder_effect() -> f64 {
    0.5
}
fn default_interaction() -> f64 {
    0.3
}
fn default_outcome_noise() -> f64 {
    0.5
}

/// Coefficients of the toy structural equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToyParams {
    /// Linear weight of the confounder in the treatment equation.
    #[serde(default = "default_treatment_confounder_weight")]
    pub treatment_confounder_weight: f64,
    /// Standard deviation of the treatment noise.
    #[serde(default = "default_treatment_noise")]
    pub treatment_noise: f64,
    /// Direct effect of the treatment on the outcome.
    #[serde(default = "default_effect")]
    pub effect: f64,
    /// Direct effect of the confounder on the outcome.
    #[serde(default = "default_confounder_effect")]
    pub confounder_effect: f64,
    /// Coefficient of the treatment by confounder interaction.
    #[serde(default = "default_interaction")]
    pub interaction: f64,
    /// Standard deviation of the outcome noise.
    #[serde(default = "default_outcome_noise")]
    pub outcome_noise: f64,
}

impl Default for ToyParams {
    fn default() -> Self {
        ToyParams {
            treatment_confounder_weight: default_treatment_confounder_weight(),
            treatment_noise: default_treatment_noise(),
            effect: default_effect(),
            confounder_effect: default_confounder_effect(),
            interaction: default_interaction(),
            outcome_noise: default_outcome_noise(),
        }
    }
}

impl ToyParams {
    /// Closed form average treatment effect, `(effect + interaction * E[Z]) * (x1 - x0)`
    /// with `E[Z] = 0`.
    pub fn true_ate(&self, x0: f64, x1: f64) -> f64 {
        self.effect * (x1 - x0)
    }

    pub fn validate(&self) -> Result<(), CausalError> {
        validate_finite_parameter(self.treatment_confounder_weight, "treatment_confounder_weight")?;
        validate_non_negative_parameter(self.treatment_noise, "treatment_noise")?;
        validate_finite_parameter(self.effect, "effect")?;
        validate_finite_parameter(self.confounder_effect, "confounder_effect")?;
        validate_finite_parameter(self.interaction, "interaction")?;
        validate_non_negative_parameter(self.outcome_noise, "outcome_noise")?;
        Ok(())
    }
}

fn normal(mean: f64, std_dev: f64, parameter: &str) -> Result<Normal<f64>, CausalError> {
    Normal::new(mean, std_dev).map_err(|e| {
        CausalError::InvalidArgument(
            parameter.to_string(),
            "finite non-negative standard deviation".to_string(),
            format!("{} ({})", std_dev, e),
        )
    })
}

/// Standard normal confounder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyConfounder;

impl ConfounderSampler for ToyConfounder {
    fn sample(&self, n: usize, rng: &mut StdRng) -> Vec<f64> {
        (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
    }
}

/// Thresholded treatment with a linear confounder term and Gaussian noise.
#[derive(Debug, Clone)]
pub struct ToyTreatment {
    confounder_weight: f64,
    noise: Normal<f64>,
}

impl ToyTreatment {
    pub fn new(confounder_weight: f64, noise_std: f64) -> Result<Self, CausalError> {
        validate_finite_parameter(confounder_weight, "treatment_confounder_weight")?;
        validate_non_negative_parameter(noise_std, "treatment_noise")?;
        Ok(ToyTreatment {
            confounder_weight,
            noise: normal(0.0, noise_std, "treatment_noise")?,
        })
    }
}

impl TreatmentFunction for ToyTreatment {
    fn apply(&self, confounder: &[f64], rng: &mut StdRng) -> Vec<f64> {
        confounder
            .iter()
            .map(|z| {
                let indicator = if *z > 0.0 { 1.0 } else { 0.0 };
                indicator + self.confounder_weight * z + self.noise.sample(rng)
            })
            .collect()
    }
}

/// Linear outcome with a treatment by confounder interaction and Gaussian noise.
#[derive(Debug, Clone)]
pub struct ToyOutcome {
    effect: f64,
    confounder_effect: f64,
    interaction: f64,
    noise: Normal<f64>,
}

impl ToyOutcome {
    pub fn new(effect: f64, confounder_effect: f64, interaction: f64, noise_std: f64) -> Result<Self, CausalError> {
        validate_finite_parameter(effect, "effect")?;
        validate_finite_parameter(confounder_effect, "confounder_effect")?;
        validate_finite_parameter(interaction, "interaction")?;
        validate_non_negative_parameter(noise_std, "outcome_noise")?;
        Ok(ToyOutcome {
            effect,
            confounder_effect,
            interaction,
            noise: normal(0.0, noise_std, "outcome_noise")?,
        })
    }
}

impl OutcomeFunction for ToyOutcome {
    fn apply(&self, treatment: &[f64], confounder: &[f64], rng: &mut StdRng) -> Vec<f64> {
        treatment
            .iter()
            .zip(confounder)
            .map(|(x, z)| {
                self.effect * x + self.confounder_effect * z + self.interaction * x * z + self.noise.sample(rng)
            })
            .collect()
    }
}

pub type ToyScm = StructuralCausalModel<ToyConfounder, ToyTreatment, ToyOutcome>;

/// Build the toy model from its coefficients.
///
/// * `params` - Coefficients, noise scales must be finite and non-negative.
pub fn make_toy_scm(params: &ToyParams) -> Result<ToyScm, CausalError> {
    let treatment = ToyTreatment::new(params.treatment_confounder_weight, params.treatment_noise)?;
    let outcome = ToyOutcome::new(
        params.effect,
        params.confounder_effect,
        params.interaction,
        params.outcome_noise,
    )?;
    Ok(StructuralCausalModel::new(ToyConfounder, treatment, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::linear_fit;
    use crate::utils::mean;
    use rand::SeedableRng;

    #[test]
    fn test_default_params() {
        let params = ToyParams::default();
        assert_eq!(params.effect, 2.0);
        assert_eq!(params.interaction, 0.3);
        assert_eq!(params.true_ate(0.0, 1.0), 2.0);
        assert_eq!(params.true_ate(1.0, -1.0), -4.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_partial_json() {
        let params: ToyParams = serde_json::from_str(r#"{"effect": 1.5}"#).unwrap();
        assert_eq!(params.effect, 1.5);
        assert_eq!(params.outcome_noise, 0.5);
    }

    #[test]
    fn test_invalid_noise() {
        let params = ToyParams {
            outcome_noise: -1.0,
            ..Default::default()
        };
        assert!(matches!(make_toy_scm(&params), Err(CausalError::InvalidArgument(..))));
        let params = ToyParams {
            treatment_noise: f64::NAN,
            ..Default::default()
        };
        assert!(make_toy_scm(&params).is_err());
    }

    #[test]
    fn test_confounder_is_standard_normal() {
        let mut rng = StdRng::seed_from_u64(0);
        let z = ToyConfounder.sample(50_000, &mut rng);
        let m = mean(&z);
        let var = z.iter().map(|v| (v - m).powi(2)).sum::<f64>() / z.len() as f64;
        assert!(m.abs() < 0.03, "mean {m}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn test_noiseless_equations() {
        let params = ToyParams {
            treatment_noise: 0.0,
            outcome_noise: 0.0,
            ..Default::default()
        };
        let model = make_toy_scm(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let sample = model.sample_observational(100, &mut rng).unwrap();
        for (z, x, y) in sample.rows() {
            let expected_x = if z > 0.0 { 1.0 } else { 0.0 } + 0.1 * z;
            assert!((x - expected_x).abs() < 1e-12);
            let expected_y = 2.0 * x + 0.5 * z + 0.3 * x * z;
            assert!((y - expected_y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let model = make_toy_scm(&ToyParams::default()).unwrap();
        let a = model.sample_observational(500, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = make_toy_scm(&ToyParams::default())
            .unwrap()
            .sample_observational(500, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ate_converges() {
        let model = make_toy_scm(&ToyParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let ate = model.monte_carlo_ate(1_000_000, 0.0, 1.0, &mut rng).unwrap();
        assert!((ate - 2.0).abs() < 0.05, "ate {ate}");
    }

    #[test]
    fn test_zero_contrast() {
        let model = make_toy_scm(&ToyParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let ate = model.monte_carlo_ate(10_000, 0.5, 0.5, &mut rng).unwrap();
        assert!(ate.abs() < 0.05, "ate {ate}");
    }

    #[test]
    fn test_naive_slope_is_confounded() {
        let model = make_toy_scm(&ToyParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = model.sample_observational(5000, &mut rng).unwrap();
        let fit = linear_fit(&sample.treatment, &sample.outcome).unwrap();
        let ate = model.monte_carlo_ate(100_000, 0.0, 1.0, &mut rng).unwrap();
        assert!(fit.slope > 2.3, "naive slope {}", fit.slope);
        assert!((ate - 2.0).abs() < 0.1, "ate {ate}");
    }

    #[test]
    fn test_interventional_means() {
        let model = make_toy_scm(&ToyParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        // E[Y | do(X = 1)] = 2 + (0.5 + 0.3) * E[Z] = 2
        let treated = model.sample_interventional(200_000, 1.0, &mut rng).unwrap();
        assert!((treated.mean_outcome() - 2.0).abs() < 0.02);
        let control = model.sample_interventional(200_000, 0.0, &mut rng).unwrap();
        assert!(control.mean_outcome().abs() < 0.02);
    }
}
