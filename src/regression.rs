//! Regression
//!
//! Unadjusted least squares line of an outcome on a single regressor. Applied to
//! an observational sample this is the naive effect estimate, which absorbs any
//! confounding bias.
use crate::errors::CausalError;
use crate::utils::{check_length, mean};
use serde::{Deserialize, Serialize};

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|x_| self.intercept + self.slope * x_).collect()
    }
}

/// Ordinary least squares fit of `y` on `x`.
///
/// * `x` - Regressor, needs at least two points and non-zero variance.
/// * `y` - Response, same length as `x`.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit, CausalError> {
    check_length("y", x.len(), y.len())?;
    if x.len() < 2 {
        return Err(CausalError::InvalidArgument(
            "x".to_string(),
            "at least 2 points".to_string(),
            x.len().to_string(),
        ));
    }

    let x_mean = mean(x);
    let y_mean = mean(y);
    let (sxy, sxx) = x.iter().zip(y).fold((0.0, 0.0), |(sxy, sxx), (x_, y_)| {
        let dx = x_ - x_mean;
        (sxy + dx * (y_ - y_mean), sxx + dx * dx)
    });

    if sxx == 0.0 {
        return Err(CausalError::NoVariance("x".to_string()));
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 1.5 * v - 2.0).collect();
        let fit = linear_fit(&x, &y).unwrap();
        assert!((fit.slope - 1.5).abs() < 1e-12);
        assert!((fit.intercept + 2.0).abs() < 1e-12);
        let preds = fit.predict(&x);
        for (p, y_) in preds.iter().zip(&y) {
            assert!((p - y_).abs() < 1e-12);
        }
    }

    #[test]
    fn test_least_squares() {
        // Symmetric residuals around y = x.
        let x = vec![0.0, 0.0, 1.0, 1.0];
        let y = vec![-1.0, 1.0, 0.0, 2.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            linear_fit(&[1.0, 2.0], &[1.0]),
            Err(CausalError::ShapeMismatch("y".to_string(), 2, 1))
        );
        assert!(matches!(linear_fit(&[1.0], &[1.0]), Err(CausalError::InvalidArgument(..))));
        assert_eq!(
            linear_fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]),
            Err(CausalError::NoVariance("x".to_string()))
        );
    }
}
