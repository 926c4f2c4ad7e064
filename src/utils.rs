use crate::errors::CausalError;

pub fn fmt_vec_output(v: &[f64]) -> String {
    v.iter().map(|n| format!("{:.4}", n)).collect::<Vec<_>>().join(", ")
}

// Validation
pub fn validate_sample_count(n: usize, parameter: &str) -> Result<(), CausalError> {
    if n == 0 {
        Err(CausalError::InvalidArgument(
            parameter.to_string(),
            "positive integer".to_string(),
            n.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_finite_parameter(value: f64, parameter: &str) -> Result<(), CausalError> {
    validate_float_parameter(value, f64::MIN, f64::MAX, parameter)
}

pub fn validate_non_negative_parameter(value: f64, parameter: &str) -> Result<(), CausalError> {
    validate_float_parameter(value, 0.0, f64::MAX, parameter)
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), CausalError> {
    // Infinities fall outside [min, max], NaN compares false against both.
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(CausalError::InvalidArgument(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Fail with `ShapeMismatch` when a structural equation returned the wrong number of values.
pub fn check_length(variable: &str, expected: usize, found: usize) -> Result<(), CausalError> {
    if expected == found {
        Ok(())
    } else {
        Err(CausalError::ShapeMismatch(variable.to_string(), expected, found))
    }
}

/// Fail with `NumericAnomaly` on the first NaN or infinite value.
pub fn ensure_finite(variable: &str, values: &[f64]) -> Result<(), CausalError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(CausalError::NumericAnomaly(variable.to_string(), *v)),
        None => Ok(()),
    }
}

const LANES: usize = 16;

/// Chunked summation, accumulating in independent lanes
/// so large Monte Carlo batches vectorize well.
#[inline]
pub fn fast_sum(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(LANES);
    let remainder = chunks.remainder();

    let sum = chunks.fold([0.0_f64; LANES], |mut acc, chunk| {
        let chunk: &[f64; LANES] = chunk.try_into().unwrap_or(&[0.0; LANES]);
        for i in 0..LANES {
            acc[i] += chunk[i];
        }
        acc
    });

    let remainder: f64 = remainder.iter().sum();
    sum.iter().sum::<f64>() + remainder
}

/// Arithmetic mean, NaN for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    fast_sum(values) / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;

    #[test]
    fn test_fast_sum() {
        let mut rng = StdRng::seed_from_u64(0);
        let v: Vec<f64> = (0..1037).map(|_| rng.gen::<f64>()).collect();
        let naive: f64 = v.iter().sum();
        assert!((fast_sum(&v) - naive).abs() < 1e-9);
        assert_eq!(fast_sum(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(fast_sum(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        let v = vec![1.0; 40];
        assert_eq!(mean(&v), 1.0);
        assert!(mean(&[]).is_nan());
        assert!(mean(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_validate_sample_count() {
        assert!(validate_sample_count(1, "n").is_ok());
        assert!(matches!(
            validate_sample_count(0, "n"),
            Err(CausalError::InvalidArgument(..))
        ));
    }

    #[test]
    fn test_validate_float_parameter() {
        assert!(validate_finite_parameter(-3.5, "x0").is_ok());
        assert!(validate_finite_parameter(f64::NAN, "x0").is_err());
        assert!(validate_finite_parameter(f64::INFINITY, "x0").is_err());
        assert!(validate_finite_parameter(f64::NEG_INFINITY, "x0").is_err());
        assert!(validate_non_negative_parameter(0.0, "noise").is_ok());
        assert!(validate_non_negative_parameter(-0.1, "noise").is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("outcome", &[1.0, 2.0]).is_ok());
        assert_eq!(
            ensure_finite("outcome", &[1.0, f64::INFINITY]),
            Err(CausalError::NumericAnomaly("outcome".to_string(), f64::INFINITY))
        );
    }

    #[test]
    fn test_fmt_vec_output() {
        assert_eq!(fmt_vec_output(&[1.0, 0.5]), "1.0000, 0.5000");
        assert_eq!(fmt_vec_output(&[]), "");
    }
}
