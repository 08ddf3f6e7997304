use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("number array is empty")]
pub struct EmptyError;

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean of `values`, left unrounded.
pub fn average(values: &[f64]) -> Result<f64, EmptyError> {
    if values.is_empty() {
        return Err(EmptyError);
    }

    Ok(sum(values) / values.len() as f64)
}

/// Rounds half away from zero to `decimals` places, so an average of -2.5
/// becomes -3 where JavaScript's `Math.round` would give -2.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_numbers() {
        assert_eq!(sum(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn averages_numbers() {
        assert_eq!(average(&[1.0, 2.0, 3.0]), Ok(2.0));
        assert_eq!(average(&[5.0]), Ok(5.0));
    }

    #[test]
    fn empty_average_is_an_error() {
        let err = average(&[]).unwrap_err();
        assert_eq!(err, EmptyError);
        assert_eq!(err.to_string(), "number array is empty");
    }

    #[test]
    fn rounds_to_decimals() {
        assert_eq!(round_to(9.6, 0), 10.0);
        assert_eq!(round_to(0.1372, 2), 0.14);
        assert_eq!(round_to(-2.4, 0), -2.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
