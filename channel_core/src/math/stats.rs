use crate::common::channel_error::{ChannelError, Result};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from `center`.
pub fn sum_sq_dev(values: &[f64], center: f64) -> f64 {
    values.iter().map(|&x| (x - center).powi(2)).sum()
}

/// Bessel-corrected sample standard deviation: one pass for the mean, one
/// for the squared deviations, divided by `n - 1`.
pub fn sample_std(values: &[f64]) -> Result<f64> {
    let n = values.len();
    if n < 2 {
        return Err(ChannelError::DegenerateInput(format!(
            "sample standard deviation needs 2 values, got {}",
            n
        )));
    }
    let center = values.iter().sum::<f64>() / n as f64;
    Ok((sum_sq_dev(values, center) / (n - 1) as f64).sqrt())
}
