use tracing::debug;

use super::fit_result::FitResult;
use super::observation::Observation;
use crate::common::channel_error::{ChannelError, Result};
use crate::math::{ols::LinearFit, stats};

pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Fits an OLS trend line over indexed observations and derives the
/// `k * sigma` bands around it.
///
/// The engine only holds a validated default multiplier; every fit is a pure
/// function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionChannelEngine {
    k: f64,
}

impl Default for RegressionChannelEngine {
    fn default() -> Self {
        Self {
            k: DEFAULT_MULTIPLIER,
        }
    }
}

impl RegressionChannelEngine {
    pub fn new(k: f64) -> Result<Self> {
        check_multiplier(k)?;
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn run(&self, observations: &[Observation]) -> Result<FitResult> {
        Self::fit(observations, self.k)
    }

    pub fn run_values(&self, values: &[f64]) -> Result<FitResult> {
        Self::fit_values(values, self.k)
    }

    /// Index the values `0..n` and fit them.
    pub fn fit_values(values: &[f64], k: f64) -> Result<FitResult> {
        Self::fit(&Observation::from_values(values), k)
    }

    pub fn fit(observations: &[Observation], k: f64) -> Result<FitResult> {
        check_multiplier(k)?;
        let n = observations.len();
        if n < 2 {
            return Err(ChannelError::InsufficientData { n });
        }
        check_indices(observations)?;
        check_values(observations)?;

        let indices: Vec<usize> = observations.iter().map(|o| o.index).collect();
        let x: Vec<f64> = indices.iter().map(|&i| i as f64).collect();
        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();

        let line = LinearFit::fit(&x, &values)?;
        let fitted: Vec<f64> = x.iter().map(|&xi| line.predict(xi)).collect();
        let residual: Vec<f64> = values
            .iter()
            .zip(&fitted)
            .map(|(v, f)| v - f)
            .collect();

        let sigma = stats::sample_std(&residual)?;

        let ssr: f64 = residual.iter().map(|r| r * r).sum();
        let mean_value = stats::mean(&values)
            .ok_or_else(|| ChannelError::DegenerateInput("empty value sequence".to_string()))?;
        let sst = stats::sum_sq_dev(&values, mean_value);
        // constant series: the flat line is a perfect fit
        let r_squared = if sst == 0.0 { 1.0 } else { 1.0 - ssr / sst };

        debug!(
            n,
            slope = line.slope,
            intercept = line.intercept,
            sigma,
            r_squared,
            k,
            "fitted regression channel"
        );

        Ok(FitResult::new(
            line.intercept,
            line.slope,
            sigma,
            r_squared,
            k,
            indices,
            values,
            fitted,
            residual,
        ))
    }
}

fn check_multiplier(k: f64) -> Result<()> {
    if !k.is_finite() || k < 0.0 {
        return Err(ChannelError::InvalidMultiplier { k });
    }
    Ok(())
}

fn check_indices(observations: &[Observation]) -> Result<()> {
    for (pos, pair) in observations.windows(2).enumerate() {
        if pair[1].index <= pair[0].index {
            return Err(ChannelError::NonMonotonicIndex {
                position: pos + 1,
                previous: pair[0].index,
                index: pair[1].index,
            });
        }
    }
    Ok(())
}

fn check_values(observations: &[Observation]) -> Result<()> {
    match observations.iter().position(|o| !o.value.is_finite()) {
        Some(pos) => Err(ChannelError::DegenerateInput(format!(
            "non-finite value {} at position {}",
            observations[pos].value, pos
        ))),
        None => Ok(()),
    }
}
