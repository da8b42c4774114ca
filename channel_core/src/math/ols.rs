use serde::{Deserialize, Serialize};

use crate::common::channel_error::{ChannelError, Result};

/// Simple linear model `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Closed-form least squares on paired samples.
    ///
    /// The first pass accumulates the two sums for the means, the second the
    /// centred cross products `Sxx` and `Sxy`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ChannelError::DegenerateInput(format!(
                "x and y lengths differ: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        if n < 2 {
            return Err(ChannelError::InsufficientData { n });
        }

        let (sum_x, sum_y) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0), |(sx, sy), (&xi, &yi)| (sx + xi, sy + yi));
        let mean_x = sum_x / n as f64;
        let mean_y = sum_y / n as f64;

        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - mean_x;
            (sxx + dx * dx, sxy + dx * (yi - mean_y))
        });

        if sxx == 0.0 {
            return Err(ChannelError::DegenerateInput(
                "explanatory variable has zero variance".to_string(),
            ));
        }

        let slope = sxy / sxx;
        Ok(Self {
            intercept: mean_y - slope * mean_x,
            slope,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
