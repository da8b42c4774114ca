use serde::Serialize;

use crate::common::enums::BandPosition;

/// Per-point view of a [`FitResult`], used for export and plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelRow {
    pub index: usize,
    pub value: f64,
    pub fitted: f64,
    pub residual: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Result of one channel fit.
///
/// All per-point vectors share the input's length and ordering. Fields are
/// read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    intercept: f64,
    slope: f64,
    sigma: f64,
    r_squared: f64,
    k: f64,
    indices: Vec<usize>,
    values: Vec<f64>,
    fitted: Vec<f64>,
    residual: Vec<f64>,
    upper_band: Vec<f64>,
    lower_band: Vec<f64>,
}

impl FitResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        intercept: f64,
        slope: f64,
        sigma: f64,
        r_squared: f64,
        k: f64,
        indices: Vec<usize>,
        values: Vec<f64>,
        fitted: Vec<f64>,
        residual: Vec<f64>,
    ) -> Self {
        let offset = k * sigma;
        let upper_band = fitted.iter().map(|f| f + offset).collect();
        let lower_band = fitted.iter().map(|f| f - offset).collect();
        Self {
            intercept,
            slope,
            sigma,
            r_squared,
            k,
            indices,
            values,
            fitted,
            residual,
            upper_band,
            lower_band,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Sample standard deviation of the residuals.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// Distance from the center line to either band, `k * sigma`.
    pub fn half_width(&self) -> f64 {
        self.k * self.sigma
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The input values, passed through for overlay plotting.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    pub fn residual(&self) -> &[f64] {
        &self.residual
    }

    pub fn upper_band(&self) -> &[f64] {
        &self.upper_band
    }

    pub fn lower_band(&self) -> &[f64] {
        &self.lower_band
    }

    pub fn len(&self) -> usize {
        self.fitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fitted.is_empty()
    }

    pub fn row(&self, pos: usize) -> Option<ChannelRow> {
        if pos >= self.len() {
            return None;
        }
        Some(ChannelRow {
            index: self.indices[pos],
            value: self.values[pos],
            fitted: self.fitted[pos],
            residual: self.residual[pos],
            upper: self.upper_band[pos],
            lower: self.lower_band[pos],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = ChannelRow> + '_ {
        (0..self.len()).filter_map(move |pos| self.row(pos))
    }

    pub fn position(&self, pos: usize) -> Option<BandPosition> {
        self.row(pos)
            .map(|row| BandPosition::classify(row.value, row.lower, row.upper))
    }
}
