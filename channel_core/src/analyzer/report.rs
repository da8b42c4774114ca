use serde::Serialize;
use std::fmt;

use crate::channel::fit_result::FitResult;
use crate::common::{enums::BandPosition, time::Time};
use crate::kline::kline_list::KLineList;

/// Summary of one analysed window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub start: Option<Time>,
    pub end: Option<Time>,
    pub count: usize,
    pub slope: f64,
    pub intercept: f64,
    pub sigma: f64,
    pub r_squared: f64,
    pub k: f64,
    pub half_width: f64,
    pub last_value: f64,
    pub last_position: BandPosition,
    pub inside: usize,
    pub above: usize,
    pub below: usize,
}

impl ChannelReport {
    pub fn new(window: &KLineList, fit: &FitResult) -> Self {
        let (mut inside, mut above, mut below) = (0, 0, 0);
        for pos in 0..fit.len() {
            match fit.position(pos) {
                Some(BandPosition::Inside) => inside += 1,
                Some(BandPosition::Above) => above += 1,
                Some(BandPosition::Below) => below += 1,
                None => {}
            }
        }

        let last = fit.len().saturating_sub(1);
        Self {
            start: window.start_time(),
            end: window.end_time(),
            count: fit.len(),
            slope: fit.slope(),
            intercept: fit.intercept(),
            sigma: fit.sigma(),
            r_squared: fit.r_squared(),
            k: fit.k(),
            half_width: fit.half_width(),
            last_value: fit.values().get(last).copied().unwrap_or(f64::NAN),
            last_position: fit.position(last).unwrap_or(BandPosition::Inside),
            inside,
            above,
            below,
        }
    }

    /// Share of observations within the bands.
    pub fn inside_ratio(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.inside as f64 / self.count as f64
    }
}

fn fmt_time(t: &Option<Time>) -> String {
    t.map(|t| t.to_minute_str()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for ChannelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== OLS regression statistics ===")?;
        writeln!(f, "Period: {} - {}", fmt_time(&self.start), fmt_time(&self.end))?;
        writeln!(f, "Observations: {}", self.count)?;
        writeln!(f, "R-squared: {:.4}", self.r_squared)?;
        writeln!(f, "Sigma: {:.4}", self.sigma)?;
        writeln!(f, "Channel width ({}σ): ±{:.4}", self.k, self.half_width)?;
        writeln!(f, "Slope: {:.6}", self.slope)?;
        writeln!(f, "Intercept: {:.4}", self.intercept)?;
        writeln!(
            f,
            "Inside band: {}/{} ({:.1}%), above: {}, below: {}",
            self.inside,
            self.count,
            self.inside_ratio() * 100.0,
            self.above,
            self.below
        )?;
        write!(f, "Last value: {:.4} ({})", self.last_value, self.last_position)
    }
}
