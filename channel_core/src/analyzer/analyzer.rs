use serde::Serialize;
use tracing::info;

use super::report::ChannelReport;
use crate::channel::{engine::RegressionChannelEngine, fit_result::FitResult};
use crate::common::channel_error::{ChannelError, Result};
use crate::config::channel_config::ChannelConfig;
use crate::kline::kline_list::KLineList;

/// Everything produced for one window: the bars, the fit and its summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelAnalysis {
    pub window: KLineList,
    pub fit: FitResult,
    pub report: ChannelReport,
}

/// 分析器: windows the bars, fits the channel and summarises it
#[derive(Debug, Clone)]
pub struct Analyzer {
    engine: RegressionChannelEngine,
    config: ChannelConfig,
}

impl Analyzer {
    pub fn new(config: ChannelConfig) -> Result<Self> {
        Ok(Self {
            engine: RegressionChannelEngine::new(config.k)?,
            config,
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn analyze(&self, klines: &KLineList) -> Result<ChannelAnalysis> {
        if klines.is_empty() {
            return Err(ChannelError::NoData("no bars to analyze".to_string()));
        }

        let window = klines.trailing_window(self.config.window_days);
        if let (Some(start), Some(end)) = (window.start_time(), window.end_time()) {
            info!(
                start = %start,
                end = %end,
                bars = window.len(),
                dropped = klines.len() - window.len(),
                "analysis window selected"
            );
        }

        let observations = window.observations(self.config.price_field);
        let fit = self.engine.run(&observations)?;
        let report = ChannelReport::new(&window, &fit);

        Ok(ChannelAnalysis {
            window,
            fit,
            report,
        })
    }
}
