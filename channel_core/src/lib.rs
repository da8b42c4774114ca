pub mod analyzer;
pub mod channel;
pub mod common;
pub mod config;
pub mod kline;
pub mod math;

pub use analyzer::analyzer::{Analyzer, ChannelAnalysis};
pub use analyzer::report::ChannelReport;
pub use channel::engine::RegressionChannelEngine;
pub use channel::fit_result::{ChannelRow, FitResult};
pub use channel::observation::Observation;
pub use common::channel_error::{ChannelError, ErrCode};
pub use config::channel_config::ChannelConfig;
pub use kline::{kline_list::KLineList, kline_unit::KLineUnit};
