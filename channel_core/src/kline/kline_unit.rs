use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::{
    channel_error::{ChannelError, Result},
    enums::PriceField,
    time::Time,
};

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KLineUnit {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl KLineUnit {
    pub fn new(
        time: Time,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        autofix: bool,
    ) -> Result<Self> {
        let mut unit = Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        };
        unit.check(autofix)?;
        Ok(unit)
    }

    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    fn check(&mut self, autofix: bool) -> Result<()> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(ChannelError::KlDataInvalid(format!(
                "{} has non-finite price [open={}, high={}, low={}, close={}]",
                self.time, self.open, self.high, self.low, self.close
            )));
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if !autofix {
                return Err(ChannelError::KlDataInvalid(format!(
                    "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                    self.time, self.low, self.low, self.open, self.high, self.close
                )));
            }
            warn!(time = %self.time, low = self.low, fixed = min_price, "low price fixed");
            self.low = min_price;
        }

        if self.high < max_price {
            if !autofix {
                return Err(ChannelError::KlDataInvalid(format!(
                    "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                    self.time, self.high, self.low, self.open, self.high, self.close
                )));
            }
            warn!(time = %self.time, high = self.high, fixed = max_price, "high price fixed");
            self.high = max_price;
        }
        Ok(())
    }
}
