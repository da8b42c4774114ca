use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::channel::engine::DEFAULT_MULTIPLIER;
use crate::common::{
    channel_error::{ChannelError, Result},
    enums::PriceField,
    time::RAW_DATETIME_FORMAT,
};

/// About a century of calendar days
pub const MAX_WINDOW_DAYS: i64 = 36_525;

/// Channel analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelConfig {
    /// Band multiplier applied to the residual sigma
    pub k: f64,
    /// Trailing calendar window in days; `None` analyses every bar
    pub window_days: Option<i64>,
    pub price_field: PriceField,
    /// Widen inconsistent high/low bounds instead of rejecting the bar
    pub autofix: bool,
    pub delimiter: u8,
    pub has_header: bool,
    pub datetime_format: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_MULTIPLIER,
            window_days: Some(2),
            price_field: PriceField::Close,
            autofix: true,
            delimiter: b';',
            has_header: false,
            datetime_format: RAW_DATETIME_FORMAT.to_string(),
        }
    }
}

impl ChannelConfig {
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let price_field = match conf.get::<String>("price_field")? {
            Some(name) => PriceField::from_str(&name)
                .map_err(|_| ChannelError::Config(format!("unknown price_field {:?}", name)))?,
            None => default.price_field,
        };

        let delimiter = match conf.get::<String>("delimiter")? {
            Some(d) => parse_delimiter(&d)?,
            None => default.delimiter,
        };

        let config = Self {
            k: conf.get("k")?.unwrap_or(default.k),
            window_days: conf.get("window_days")?.unwrap_or(default.window_days),
            price_field,
            autofix: conf.get("autofix")?.unwrap_or(default.autofix),
            delimiter,
            has_header: conf.get("has_header")?.unwrap_or(default.has_header),
            datetime_format: conf
                .get("datetime_format")?
                .unwrap_or(default.datetime_format),
        };

        conf.check()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ChannelError::Config(format!("config is not a JSON object: {}", e)))?;
        Self::new(Some(map))
    }

    fn validate(&self) -> Result<()> {
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(ChannelError::InvalidMultiplier { k: self.k });
        }
        if let Some(days) = self.window_days {
            if !(1..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(ChannelError::Config(format!(
                    "window_days must be in 1..={}, got {}",
                    MAX_WINDOW_DAYS, days
                )));
            }
        }
        if self.datetime_format.is_empty() {
            return Err(ChannelError::Config("datetime_format is empty".to_string()));
        }
        Ok(())
    }
}

fn parse_delimiter(d: &str) -> Result<u8> {
    match d.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ChannelError::Config(format!(
            "delimiter must be a single ASCII character, got {:?}",
            d
        ))),
    }
}

/// Hands out config values by key and rejects whatever was never asked for.
struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.conf.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ChannelError::Config(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn check(&self) -> Result<()> {
        let mut unknown: Vec<&str> = self.conf.keys().map(String::as_str).collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort_unstable();
        Err(ChannelError::UnknownPara(unknown.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conf(value: serde_json::Value) -> Option<HashMap<String, serde_json::Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ChannelConfig::new(None).unwrap();
        assert_eq!(config, ChannelConfig::default());
        assert_eq!(config.k, 2.0);
        assert_eq!(config.window_days, Some(2));
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.datetime_format, "%Y%m%d %H%M%S");
    }

    #[test]
    fn test_overrides() {
        let config = ChannelConfig::new(conf(json!({
            "k": 1.5,
            "window_days": null,
            "price_field": "high",
            "autofix": false,
            "delimiter": ",",
            "has_header": true,
            "datetime_format": "%Y-%m-%d %H:%M:%S"
        })))
        .unwrap();
        assert_eq!(config.k, 1.5);
        assert_eq!(config.window_days, None);
        assert_eq!(config.price_field, PriceField::High);
        assert!(!config.autofix);
        assert_eq!(config.delimiter, b',');
        assert!(config.has_header);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ChannelConfig::new(conf(json!({"k": 2, "sigma": 1, "boll_n": 20}))).unwrap_err();
        assert_eq!(err, ChannelError::UnknownPara("boll_n, sigma".to_string()));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ChannelConfig::new(conf(json!({"k": -1.0}))),
            Err(ChannelError::InvalidMultiplier { .. })
        ));
        assert!(matches!(
            ChannelConfig::new(conf(json!({"k": "two"}))),
            Err(ChannelError::Config(_))
        ));
        assert!(ChannelConfig::new(conf(json!({"window_days": 0}))).is_err());
        assert!(matches!(
            ChannelConfig::new(conf(json!({"window_days": 100_000_000}))),
            Err(ChannelError::Config(_))
        ));
        assert_eq!(
            ChannelConfig::new(conf(json!({"window_days": MAX_WINDOW_DAYS})))
                .unwrap()
                .window_days,
            Some(MAX_WINDOW_DAYS)
        );
        assert!(ChannelConfig::new(conf(json!({"delimiter": ";;"}))).is_err());
        assert!(ChannelConfig::new(conf(json!({"price_field": "vwap"}))).is_err());
    }

    #[test]
    fn test_from_json_str() {
        let config = ChannelConfig::from_json_str(r#"{"window_days": 5}"#).unwrap();
        assert_eq!(config.window_days, Some(5));
        assert!(ChannelConfig::from_json_str("[1, 2]").is_err());
    }
}
