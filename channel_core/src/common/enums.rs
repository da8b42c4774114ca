use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which price of a bar feeds the regression
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
}

/// Where a value sits relative to the channel at its index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    Above,
    Inside,
    Below,
}

impl BandPosition {
    /// Bounds are inclusive.
    pub fn classify(value: f64, lower: f64, upper: f64) -> Self {
        if value > upper {
            Self::Above
        } else if value < lower {
            Self::Below
        } else {
            Self::Inside
        }
    }
}
