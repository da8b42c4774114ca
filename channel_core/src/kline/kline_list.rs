use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::kline_unit::KLineUnit;
use crate::channel::observation::Observation;
use crate::common::{enums::PriceField, time::Time};

/// Bars kept in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KLineList {
    lst: Vec<KLineUnit>,
}

impl KLineList {
    pub fn new() -> Self {
        Self { lst: Vec::new() }
    }

    /// Stable sort, so bars sharing a timestamp keep their source order.
    pub fn from_units(mut units: Vec<KLineUnit>) -> Self {
        units.sort_by_key(|klu| klu.time);
        Self { lst: units }
    }

    pub fn first(&self) -> Option<&KLineUnit> {
        self.lst.first()
    }

    pub fn last(&self) -> Option<&KLineUnit> {
        self.lst.last()
    }

    pub fn len(&self) -> usize {
        self.lst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lst.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KLineUnit> {
        self.lst.iter()
    }

    pub fn start_time(&self) -> Option<Time> {
        self.first().map(|klu| klu.time)
    }

    pub fn end_time(&self) -> Option<Time> {
        self.last().map(|klu| klu.time)
    }

    /// Bars at or after `latest - days`; `None`, or a span reaching past the
    /// calendar's range, keeps everything.
    pub fn trailing_window(&self, days: Option<i64>) -> Self {
        let (Some(days), Some(latest)) = (days, self.end_time()) else {
            return self.clone();
        };
        let Some(cutoff) = latest.checked_minus_days(days) else {
            return self.clone();
        };
        let begin = self.lst.partition_point(|k| k.time < cutoff);
        Self {
            lst: self.lst[begin..].to_vec(),
        }
    }

    /// Contiguous zero-based observations of one price field.
    pub fn observations(&self, field: PriceField) -> Vec<Observation> {
        self.lst
            .iter()
            .enumerate()
            .map(|(index, klu)| Observation::new(index, klu.price(field)))
            .collect()
    }
}

impl Index<usize> for KLineList {
    type Output = KLineUnit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lst[index]
    }
}
