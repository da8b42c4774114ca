use serde::{Deserialize, Serialize};

/// One point of the analysed series: zero-based position and measured value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub index: usize,
    pub value: f64,
}

impl Observation {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }

    /// Assign the contiguous indices `0..n` in order.
    pub fn from_values(values: &[f64]) -> Vec<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Self { index, value })
            .collect()
    }
}

impl From<(usize, f64)> for Observation {
    fn from((index, value): (usize, f64)) -> Self {
        Self { index, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values() {
        let obs = Observation::from_values(&[3.0, 1.0, 2.0]);
        assert_eq!(
            obs,
            vec![
                Observation::new(0, 3.0),
                Observation::new(1, 1.0),
                Observation::new(2, 2.0),
            ]
        );
        assert_eq!(Observation::from((4, 9.5)), Observation::new(4, 9.5));
    }
}
