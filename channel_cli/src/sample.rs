use channel_core::common::time::Time;
use channel_core::{ChannelError, KLineList, KLineUnit};

/// Parameters of the synthetic 1-minute series `base + drift * t + noise(t)`
#[derive(Debug, Clone, Copy)]
pub struct SampleSpec {
    pub n: usize,
    pub base: f64,
    pub drift: f64,
    pub noise_scale: f64,
    pub start: Time,
}

impl SampleSpec {
    pub fn new(n: usize, start: Time) -> Self {
        Self {
            n,
            base: 100.0,
            drift: 0.05,
            noise_scale: 1.0,
            start,
        }
    }

    pub fn value(&self, t: usize) -> f64 {
        self.base + self.drift * t as f64 + self.noise_scale * noise(t)
    }

    pub fn build(&self) -> Result<KLineList, ChannelError> {
        let units = (0..self.n)
            .map(|t| {
                let price = self.value(t);
                KLineUnit::new(
                    self.start.plus_minutes(t as i64),
                    price,
                    price,
                    price,
                    price,
                    0.0,
                    false,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KLineList::from_units(units))
    }
}

fn unit_hash(t: usize, j: usize) -> f64 {
    let x = (t as f64 * 12.9898 + j as f64 * 78.233).sin() * 43758.5453;
    x - x.floor()
}

/// Approximately standard normal: sum of twelve uniforms minus six.
fn noise(t: usize) -> f64 {
    (0..12).map(|j| unit_hash(t, j)).sum::<f64>() - 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(n: usize) -> SampleSpec {
        SampleSpec::new(n, Time::from_str("20240101 000000").unwrap())
    }

    #[test]
    fn test_sample_is_deterministic() {
        let a = spec(50).build().unwrap();
        let b = spec(50).build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a.end_time(), Some(Time::from_str("2024-01-01 00:49:00").unwrap()));
    }

    #[test]
    fn test_noise_is_bounded() {
        for t in 0..500 {
            let n = noise(t);
            assert!((-6.0..=6.0).contains(&n));
        }
    }
}
