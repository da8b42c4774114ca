use channel_core::{ChannelError, FitResult, Observation, RegressionChannelEngine};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * (1.0 + a.abs().max(b.abs()))
}

fn fit(points: &[(usize, f64)], k: f64) -> Result<FitResult, ChannelError> {
    let obs: Vec<Observation> = points.iter().map(|&p| Observation::from(p)).collect();
    RegressionChannelEngine::fit(&obs, k)
}

/// Deterministic trending series with bounded jitter.
fn synthetic(n: usize) -> Vec<f64> {
    (0..n)
        .map(|t| {
            let t = t as f64;
            100.0 + 0.05 * t + (t * 0.7).sin() + 0.3 * (t * 2.3).cos()
        })
        .collect()
}

#[test]
fn outputs_are_aligned_with_input() {
    let values = synthetic(200);
    let fit = RegressionChannelEngine::fit_values(&values, 2.0).unwrap();
    assert_eq!(fit.len(), values.len());
    assert_eq!(fit.fitted().len(), values.len());
    assert_eq!(fit.residual().len(), values.len());
    assert_eq!(fit.upper_band().len(), values.len());
    assert_eq!(fit.lower_band().len(), values.len());
    assert_eq!(fit.values(), values.as_slice());
}

#[test]
fn bands_are_symmetric_around_fitted_line() {
    let fit = RegressionChannelEngine::fit_values(&synthetic(150), 2.0).unwrap();
    let offset = fit.k() * fit.sigma();
    for row in fit.rows() {
        assert!(close(row.upper - row.fitted, offset));
        assert!(close(row.fitted - row.lower, offset));
        assert!(row.upper >= row.fitted && row.fitted >= row.lower);
        assert!(close(row.residual, row.value - row.fitted));
    }
}

#[test]
fn sigma_is_non_negative_and_zero_only_for_exact_lines() {
    let noisy = RegressionChannelEngine::fit_values(&synthetic(50), 2.0).unwrap();
    assert!(noisy.sigma() > 0.0);

    let line: Vec<f64> = (0..50).map(|i| 3.0 - 0.5 * i as f64).collect();
    let exact = RegressionChannelEngine::fit_values(&line, 2.0).unwrap();
    assert!(exact.sigma() >= 0.0);
    assert!(exact.sigma() < 1e-9);
    assert!(close(exact.slope(), -0.5));
    assert!(close(exact.intercept(), 3.0));
}

#[test]
fn repeated_fits_are_bit_identical() {
    let values = synthetic(300);
    let a = RegressionChannelEngine::fit_values(&values, 1.5).unwrap();
    let b = RegressionChannelEngine::fit_values(&values, 1.5).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.sigma().to_bits(), b.sigma().to_bits());
    assert_eq!(a.slope().to_bits(), b.slope().to_bits());
}

#[test]
fn scaling_values_scales_the_channel() {
    let values = synthetic(120);
    let c = 3.5;
    let scaled: Vec<f64> = values.iter().map(|v| v * c).collect();
    let base = RegressionChannelEngine::fit_values(&values, 2.0).unwrap();
    let big = RegressionChannelEngine::fit_values(&scaled, 2.0).unwrap();

    assert!(close(big.slope(), c * base.slope()));
    assert!(close(big.intercept(), c * base.intercept()));
    assert!(close(big.sigma(), c * base.sigma()));
    assert!(close(big.r_squared(), base.r_squared()));
    for (b, s) in base.rows().zip(big.rows()) {
        assert!(close(s.fitted, c * b.fitted));
        assert!(close(s.upper, c * b.upper));
        assert!(close(s.lower, c * b.lower));
    }
}

#[test]
fn two_points_give_an_exact_line() {
    let fit = fit(&[(0, 10.0), (1, 14.0)], 2.0).unwrap();
    assert!(close(fit.slope(), 4.0));
    assert!(close(fit.intercept(), 10.0));
    assert!(fit.residual().iter().all(|r| r.abs() < EPS));
    assert!(fit.sigma() < EPS);
    assert!(close(fit.r_squared(), 1.0));
}

#[test]
fn linear_scenario() {
    let fit = fit(&[(0, 100.0), (1, 101.0), (2, 102.0), (3, 103.0)], 2.0).unwrap();
    assert_eq!(fit.slope(), 1.0);
    assert_eq!(fit.intercept(), 100.0);
    assert!(fit.residual().iter().all(|&r| r == 0.0));
    assert_eq!(fit.sigma(), 0.0);
    let expected = [100.0, 101.0, 102.0, 103.0];
    assert_eq!(fit.fitted(), &expected);
    assert_eq!(fit.upper_band(), &expected);
    assert_eq!(fit.lower_band(), &expected);
}

#[test]
fn noisy_scenario() {
    let fit = fit(&[(0, 100.0), (1, 102.0), (2, 99.0), (3, 105.0)], 1.0).unwrap();
    assert!(fit.slope() > 0.0);
    assert!(fit.fitted().windows(2).all(|w| w[1] > w[0]));

    let residual: Vec<f64> = fit
        .values()
        .iter()
        .zip(fit.fitted())
        .map(|(v, f)| v - f)
        .collect();
    let mean = residual.iter().sum::<f64>() / 4.0;
    let var = residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;
    assert!(close(fit.sigma(), var.sqrt()));
    assert!(close(fit.sigma(), 4.6f64.sqrt()));

    for row in fit.rows() {
        assert!(close(row.upper - row.lower, 2.0 * fit.sigma()));
    }
    // SSR = 13.8, SST = 21
    assert!(close(fit.r_squared(), 1.0 - 13.8 / 21.0));
}

#[test]
fn failure_scenarios() {
    assert_eq!(
        fit(&[(0, 1.0)], 2.0).unwrap_err(),
        ChannelError::InsufficientData { n: 1 }
    );
    assert_eq!(
        fit(&[], 2.0).unwrap_err(),
        ChannelError::InsufficientData { n: 0 }
    );
    assert!(matches!(
        fit(&[(0, 1.0), (1, 2.0)], -1.0),
        Err(ChannelError::InvalidMultiplier { .. })
    ));
    assert!(matches!(
        fit(&[(0, 1.0), (1, 2.0)], f64::NAN),
        Err(ChannelError::InvalidMultiplier { .. })
    ));
    assert!(matches!(
        fit(&[(0, 1.0), (0, 2.0), (1, 3.0)], 2.0),
        Err(ChannelError::NonMonotonicIndex { .. })
    ));
}

#[test]
fn non_finite_values_are_rejected() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = RegressionChannelEngine::fit_values(&[1.0, bad, 3.0], 2.0).unwrap_err();
        assert!(matches!(err, ChannelError::DegenerateInput(_)));
        assert!(err.to_string().contains("position 1"));
    }

    let engine = RegressionChannelEngine::default();
    assert!(matches!(
        engine.run_values(&[f64::NAN, 1.0]),
        Err(ChannelError::DegenerateInput(_))
    ));
    assert!(matches!(
        fit(&[(0, 1.0), (2, f64::INFINITY)], 1.0),
        Err(ChannelError::DegenerateInput(_))
    ));
}
