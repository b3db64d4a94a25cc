use probe_core::{
    DecayEstimator, DegenerateReason, Direction, EstimateError, History, Sample,
};
use rstest::rstest;

fn hist(rows: &[(f64, f64, f64)]) -> History {
    rows.iter()
        .map(|&(t, i, e)| Sample::new(t, i, e))
        .collect()
}

/// T(t) = 20 + 80·exp(−0.01·t), sampled every 10 s for 10 points.
fn synthetic_cooling() -> History {
    (0..10)
        .map(|i| {
            let t = f64::from(i) * 10.0;
            Sample::new(t, 20.0 + 80.0 * (-0.01 * t).exp(), 20.0)
        })
        .collect()
}

#[rstest]
#[case(0)]
#[case(1)]
fn fewer_than_two_samples_is_insufficient_data(#[case] n: usize) {
    let h: History = (0..n)
        .map(|i| Sample::new(i as f64, 20.0, 100.0))
        .collect();
    let err = DecayEstimator::new(Direction::Heating)
        .estimate(&h, 60.0)
        .expect_err("needs two samples");
    assert_eq!(
        err,
        EstimateError::InsufficientData {
            samples: n,
            required: 2
        }
    );
}

#[rstest]
#[case(&[(0.0, 20.0, 120.0), (60.0, 61.0, 120.0)], 60.0)]
#[case(&[(0.0, 20.0, 120.0), (60.0, 40.0, 120.0), (120.0, 60.0, 120.0)], 60.0)]
// Noisy history the fit could never use: the short-circuit still wins.
#[case(&[(0.0, 200.0, 120.0), (0.0, 10.0, 5.0), (0.0, 90.0, 300.0)], 80.0)]
fn heating_already_done_returns_exact_zero(#[case] rows: &[(f64, f64, f64)], #[case] target: f64) {
    let h = hist(rows);
    let est = DecayEstimator::new(Direction::Heating);
    assert_eq!(est.estimate(&h, target), Ok(0.0));
    let f = est.forecast(&h, target).unwrap();
    assert!(f.fit.is_none());
    assert!(f.is_done());
}

#[test]
fn cooling_already_done_when_at_or_below_target() {
    let h = hist(&[(0.0, 100.0, 20.0), (30.0, 70.0, 20.0)]);
    assert_eq!(
        DecayEstimator::new(Direction::Cooling).estimate(&h, 70.0),
        Ok(0.0)
    );
}

#[test]
fn recovers_rate_constant_from_noise_free_model() {
    let h = synthetic_cooling();
    let est = DecayEstimator::new(Direction::Cooling);

    let fit = est.fit(&h).unwrap();
    assert!((fit.rate_constant - 0.01).abs() < 1e-6, "k={}", fit.rate_constant);
    assert!(fit.intercept.abs() < 1e-9);
    assert_eq!(fit.points_used, 10);
    assert_eq!(fit.points_dropped, 0);

    // Closed-form inverse: t_done = −ln((30 − 20) / (100 − 20)) / 0.01
    let expected_t_done = -((30.0f64 - 20.0) / 80.0).ln() / 0.01;
    let t_done = fit.elapsed_to_reach(30.0, 20.0).unwrap();
    assert!((t_done - expected_t_done).abs() < 1e-6);

    let remaining = est.estimate(&h, 30.0).unwrap();
    assert!((remaining - (expected_t_done - 90.0)).abs() < 1e-6);
}

#[test]
fn cooling_rejects_a_body_heating_away_from_ambient() {
    // Rising internal series above a lower ambient.
    let h = hist(&[
        (0.0, 30.0, 20.0),
        (60.0, 40.0, 20.0),
        (120.0, 50.0, 20.0),
        (180.0, 60.0, 20.0),
    ]);
    let err = DecayEstimator::new(Direction::Cooling)
        .estimate(&h, 25.0)
        .expect_err("must not produce a number");
    assert!(matches!(
        err,
        EstimateError::DegenerateFit(_) | EstimateError::UnreachableTarget { .. }
    ));
}

#[test]
fn cooling_target_beyond_ambient_is_unreachable() {
    // The last reading dips below ambient and is dropped from the fit; the
    // 80° target lies on the far side of the 90° ambient.
    let h = hist(&[
        (0.0, 100.0, 90.0),
        (60.0, 95.0, 90.0),
        (120.0, 91.0, 90.0),
        (180.0, 88.0, 90.0),
    ]);
    let est = DecayEstimator::new(Direction::Cooling);
    let fit = est.fit(&h).unwrap();
    assert_eq!(fit.points_used, 3);
    assert_eq!(fit.points_dropped, 1);
    assert!((fit.rate_constant - 0.019_188_209_108_283_713).abs() < 1e-12);
    assert_eq!(
        est.estimate(&h, 80.0),
        Err(EstimateError::UnreachableTarget {
            target: 80.0,
            ambient: 90.0,
            initial: 100.0
        })
    );
}

#[rstest]
#[case(
    Direction::Heating,
    &[(0.0, 20.0, 120.0), (60.0, 30.0, 120.0), (120.0, 38.0, 119.0), (180.0, 45.0, 121.0)],
    60.0,
    138.984_729_412_872_87
)]
#[case(
    Direction::Cooling,
    &[(0.0, 100.0, 20.0), (60.0, 95.0, 20.0), (120.0, 91.0, 20.0), (180.0, 88.0, 20.0)],
    60.0,
    586.805_175_803_737_6
)]
fn regression_fixtures(
    #[case] direction: Direction,
    #[case] rows: &[(f64, f64, f64)],
    #[case] target: f64,
    #[case] expected: f64,
) {
    let remaining = DecayEstimator::new(direction)
        .estimate(&hist(rows), target)
        .unwrap();
    assert!(remaining.is_finite() && remaining > 0.0);
    assert!(
        (remaining - expected).abs() < 1e-9,
        "remaining={remaining} expected={expected}"
    );
}

#[test]
fn identical_elapsed_times_are_degenerate() {
    let h = hist(&[(5.0, 20.0, 100.0), (5.0, 30.0, 100.0), (5.0, 40.0, 100.0)]);
    assert_eq!(
        DecayEstimator::new(Direction::Heating).estimate(&h, 60.0),
        Err(EstimateError::DegenerateFit(
            DegenerateReason::ZeroTimeVariance
        ))
    );
}

#[test]
fn probe_falling_away_from_hotter_ambient_has_non_positive_rate() {
    let h = hist(&[(0.0, 40.0, 100.0), (10.0, 38.0, 100.0), (20.0, 35.0, 100.0)]);
    let err = DecayEstimator::new(Direction::Heating)
        .estimate(&h, 60.0)
        .unwrap_err();
    match err {
        EstimateError::DegenerateFit(DegenerateReason::NonPositiveRate(k)) => assert!(k <= 0.0),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn wrong_side_of_ambient_leaves_too_few_points() {
    // Heating expects internal below ambient; every sample sits above it.
    let h = hist(&[(0.0, 50.0, 20.0), (10.0, 45.0, 20.0), (20.0, 41.0, 20.0)]);
    assert_eq!(
        DecayEstimator::new(Direction::Heating).estimate(&h, 60.0),
        Err(EstimateError::InsufficientValidPoints {
            valid: 0,
            dropped: 3
        })
    );
}

#[test]
fn model_crossing_before_latest_sample_clamps_to_zero() {
    // Exact heating curve, then a low final reading still under the target.
    let mut rows: Vec<(f64, f64, f64)> = (0..10)
        .map(|i| {
            let t = f64::from(i) * 10.0;
            (t, 100.0 - 80.0 * (-0.01 * t).exp(), 100.0)
        })
        .collect();
    rows.push((100.0, 55.0, 100.0));
    let f = DecayEstimator::new(Direction::Heating)
        .forecast(&hist(&rows), 60.0)
        .unwrap();
    assert_eq!(f.remaining_s, 0.0);
    assert!(f.fit.is_some());
    assert_eq!(f.done_at(), 100.0);
}

#[test]
fn estimate_does_not_depend_on_previous_calls() {
    let h = synthetic_cooling();
    let est = DecayEstimator::new(Direction::Cooling);
    let a = est.estimate(&h, 30.0).unwrap();
    let _ = est.estimate(&hist(&[(0.0, 1.0, 0.0), (1.0, 0.5, 0.0)]), 0.1);
    let b = est.estimate(&h, 30.0).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}
