use probe_core::{
    Direction, EstimateError, EstimatorCfg, Monitor, RawSample, TargetPoint, TempUnit,
    TickStatus, Verdict,
};

fn heating_monitor(target: f64) -> Monitor {
    Monitor::builder()
        .with_direction(Direction::Heating)
        .with_target_temp(target)
        .build()
        .unwrap()
}

#[test]
fn first_sample_bootstraps_but_cannot_estimate() {
    let mut m = heating_monitor(60.0);
    let st = m.ingest(RawSample::valid(0.0, 20.0, 120.0));
    assert_eq!(
        st,
        TickStatus::NoEstimate(EstimateError::InsufficientData {
            samples: 1,
            required: 2
        })
    );
    assert_eq!(m.history().len(), 1);
    assert_eq!(m.target_point(), TargetPoint::default());
}

#[test]
fn target_point_follows_estimates() {
    let mut m = heating_monitor(60.0);
    let rows = [
        (0.0, 20.0, 120.0),
        (60.0, 30.0, 120.0),
        (120.0, 38.0, 119.0),
        (180.0, 45.0, 121.0),
    ];
    let mut last = None;
    for (t, i, e) in rows {
        last = Some(m.ingest(RawSample::valid(t, i, e)));
    }
    let f = match last {
        Some(TickStatus::Estimated(f)) => f,
        other => panic!("expected an estimate, got {other:?}"),
    };
    let tp = m.target_point();
    assert_eq!(tp.temperature, Some(60.0));
    assert_eq!(tp.time, Some(180.0 + f.remaining_s));
    assert!((f.remaining_s - 138.984_729_412_872_87).abs() < 1e-9);

    let stats = m.stats();
    assert_eq!(stats.accepted, 4);
    assert_eq!(stats.rejected, 0);
    assert_eq!(stats.estimates, 3);
    assert_eq!(stats.failures, 1);
}

#[test]
fn rejected_readings_do_not_touch_history() {
    let mut m = heating_monitor(60.0);
    m.ingest(RawSample::valid(0.0, 20.0, 120.0));
    assert_eq!(
        m.ingest(RawSample::valid(10.0, 20.0, 120.0)),
        TickStatus::Rejected(Verdict::Stale)
    );
    assert_eq!(
        m.ingest(RawSample::new(Some(20.0), None, Some(120.0))),
        TickStatus::Rejected(Verdict::Invalid)
    );
    assert_eq!(m.history().len(), 1);
    assert_eq!(m.stats().rejected, 2);
}

#[test]
fn retargeting_reprojects_existing_history() {
    let mut m = heating_monitor(60.0);
    assert!(m.set_target_temp(70.0).is_none());
    m.ingest(RawSample::valid(0.0, 20.0, 120.0));
    m.ingest(RawSample::valid(60.0, 30.0, 120.0));
    let near = m.target_point().time.unwrap();

    let Some(TickStatus::Estimated(f)) = m.set_target_temp(90.0) else {
        panic!("expected re-estimate");
    };
    assert_eq!(f.target_temp, 90.0);
    assert!(m.target_point().time.unwrap() > near);

    // Already past a low target.
    let Some(TickStatus::Estimated(f)) = m.set_target_temp(25.0) else {
        panic!("expected re-estimate");
    };
    assert!(f.is_done());
    assert_eq!(m.target_point().time, Some(60.0));
}

#[test]
fn min_samples_gates_estimation() {
    let mut m = Monitor::builder()
        .with_estimator_cfg(EstimatorCfg {
            direction: Direction::Heating,
            min_samples: 3,
            units: TempUnit::Celsius,
        })
        .with_target_temp(60.0)
        .build()
        .unwrap();
    m.ingest(RawSample::valid(0.0, 20.0, 120.0));
    assert_eq!(
        m.ingest(RawSample::valid(60.0, 30.0, 120.0)),
        TickStatus::NoEstimate(EstimateError::InsufficientData {
            samples: 2,
            required: 3
        })
    );
    assert!(matches!(
        m.ingest(RawSample::valid(120.0, 38.0, 120.0)),
        TickStatus::Estimated(_)
    ));
}

#[test]
fn reset_clears_run_state() {
    let mut m = heating_monitor(60.0);
    m.ingest(RawSample::valid(0.0, 20.0, 120.0));
    m.ingest(RawSample::valid(60.0, 30.0, 120.0));
    m.reset();
    assert!(m.history().is_empty());
    assert!(!m.target_point().is_set());
    assert_eq!(m.stats().accepted, 0);
    assert_eq!(m.target_temp(), 60.0);
}
