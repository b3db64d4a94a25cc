//! Command bodies: replay a probe log through a `Monitor` and report.

use crate::cli::RunArgs;
use eyre::{Result, WrapErr};
use probe_core::{
    EstimateError, EstimatorCfg, Forecast, Monitor, RawSample, TempUnit, TickStatus, Verdict,
};
use serde_json::json;

pub fn verdict_name(v: Verdict) -> &'static str {
    match v {
        Verdict::Bootstrap => "bootstrap",
        Verdict::Accepted => "accepted",
        Verdict::Invalid => "invalid",
        Verdict::Stale => "stale",
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Fold command-line overrides into the estimator section. A `--preset`
/// beats a `target_temp` from the file; `--target` beats everything.
pub fn apply_overrides(cfg: &mut probe_config::EstimatorCfg, args: &RunArgs) {
    if let Some(d) = args.direction {
        cfg.direction = d.into();
    }
    if let Some(u) = args.units {
        cfg.units = u.into();
    }
    if let Some(p) = args.preset {
        cfg.preset = Some(p.into());
        cfg.target_temp = None;
    }
    if let Some(t) = args.target {
        cfg.target_temp = Some(t);
    }
}

/// Monitor wired from the (already overridden) estimator section.
pub fn build_monitor(section: &probe_config::EstimatorCfg, capacity: usize) -> Result<Monitor> {
    let builder = Monitor::builder()
        .with_estimator_cfg(EstimatorCfg::from(section))
        .with_capacity(capacity);
    match EstimatorCfg::resolve_target(section) {
        Some(t) => builder.with_target_temp(t).build(),
        None => builder.try_build(),
    }
}

fn load_rows(args: &RunArgs) -> Result<Vec<RawSample>> {
    let rows = probe_config::load_probe_log(&args.log)
        .wrap_err_with(|| format!("load probe log {}", args.log.display()))?;
    Ok(rows.into_iter().map(RawSample::from).collect())
}

fn forecast_json(f: &Forecast, monitor: &Monitor) -> serde_json::Value {
    let stats = monitor.stats();
    json!({
        "timestamp": unix_timestamp(),
        "remaining_s": f.remaining_s,
        "done_at_s": f.done_at(),
        "target_temp": f.target_temp,
        "units": monitor.cfg().units,
        "direction": monitor.direction(),
        "ambient": f.ambient,
        "rate_constant": f.fit.map(|fit| fit.rate_constant),
        "points_used": f.fit.map(|fit| fit.points_used),
        "points_dropped": f.fit.map(|fit| fit.points_dropped),
        "samples": monitor.history().len(),
        "rejected": stats.rejected,
    })
}

fn print_forecast(f: &Forecast, unit: TempUnit) {
    let sym = unit.symbol();
    if f.is_done() {
        println!(
            "Target {:.2} {sym} already reached at t={:.1} s",
            f.target_temp, f.last_time
        );
        return;
    }
    println!(
        "Estimated remaining: {:.1} s (done at t={:.1} s, target {:.2} {sym})",
        f.remaining_s,
        f.done_at(),
        f.target_temp
    );
    if let Some(fit) = f.fit {
        println!(
            "Rate constant k={:.6} /s, ambient {:.2} {sym}, points used {}, dropped {}",
            fit.rate_constant, f.ambient, fit.points_used, fit.points_dropped
        );
    }
}

/// Replay the whole log; succeed only if the last admitted reading produced an estimate.
pub fn run_estimate(cfg: probe_config::Config, args: &RunArgs, json_mode: bool) -> Result<()> {
    let mut section = cfg.estimator;
    apply_overrides(&mut section, args);
    let raws = load_rows(args)?;
    let mut monitor = build_monitor(&section, raws.len())?;

    tracing::info!(
        log = %args.log.display(),
        rows = raws.len(),
        target = monitor.target_temp(),
        direction = %monitor.direction(),
        "estimate start"
    );

    let mut last: Option<std::result::Result<Forecast, EstimateError>> = None;
    for raw in raws {
        match monitor.ingest(raw) {
            TickStatus::Rejected(_) => {}
            TickStatus::Estimated(f) => last = Some(Ok(f)),
            TickStatus::NoEstimate(e) => last = Some(Err(e)),
        }
    }

    let stats = monitor.stats();
    tracing::info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        estimates = stats.estimates,
        "estimate done"
    );

    let forecast = match last {
        Some(Ok(f)) => f,
        Some(Err(e)) => return Err(eyre::Report::new(e)),
        None => {
            return Err(eyre::Report::new(EstimateError::InsufficientData {
                samples: 0,
                required: monitor.cfg().min_samples.max(2),
            }));
        }
    };

    if json_mode {
        println!("{}", forecast_json(&forecast, &monitor));
    } else {
        print_forecast(&forecast, monitor.cfg().units);
    }
    Ok(())
}

/// Replay the log printing every tick. Per-tick estimate failures are
/// reported inline, never fatal.
pub fn run_replay(cfg: probe_config::Config, args: &RunArgs, json_mode: bool) -> Result<()> {
    let mut section = cfg.estimator;
    apply_overrides(&mut section, args);
    let raws = load_rows(args)?;
    let mut monitor = build_monitor(&section, raws.len())?;
    let sym = monitor.cfg().units.symbol();

    tracing::info!(log = %args.log.display(), rows = raws.len(), "replay start");

    for raw in raws {
        let status = monitor.ingest(raw);
        if json_mode {
            let line = match &status {
                TickStatus::Rejected(v) => json!({
                    "time": raw.time,
                    "internal": raw.internal,
                    "external": raw.external,
                    "status": "rejected",
                    "verdict": verdict_name(*v),
                }),
                TickStatus::Estimated(f) => json!({
                    "time": raw.time,
                    "internal": raw.internal,
                    "external": raw.external,
                    "status": "estimated",
                    "remaining_s": f.remaining_s,
                    "done_at_s": f.done_at(),
                    "rate_constant": f.fit.map(|fit| fit.rate_constant),
                }),
                TickStatus::NoEstimate(e) => json!({
                    "time": raw.time,
                    "internal": raw.internal,
                    "external": raw.external,
                    "status": "no_estimate",
                    "error": e.kind(),
                }),
            };
            println!("{line}");
            continue;
        }

        let t = raw
            .time
            .map_or_else(|| "N/A".to_string(), |t| format!("{t:.1}"));
        match status {
            TickStatus::Rejected(v) => println!("t={t} rejected ({})", verdict_name(v)),
            TickStatus::Estimated(f) if f.is_done() => {
                println!("t={t} target {:.2} {sym} reached", f.target_temp);
            }
            TickStatus::Estimated(f) => println!(
                "t={t} remaining {:.1} s (done at {:.1} s)",
                f.remaining_s,
                f.done_at()
            ),
            TickStatus::NoEstimate(e) => println!("t={t} no estimate: {e}"),
        }
    }

    let stats = monitor.stats();
    if json_mode {
        println!("{}", json!({ "stats": stats, "target_point": monitor.target_point() }));
    } else {
        println!(
            "Replayed: {} accepted, {} rejected, {} estimates, {} without estimate",
            stats.accepted, stats.rejected, stats.estimates, stats.failures
        );
    }
    Ok(())
}

/// Load-and-validate already happened in `main`; summarise what was resolved.
pub fn run_check_config(cfg: &probe_config::Config, json_mode: bool) -> Result<()> {
    let core = EstimatorCfg::from(&cfg.estimator);
    let target = EstimatorCfg::resolve_target(&cfg.estimator);
    if json_mode {
        println!(
            "{}",
            json!({
                "ok": true,
                "direction": core.direction,
                "units": core.units,
                "target_temp": target,
                "min_samples": core.min_samples,
            })
        );
    } else {
        let target = target.map_or_else(
            || "unset".to_string(),
            |t| format!("{t:.2} {}", core.units.symbol()),
        );
        println!(
            "Config OK: direction={}, target={target}, min_samples={}",
            core.direction, core.min_samples
        );
    }
    Ok(())
}
