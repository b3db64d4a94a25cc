//! Owns the history buffer and composes validator and estimator per tick.
//!
//! Control flow for each raw reading:
//! validate → append (if accepted) → estimate → update the target point.
//! A failed estimate leaves the target point untouched.

use std::marker::PhantomData;

use serde::Serialize;

use crate::config::EstimatorCfg;
use crate::error::{BuildError, EstimateError, Result};
use crate::estimator::{DecayEstimator, Direction, Forecast};
use crate::sample::{History, RawSample};
use crate::validator::{SampleValidator, Verdict};

/// Projected completion point for a chart: `(done-at time, target temperature)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TargetPoint {
    pub time: Option<f64>,
    pub temperature: Option<f64>,
}

impl TargetPoint {
    pub fn is_set(&self) -> bool {
        self.time.is_some() && self.temperature.is_some()
    }
}

/// Outcome of feeding one raw reading.
#[derive(Debug, Clone, PartialEq)]
pub enum TickStatus {
    /// Reading not admitted; history unchanged.
    Rejected(Verdict),
    /// Reading admitted and an estimate produced.
    Estimated(Forecast),
    /// Reading admitted but no estimate this tick.
    NoEstimate(EstimateError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub accepted: usize,
    pub rejected: usize,
    pub estimates: usize,
    pub failures: usize,
}

pub struct Monitor {
    validator: SampleValidator,
    estimator: DecayEstimator,
    cfg: EstimatorCfg,
    target_temp: f64,
    history: History,
    target_point: TargetPoint,
    stats: MonitorStats,
}

impl core::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("direction", &self.estimator.direction())
            .field("target_temp", &self.target_temp)
            .field("samples", &self.history.len())
            .field("target_point", &self.target_point)
            .finish()
    }
}

impl Monitor {
    /// Start building a Monitor.
    pub fn builder() -> MonitorBuilder<Missing> {
        MonitorBuilder::default()
    }

    /// Feed one raw reading.
    pub fn ingest(&mut self, raw: RawSample) -> TickStatus {
        let verdict = self.validator.verdict(&self.history, &raw);
        let sample = match raw.to_sample() {
            Some(s) if verdict.is_accepted() => s,
            _ => {
                self.stats.rejected += 1;
                tracing::debug!(?verdict, ?raw, "sample rejected");
                return TickStatus::Rejected(verdict);
            }
        };
        self.history.push(sample);
        self.stats.accepted += 1;
        self.reestimate()
    }

    /// Change the target and re-project against the current history.
    /// `None` when there is nothing to estimate from yet.
    pub fn set_target_temp(&mut self, target_temp: f64) -> Option<TickStatus> {
        self.target_temp = target_temp;
        if self.history.is_empty() {
            return None;
        }
        Some(self.reestimate())
    }

    /// Drop all history and the target point; keeps configuration.
    pub fn reset(&mut self) {
        self.history.clear();
        self.target_point = TargetPoint::default();
        self.stats = MonitorStats::default();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn target_point(&self) -> TargetPoint {
        self.target_point
    }

    pub fn target_temp(&self) -> f64 {
        self.target_temp
    }

    pub fn direction(&self) -> Direction {
        self.estimator.direction()
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn cfg(&self) -> &EstimatorCfg {
        &self.cfg
    }

    fn reestimate(&mut self) -> TickStatus {
        let required = self.cfg.min_samples.max(2);
        let result = if self.history.len() < required {
            Err(EstimateError::InsufficientData {
                samples: self.history.len(),
                required,
            })
        } else {
            self.estimator.forecast(&self.history, self.target_temp)
        };

        match result {
            Ok(forecast) => {
                self.stats.estimates += 1;
                self.target_point = TargetPoint {
                    time: Some(forecast.done_at()),
                    temperature: Some(forecast.target_temp),
                };
                tracing::debug!(
                    remaining_s = forecast.remaining_s,
                    done_at = forecast.done_at(),
                    "estimate updated"
                );
                TickStatus::Estimated(forecast)
            }
            Err(e) => {
                self.stats.failures += 1;
                tracing::debug!(error = %e, samples = self.history.len(), "no estimate this tick");
                TickStatus::NoEstimate(e)
            }
        }
    }
}

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `Monitor`. `build()` needs a target; `try_build()` checks at runtime.
pub struct MonitorBuilder<T> {
    target_temp: Option<f64>,
    cfg: Option<EstimatorCfg>,
    direction: Option<Direction>,
    capacity: usize,
    _t: PhantomData<T>,
}

impl Default for MonitorBuilder<Missing> {
    fn default() -> Self {
        Self {
            target_temp: None,
            cfg: None,
            direction: None,
            capacity: 0,
            _t: PhantomData,
        }
    }
}

impl<T> MonitorBuilder<T> {
    pub fn with_estimator_cfg(mut self, cfg: EstimatorCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }

    /// Overrides the direction in any estimator config.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Pre-size the history buffer.
    pub fn with_capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    pub fn with_target_temp(self, target_temp: f64) -> MonitorBuilder<Set> {
        MonitorBuilder {
            target_temp: Some(target_temp),
            cfg: self.cfg,
            direction: self.direction,
            capacity: self.capacity,
            _t: PhantomData,
        }
    }

    /// Build with runtime checks regardless of type-state.
    pub fn try_build(self) -> Result<Monitor> {
        let target_temp = self
            .target_temp
            .ok_or_else(|| eyre::Report::new(BuildError::MissingTarget))?;
        if !target_temp.is_finite() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "target temperature must be finite",
            )));
        }
        let mut cfg = self.cfg.unwrap_or_default();
        if let Some(d) = self.direction {
            cfg.direction = d;
        }
        Ok(Monitor {
            validator: SampleValidator::new(),
            estimator: DecayEstimator::new(cfg.direction),
            cfg,
            target_temp,
            history: History::with_capacity(self.capacity),
            target_point: TargetPoint::default(),
            stats: MonitorStats::default(),
        })
    }
}

impl MonitorBuilder<Set> {
    pub fn build(self) -> Result<Monitor> {
        self.try_build()
    }
}
