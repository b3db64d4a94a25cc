//! Single-exponential (lumped-capacitance) completion-time estimator.
//!
//! Model:
//!
//!   T(t) = T_ext + (T0 − T_ext) · exp(−k·(t − t0))
//!
//! where `t0`/`T0` come from the first sample in history. During the fit the
//! ambient `T_ext` is taken per sample; during extrapolation it is held at the
//! most recent observed value.
//!
//! The fit linearises the model, `ln((T − T_ext) / (T0 − T_ext)) = −k·(t − t0)`,
//! and runs a plain least-squares line fit over the points whose operands lie
//! on the side of ambient selected by [`Direction`]. Points that do not are
//! dropped and counted, never fatal on their own.
//!
//! Every call refits from the full history it is given; nothing is carried
//! between calls.

use serde::Serialize;

use crate::error::{DegenerateReason, EstimateError};
use crate::regression::least_squares;
use crate::sample::{History, Sample};

/// Side of ambient the body is approaching from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Internal below ambient and rising; both log-ratio operands negative.
    #[default]
    Heating,
    /// Internal above ambient and falling; both log-ratio operands positive.
    Cooling,
}

impl Direction {
    /// Both operands strictly on this direction's side of zero.
    #[inline]
    pub fn consistent(self, numerator: f64, denominator: f64) -> bool {
        match self {
            Self::Heating => numerator < 0.0 && denominator < 0.0,
            Self::Cooling => numerator > 0.0 && denominator > 0.0,
        }
    }

    /// Whether `current` has already reached `target` in the direction of travel.
    #[inline]
    pub fn reached(self, current: f64, target: f64) -> bool {
        match self {
            Self::Heating => current >= target,
            Self::Cooling => current <= target,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Heating => "heating",
            Self::Cooling => "cooling",
        })
    }
}

/// Fitted model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayFit {
    /// `k`, per second. Always > 0.
    pub rate_constant: f64,
    /// Intercept of the log-linear fit; 0 for noise-free data.
    pub intercept: f64,
    /// Time of the first sample.
    pub t0: f64,
    /// `T0`, internal temperature of the first sample.
    pub initial_temp: f64,
    pub points_used: usize,
    /// Samples discarded by the sign filter.
    pub points_dropped: usize,
    pub direction: Direction,
}

impl DecayFit {
    /// Model temperature `elapsed` seconds after `t0` for a constant `ambient`.
    pub fn temperature_at(&self, elapsed: f64, ambient: f64) -> f64 {
        ambient + (self.initial_temp - ambient) * (-self.rate_constant * elapsed).exp()
    }

    /// Seconds after `t0` at which the model crosses `target` for a constant `ambient`.
    pub fn elapsed_to_reach(&self, target: f64, ambient: f64) -> Result<f64, EstimateError> {
        let numerator = target - ambient;
        let denominator = self.initial_temp - ambient;
        if !self.direction.consistent(numerator, denominator) {
            return Err(EstimateError::UnreachableTarget {
                target,
                ambient,
                initial: self.initial_temp,
            });
        }
        Ok(-(numerator / denominator).ln() / self.rate_constant)
    }
}

/// Result of one estimate: remaining time plus what produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    /// Seconds from the latest sample until the target is reached. Never negative.
    pub remaining_s: f64,
    pub target_temp: f64,
    /// Time of the latest sample.
    pub last_time: f64,
    /// Ambient held constant for extrapolation (latest external reading).
    pub ambient: f64,
    /// `None` when the latest reading had already reached the target.
    pub fit: Option<DecayFit>,
}

impl Forecast {
    /// Absolute time at which the target is reached.
    #[inline]
    pub fn done_at(&self) -> f64 {
        self.last_time + self.remaining_s
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.remaining_s == 0.0
    }

    /// Model curve from `t0` to the predicted completion, `steps` evenly spaced
    /// `(time, temperature)` points at the held ambient. Empty without a fit.
    pub fn curve(&self, steps: usize) -> Vec<(f64, f64)> {
        let Some(fit) = self.fit else {
            return Vec::new();
        };
        if steps == 0 {
            return Vec::new();
        }
        let span = (self.done_at() - fit.t0).max(0.0);
        let denom = steps.saturating_sub(1).max(1) as f64;
        (0..steps)
            .map(|i| {
                let elapsed = span * (i as f64) / denom;
                (fit.t0 + elapsed, fit.temperature_at(elapsed, self.ambient))
            })
            .collect()
    }
}

/// Fits the decay model to a history and extrapolates a completion time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayEstimator {
    direction: Direction,
}

impl DecayEstimator {
    pub const fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Seconds remaining until the internal series reaches `target_temp`.
    pub fn estimate(&self, history: &History, target_temp: f64) -> Result<f64, EstimateError> {
        self.forecast(history, target_temp).map(|f| f.remaining_s)
    }

    /// Full-detail form of [`estimate`](Self::estimate).
    pub fn forecast(&self, history: &History, target_temp: f64) -> Result<Forecast, EstimateError> {
        let (first, last) = bounds(history.samples())?;

        if self.direction.reached(last.internal, target_temp) {
            return Ok(Forecast {
                remaining_s: 0.0,
                target_temp,
                last_time: last.time,
                ambient: last.external,
                fit: None,
            });
        }

        let fit = self.fit_samples(history.samples())?;
        let t_done = fit.elapsed_to_reach(target_temp, last.external)?;
        let elapsed = last.time - first.time;
        let remaining = t_done - elapsed;
        // NaN also lands on zero here.
        let remaining_s = if remaining > 0.0 { remaining } else { 0.0 };

        tracing::trace!(
            k = fit.rate_constant,
            t_done,
            elapsed,
            remaining_s,
            "forecast"
        );

        Ok(Forecast {
            remaining_s,
            target_temp,
            last_time: last.time,
            ambient: last.external,
            fit: Some(fit),
        })
    }

    /// Fit `k` without extrapolating.
    pub fn fit(&self, history: &History) -> Result<DecayFit, EstimateError> {
        bounds(history.samples())?;
        self.fit_samples(history.samples())
    }

    fn fit_samples(&self, samples: &[Sample]) -> Result<DecayFit, EstimateError> {
        let Some(first) = samples.first() else {
            return Err(EstimateError::InsufficientData {
                samples: 0,
                required: 2,
            });
        };
        let t0 = first.time;
        let initial_temp = first.internal;

        let mut points = Vec::with_capacity(samples.len());
        let mut dropped = 0usize;
        for s in samples {
            let numerator = s.internal - s.external;
            let denominator = initial_temp - s.external;
            if self.direction.consistent(numerator, denominator) {
                points.push((s.time - t0, (numerator / denominator).ln()));
            } else {
                dropped += 1;
                tracing::debug!(
                    time = s.time,
                    internal = s.internal,
                    external = s.external,
                    direction = %self.direction,
                    "fit point dropped: sign inconsistent with direction"
                );
            }
        }

        if points.len() < 2 {
            return Err(EstimateError::InsufficientValidPoints {
                valid: points.len(),
                dropped,
            });
        }

        let line = least_squares(&points)
            .ok_or(EstimateError::DegenerateFit(DegenerateReason::ZeroTimeVariance))?;
        let k = -line.slope;
        if k.is_nan() || k <= 0.0 {
            return Err(EstimateError::DegenerateFit(
                DegenerateReason::NonPositiveRate(k),
            ));
        }

        tracing::trace!(
            k,
            intercept = line.intercept,
            used = points.len(),
            dropped,
            "decay fit"
        );

        Ok(DecayFit {
            rate_constant: k,
            intercept: line.intercept,
            t0,
            initial_temp,
            points_used: points.len(),
            points_dropped: dropped,
            direction: self.direction,
        })
    }
}

fn bounds(samples: &[Sample]) -> Result<(&Sample, &Sample), EstimateError> {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() >= 2 => Ok((first, last)),
        _ => Err(EstimateError::InsufficientData {
            samples: samples.len(),
            required: 2,
        }),
    }
}
