//! `From` implementations bridging `probe_config` types to `probe_core` types.

use crate::config::EstimatorCfg;
use crate::estimator::Direction;
use crate::sample::RawSample;
use crate::units::{Doneness, TempUnit};

// ── Direction / units ────────────────────────────────────────────────────────

impl From<probe_config::Direction> for Direction {
    fn from(d: probe_config::Direction) -> Self {
        match d {
            probe_config::Direction::Heating => Self::Heating,
            probe_config::Direction::Cooling => Self::Cooling,
        }
    }
}

impl From<probe_config::Units> for TempUnit {
    fn from(u: probe_config::Units) -> Self {
        match u {
            probe_config::Units::Celsius => Self::Celsius,
            probe_config::Units::Fahrenheit => Self::Fahrenheit,
        }
    }
}

impl From<probe_config::Preset> for Doneness {
    fn from(p: probe_config::Preset) -> Self {
        match p {
            probe_config::Preset::Pork => Self::Pork,
            probe_config::Preset::Steak => Self::Steak,
            probe_config::Preset::Chicken => Self::Chicken,
            probe_config::Preset::Fish => Self::Fish,
            probe_config::Preset::Lamb => Self::Lamb,
        }
    }
}

// ── EstimatorCfg ─────────────────────────────────────────────────────────────

impl From<&probe_config::EstimatorCfg> for EstimatorCfg {
    fn from(c: &probe_config::EstimatorCfg) -> Self {
        Self {
            direction: c.direction.into(),
            min_samples: c.min_samples,
            units: c.units.into(),
        }
    }
}

impl EstimatorCfg {
    /// Target temperature from a TOML estimator section: an explicit
    /// `target_temp` wins over `preset`. Expressed in the section's units.
    pub fn resolve_target(c: &probe_config::EstimatorCfg) -> Option<f64> {
        c.target_temp.or_else(|| {
            c.preset
                .map(|p| Doneness::from(p).target(TempUnit::from(c.units)))
        })
    }
}

// ── Log rows ─────────────────────────────────────────────────────────────────

impl From<&probe_config::LogRow> for RawSample {
    fn from(r: &probe_config::LogRow) -> Self {
        Self::new(r.elapsed, r.internal, r.external)
    }
}

impl From<probe_config::LogRow> for RawSample {
    fn from(r: probe_config::LogRow) -> Self {
        Self::from(&r)
    }
}
