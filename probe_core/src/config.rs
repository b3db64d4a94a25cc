//! Runtime configuration types for the monitor.
//!
//! These are separate from the TOML-deserialized config in `probe_config`.

use crate::estimator::Direction;
use crate::units::TempUnit;

/// Estimator configuration.
#[derive(Debug, Clone)]
pub struct EstimatorCfg {
    /// Side of ambient the probe approaches from; selects the sign policy.
    pub direction: Direction,
    /// Samples required in history before an estimate is attempted. Values
    /// below 2 behave as 2.
    pub min_samples: usize,
    /// Unit the samples and target are expressed in (informational).
    pub units: TempUnit,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            direction: Direction::Heating,
            min_samples: 2,
            units: TempUnit::Celsius,
        }
    }
}
