use thiserror::Error;

/// Why a regression could not produce a usable rate constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateReason {
    /// `nΣxx − (Σx)²` was exactly zero: every fit point shares one elapsed time.
    ZeroTimeVariance,
    /// The fitted `k` was not strictly positive (or not a number).
    NonPositiveRate(f64),
}

impl core::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroTimeVariance => f.write_str("all elapsed times are identical"),
            Self::NonPositiveRate(k) => write!(f, "rate constant k={k} is not positive"),
        }
    }
}

/// Expected, non-fatal reasons an estimate is unavailable for this tick.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("insufficient data: {samples} sample(s), need at least {required}")]
    InsufficientData { samples: usize, required: usize },
    #[error("insufficient valid points: {valid} usable, {dropped} dropped by sign filter")]
    InsufficientValidPoints { valid: usize, dropped: usize },
    #[error("degenerate fit: {0}")]
    DegenerateFit(DegenerateReason),
    #[error(
        "target {target} unreachable from initial {initial} with ambient {ambient} in the fitted direction"
    )]
    UnreachableTarget {
        target: f64,
        ambient: f64,
        initial: f64,
    },
}

impl EstimateError {
    /// Stable, machine-friendly name for structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "InsufficientData",
            Self::InsufficientValidPoints { .. } => "InsufficientValidPoints",
            Self::DegenerateFit(_) => "DegenerateFit",
            Self::UnreachableTarget { .. } => "UnreachableTarget",
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing target temperature")]
    MissingTarget,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
