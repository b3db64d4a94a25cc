#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Completion-time estimation for a two-channel temperature probe.
//!
//! This crate is pure computation: no I/O, no threads, no clocks. The caller
//! owns the polling loop and feeds readings in; see `Monitor` for the
//! standard composition.
//!
//! ## Architecture
//!
//! - **Samples**: admitted readings and the caller-owned `History` (`sample` module)
//! - **Validation**: stalled/invalid reading filter (`validator` module)
//! - **Estimation**: log-linear fit of a single-exponential approach to
//!   ambient, extrapolated to a target temperature (`estimator` module)
//! - **Regression**: shared least-squares helper (`regression` module)
//! - **Monitor**: validate → append → estimate → target point (`monitor` module)
//! - **Units**: Celsius/Fahrenheit and doneness presets (`units` module)

pub mod config;
pub mod conversions;
pub mod error;
pub mod estimator;
pub mod monitor;
pub mod regression;
pub mod sample;
pub mod units;
pub mod validator;

pub use config::EstimatorCfg;
pub use error::{BuildError, DegenerateReason, EstimateError};
pub use estimator::{DecayEstimator, DecayFit, Direction, Forecast};
pub use monitor::{Monitor, MonitorBuilder, MonitorStats, TargetPoint, TickStatus};
pub use sample::{History, RawSample, Sample};
pub use units::{Doneness, TempUnit};
pub use validator::{CleanReport, SampleValidator, Verdict};
