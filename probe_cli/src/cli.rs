//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Config path tried when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG: &str = "etc/probe_config.toml";

#[derive(Parser, Debug)]
#[command(name = "probe", version, about = "Probe completion-time estimator")]
pub struct Cli {
    /// Path to config TOML (default: etc/probe_config.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins when set
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Side of ambient the probe approaches from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DirectionArg {
    /// Internal below ambient, rising
    Heating,
    /// Internal above ambient, falling
    Cooling,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PresetArg {
    Pork,
    Steak,
    Chicken,
    Fish,
    Lamb,
}

impl From<DirectionArg> for probe_config::Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Heating => Self::Heating,
            DirectionArg::Cooling => Self::Cooling,
        }
    }
}

impl From<UnitsArg> for probe_config::Units {
    fn from(u: UnitsArg) -> Self {
        match u {
            UnitsArg::Celsius => Self::Celsius,
            UnitsArg::Fahrenheit => Self::Fahrenheit,
        }
    }
}

impl From<PresetArg> for probe_config::Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Pork => Self::Pork,
            PresetArg::Steak => Self::Steak,
            PresetArg::Chicken => Self::Chicken,
            PresetArg::Fish => Self::Fish,
            PresetArg::Lamb => Self::Lamb,
        }
    }
}

/// Inputs shared by `estimate` and `replay`. Flags override the config file.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Probe log to replay (`Elapsed Time, Internal, External`)
    #[arg(long, value_name = "FILE")]
    pub log: PathBuf,
    /// Target internal temperature, in the log's units
    #[arg(long, value_name = "TEMP", conflicts_with = "preset")]
    pub target: Option<f64>,
    /// Doneness preset instead of an explicit target
    #[arg(long, value_enum, value_name = "CUT")]
    pub preset: Option<PresetArg>,
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,
    /// Unit of the log and target
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a probe log and print the final completion estimate
    Estimate(RunArgs),
    /// Replay a probe log and print one line per reading
    Replay(RunArgs),
    /// Load and validate the config, then exit
    CheckConfig,
}
