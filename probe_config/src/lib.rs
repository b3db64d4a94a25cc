#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and probe-log parsing for the probe monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The probe-log loader reads the `Elapsed Time, Internal, External` line
//!   format written by the acquisition side, mapping `N/A` fields to `None`.
use serde::Deserialize;
use std::io::Read;

/// Which side of ambient the probe approaches from.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Internal below ambient, rising toward it.
    #[default]
    Heating,
    /// Internal above ambient, falling toward it.
    Cooling,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Doneness presets; targets live in `probe_core::units`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Pork,
    Steak,
    Chicken,
    Fish,
    Lamb,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EstimatorCfg {
    pub direction: Direction,
    /// Target internal temperature, in `units`. Wins over `preset` when both are set.
    pub target_temp: Option<f64>,
    pub preset: Option<Preset>,
    /// Unit of the probe log and of `target_temp`.
    pub units: Units,
    /// Samples required in history before an estimate is attempted (>= 2).
    pub min_samples: usize,
}

impl Default for EstimatorCfg {
    fn default() -> Self {
        Self {
            direction: Direction::Heating,
            target_temp: None,
            preset: None,
            units: Units::Celsius,
            min_samples: 2,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub estimator: EstimatorCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Estimator
        if let Some(t) = self.estimator.target_temp
            && !t.is_finite()
        {
            eyre::bail!("estimator.target_temp must be a finite number");
        }
        if self.estimator.min_samples < 2 {
            eyre::bail!("estimator.min_samples must be >= 2");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rotation:?}");
        }
        if let Some(file) = self.logging.file.as_deref()
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty when set");
        }

        Ok(())
    }
}

/// One line of a probe log. `None` marks a failed vendor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRow {
    pub elapsed: Option<f64>,
    pub internal: Option<f64>,
    pub external: Option<f64>,
}

const LOG_HEADERS: [&str; 3] = ["Elapsed Time", "Internal", "External"];

fn parse_field(field: Option<&str>) -> Option<f64> {
    let s = field?.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a probe log from any reader.
///
/// Layout:
/// ```text
/// 2025-03-01T18:04:11.000Z        <- optional start timestamp
/// Elapsed Time, Internal, External
/// 0, 21.5, 110.0
/// 10, N/A, 112.0
/// ```
pub fn parse_probe_log<R: Read>(reader: R) -> eyre::Result<Vec<LogRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut header_seen = false;
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| eyre::eyre!("read probe log line {}: {}", idx + 1, e))?;
        if !header_seen {
            let fields: Vec<&str> = rec.iter().collect();
            if fields == LOG_HEADERS {
                header_seen = true;
                continue;
            }
            // A single leading timestamp line is allowed before the header.
            if idx == 0 && fields.len() == 1 {
                continue;
            }
            eyre::bail!(
                "probe log must have header '{}', got: {}",
                LOG_HEADERS.join(", "),
                fields.join(",")
            );
        }
        if rec.iter().all(str::is_empty) {
            continue;
        }
        if rec.len() != 3 {
            eyre::bail!(
                "invalid probe log line {}: expected 3 fields, got {}",
                idx + 1,
                rec.len()
            );
        }
        rows.push(LogRow {
            elapsed: parse_field(rec.get(0)),
            internal: parse_field(rec.get(1)),
            external: parse_field(rec.get(2)),
        });
    }
    if !header_seen {
        eyre::bail!("probe log is missing header '{}'", LOG_HEADERS.join(", "));
    }
    Ok(rows)
}

pub fn load_probe_log(path: &std::path::Path) -> eyre::Result<Vec<LogRow>> {
    let file =
        std::fs::File::open(path).map_err(|e| eyre::eyre!("open probe log {:?}: {}", path, e))?;
    parse_probe_log(file)
}
