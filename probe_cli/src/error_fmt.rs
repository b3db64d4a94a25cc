//! Human-readable error descriptions and structured JSON error formatting.

use probe_core::error::{BuildError, DegenerateReason, EstimateError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingTarget => {
                "What happened: Target temperature not set.\nLikely causes: Neither --target/--preset nor estimator.target_temp/preset in the config.\nHow to fix: Pass a target (e.g., `probe_cli estimate --log run.dat --target 63`) or a --preset.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Edit the config file or flags, then rerun."
            ),
        };
    }

    if let Some(ee) = err.downcast_ref::<EstimateError>() {
        return match ee {
            EstimateError::InsufficientData { samples, required } => format!(
                "What happened: Only {samples} usable reading(s); {required} are needed for an estimate.\nLikely causes: Log too short, or most readings were N/A or repeats of the previous poll.\nHow to fix: Record longer, or lower estimator.min_samples (minimum 2)."
            ),
            EstimateError::InsufficientValidPoints { valid, dropped } => format!(
                "What happened: Only {valid} reading(s) fit the model; {dropped} were on the wrong side of ambient.\nLikely causes: Wrong --direction for this run, or ambient crossed the probe temperature.\nHow to fix: Check --direction (heating vs cooling) and the external probe placement."
            ),
            EstimateError::DegenerateFit(DegenerateReason::ZeroTimeVariance) => {
                "What happened: All usable readings share one elapsed time.\nLikely causes: The elapsed-time column is not advancing.\nHow to fix: Check the acquisition side writes increasing elapsed seconds.".to_string()
            }
            EstimateError::DegenerateFit(DegenerateReason::NonPositiveRate(k)) => format!(
                "What happened: Fitted rate constant k={k} is not positive; the probe is not converging toward ambient.\nLikely causes: Heat source removed or changed mid-run, or noisy early readings.\nHow to fix: Wait for more readings, or replay only the current phase of the run."
            ),
            EstimateError::UnreachableTarget {
                target,
                ambient,
                initial,
            } => format!(
                "What happened: Target {target} cannot be reached from {initial} with ambient at {ambient}.\nLikely causes: Target lies beyond ambient, or on the wrong side for --direction.\nHow to fix: Raise the ambient temperature or pick a target between the start and ambient."
            ),
        };
    }

    // String-based heuristics over the full context chain (config and log loading)
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("probe log must have header") || lower.contains("missing header") {
        return "Invalid probe log header. Expected 'Elapsed Time, Internal, External'.".to_string();
    }

    if lower.contains("open probe log") {
        return format!(
            "What happened: Could not open the probe log.\nLikely causes: Wrong --log path or missing read permission.\nHow to fix: Check the path. Original: {msg}"
        );
    }

    if lower.contains("estimator.")
        || lower.contains("logging.")
        || lower.contains("parse config")
        || lower.contains("read config")
    {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range or misspelled values in the TOML.\nHow to fix: Edit the config file and run `probe_cli check-config`."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map estimate failures to stable exit codes; everything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ee) = err.downcast_ref::<EstimateError>() {
        return match ee {
            EstimateError::InsufficientData { .. } => 3,
            EstimateError::InsufficientValidPoints { .. } => 4,
            EstimateError::DegenerateFit(_) => 5,
            EstimateError::UnreachableTarget { .. } => 6,
        };
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(ee) = err.downcast_ref::<EstimateError>() {
        let details = match ee {
            EstimateError::InsufficientData { samples, required } => {
                json!({ "samples": samples, "required": required })
            }
            EstimateError::InsufficientValidPoints { valid, dropped } => {
                json!({ "valid": valid, "dropped": dropped })
            }
            EstimateError::DegenerateFit(DegenerateReason::ZeroTimeVariance) => {
                json!({ "cause": "zero_time_variance" })
            }
            EstimateError::DegenerateFit(DegenerateReason::NonPositiveRate(k)) => {
                json!({ "cause": "non_positive_rate", "rate_constant": k })
            }
            EstimateError::UnreachableTarget {
                target,
                ambient,
                initial,
            } => json!({ "target": target, "ambient": ambient, "initial": initial }),
        };
        return json!({ "reason": ee.kind(), "details": details, "message": humanize(err) })
            .to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}
