use probe_config::{Direction, Preset, Units, load_toml};
use rstest::rstest;

#[test]
fn parses_full_config() {
    let toml = r#"
[estimator]
direction = "cooling"
target_temp = 60.0
preset = "chicken"
units = "fahrenheit"
min_samples = 4

[logging]
file = "probe.log"
level = "debug"
rotation = "daily"
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.estimator.direction, Direction::Cooling);
    assert_eq!(cfg.estimator.target_temp, Some(60.0));
    assert_eq!(cfg.estimator.preset, Some(Preset::Chicken));
    assert_eq!(cfg.estimator.units, Units::Fahrenheit);
    assert_eq!(cfg.estimator.min_samples, 4);
    assert_eq!(cfg.logging.rotation.as_deref(), Some("daily"));
}

#[rstest]
#[case("[estimator]\nmin_samples = 1\n", "min_samples must be >= 2")]
#[case("[estimator]\ntarget_temp = nan\n", "target_temp must be a finite number")]
#[case("[logging]\nrotation = \"weekly\"\n", "logging.rotation must be one of")]
#[case("[logging]\nfile = \"  \"\n", "logging.file must not be empty")]
fn rejects_out_of_range_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should be rejected");
    assert!(
        format!("{err}").contains(needle),
        "error {err} does not mention {needle}"
    );
}

#[test]
fn unknown_direction_fails_to_parse() {
    assert!(load_toml("[estimator]\ndirection = \"sideways\"\n").is_err());
}
