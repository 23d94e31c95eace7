//! Tests for configuration system

use mealtime::Config;
use mealtime::config::LogFormat;
use mealtime_resolver::{GapPolicy, Zone};
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.resolver.timezone, None);
    assert_eq!(config.resolver.gap_policy, GapPolicy::ShiftForward);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.validate().is_ok());

    // No zone configured: meal times follow the host's zone
    assert_eq!(config.resolver.zone().unwrap(), Zone::ambient());
}

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("mealtime.toml");
    std::fs::write(
        &path,
        r#"
[resolver]
timezone = "America/New_York"
gap_policy = "reject"

[logging]
format = "json"
"#,
    )?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert_eq!(config.resolver.timezone.as_deref(), Some("America/New_York"));
    assert_eq!(config.resolver.gap_policy, GapPolicy::Reject);
    assert_eq!(config.logging.format, LogFormat::Json);
    // Untouched keys keep their defaults
    assert_eq!(config.logging.level, "info");

    let zone = config.resolver.zone()?;
    assert_eq!(zone.name(), "America/New_York");
    assert_eq!(zone.gap_policy(), GapPolicy::Reject);

    Ok(())
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("does-not-exist.toml");

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert_eq!(config.resolver.timezone, None);
    assert_eq!(config.resolver.zone()?, Zone::ambient());
    Ok(())
}

#[test]
fn test_unknown_timezone_fails_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("bad.toml");
    std::fs::write(&path, "[resolver]\ntimezone = \"Nowhere/Special\"\n")?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    let err = config.validate().unwrap_err();
    assert!(err.contains("Nowhere/Special"), "unexpected message: {err}");
    Ok(())
}

#[test]
fn test_invalid_gap_policy_is_a_load_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("bad_policy.toml");
    std::fs::write(&path, "[resolver]\ngap_policy = \"guess\"\n")?;

    assert!(Config::load(Some(path.to_string_lossy().into_owned())).is_err());
    Ok(())
}
