use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealtime_resolver::{GapPolicy, Zone};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ResolverConfig {
    /// IANA name of the zone meal times are computed in, the system zone
    /// when unset
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub gap_policy: GapPolicy,
}

impl ResolverConfig {
    pub fn zone(&self) -> Result<Zone, mealtime_resolver::ResolveError> {
        let zone = match self.timezone.as_deref() {
            Some(name) => Zone::named(name)?,
            None => Zone::ambient(),
        };
        Ok(zone.with_gap_policy(self.gap_policy))
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALTIME__RESOLVER__TIMEZONE, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("resolver.gap_policy", "shift_forward")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, a missing file keeps the defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALTIME")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = self.resolver.zone() {
            return Err(e.to_string());
        }
        if self.logging.level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_unknown_timezone() {
        let config = Config {
            resolver: ResolverConfig {
                timezone: Some("Atlantis/Capital".to_string()),
                gap_policy: GapPolicy::ShiftForward,
            },
            logging: LoggingConfig::default(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_log_level() {
        let config = Config {
            resolver: ResolverConfig::default(),
            logging: LoggingConfig {
                level: " ".to_string(),
                format: LogFormat::Pretty,
            },
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = Config {
            resolver: ResolverConfig {
                timezone: Some("Europe/Paris".to_string()),
                gap_policy: GapPolicy::Reject,
            },
            logging: LoggingConfig::default(),
        };

        assert!(config.validate().is_ok());
        let zone = config.resolver.zone().unwrap();
        assert_eq!(zone.name(), "Europe/Paris");
        assert_eq!(zone.gap_policy(), GapPolicy::Reject);
    }

    #[test]
    fn test_unset_timezone_uses_system_zone() {
        let resolver = ResolverConfig {
            timezone: None,
            gap_policy: GapPolicy::Reject,
        };

        let zone = resolver.zone().unwrap();
        assert_eq!(zone, Zone::ambient().with_gap_policy(GapPolicy::Reject));
    }
}
