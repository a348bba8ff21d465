//! Configuration for counsel-runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Longest accepted `retention.ttl`. Results are meant to be short-lived.
pub const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Runtime configuration.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Input acceptance rules
    #[serde(default)]
    pub intake: IntakeConfig,

    /// How long analysis results are kept
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Which rubric to evaluate against
    #[serde(default)]
    pub rubric: RubricConfig,

    /// Determinism configuration
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

impl RuntimeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.ttl.is_zero() {
            return Err(ConfigError::Invalid(
                "retention.ttl must be greater than zero".to_string(),
            ));
        }
        if self.retention.ttl > MAX_TTL {
            return Err(ConfigError::Invalid(format!(
                "retention.ttl must be at most {}",
                humantime::format_duration(MAX_TTL)
            )));
        }
        Ok(())
    }

    /// The fixed clock if one is configured, otherwise the current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.determinism.analyzed_at.unwrap_or_else(Utc::now)
    }
}

/// Intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeConfig {
    /// Minimum length of extracted text, in characters (not bytes)
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
}

fn default_min_text_chars() -> usize {
    50
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
        }
    }
}

/// Retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetentionConfig {
    /// Time a result stays retrievable after analysis
    #[serde(with = "humantime_serde", default = "default_ttl")]
    pub ttl: Duration,
}

fn default_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

/// Rubric selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RubricConfig {
    /// Custom rubric file (YAML or JSON). The built-in rubric is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Determinism configuration.
///
/// ```yaml
/// determinism:
///   analyzed_at: "2025-12-20T10:00:00Z"
/// ```
///
/// When `analyzed_at` is None (default), the current system time is used
/// for retention bookkeeping. Scores never depend on the clock.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DeterminismConfig {
    /// Fixed timestamp used instead of the system clock.
    ///
    /// Format: ISO 8601 (e.g., "2025-12-20T10:00:00Z")
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
}

// Custom serialization for Duration using humantime format
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.intake.min_text_chars, 50);
        assert_eq!(config.retention.ttl, Duration::from_secs(300));
        assert!(config.rubric.path.is_none());
        assert!(config.determinism.analyzed_at.is_none());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RuntimeConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
intake:
  min_text_chars: 100
retention:
  ttl: "10m"
rubric:
  path: "rubrics/custom.yaml"
determinism:
  analyzed_at: "2025-12-20T10:00:00Z"
"#;
        let config = RuntimeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.intake.min_text_chars, 100);
        assert_eq!(config.retention.ttl, Duration::from_secs(600));
        assert_eq!(config.rubric.path, Some(PathBuf::from("rubrics/custom.yaml")));
        assert_eq!(
            config.determinism.analyzed_at,
            Some(Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_duration_rejected() {
        let result = RuntimeConfig::from_yaml("retention:\n  ttl: \"soon\"\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result = RuntimeConfig::from_yaml("retention:\n  ttl: \"0s\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_ttl_above_cap_rejected() {
        let result = RuntimeConfig::from_yaml("retention:\n  ttl: \"1000000years\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = RuntimeConfig::from_yaml("retention:\n  ttl: \"24h\"\n").unwrap();
        assert_eq!(config.retention.ttl, MAX_TTL);
    }

    #[test]
    fn test_fixed_clock() {
        let fixed_time = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        let mut config = RuntimeConfig::default();
        config.determinism.analyzed_at = Some(fixed_time);
        assert_eq!(config.now(), fixed_time);
    }

    #[test]
    fn test_config_serialization() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"ttl\":\"5m\""));
        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
