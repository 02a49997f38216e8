use crate::developer::{DEFAULT_HOURS_PER_WEEK, MAX_HOURS_PER_WEEK, MIN_HOURS_PER_WEEK};
use crate::error::{Result, WorkplanError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ScheduleConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hour of the day (local) at which the schedule starts.
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    /// Capacity used for developers given without explicit hours.
    #[serde(default = "default_hours_per_week")]
    pub default_hours_per_week: f64,
}

fn default_day_start_hour() -> u32 {
    9
}

fn default_hours_per_week() -> f64 {
    DEFAULT_HOURS_PER_WEEK
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start_hour: default_day_start_hour(),
            default_hours_per_week: default_hours_per_week(),
        }
    }
}

// ---------------------------------------------------------------------------
// EstimatorConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_base_hours")]
    pub base_hours: f64,
    #[serde(default = "default_complexity_keywords")]
    pub complexity_keywords: Vec<String>,
    #[serde(default = "default_simplicity_keywords")]
    pub simplicity_keywords: Vec<String>,
}

fn default_base_hours() -> f64 {
    4.0
}

fn default_complexity_keywords() -> Vec<String> {
    [
        "complex",
        "difficult",
        "challenging",
        "architecture",
        "system",
        "integrate",
        "authentication",
        "security",
        "database",
        "optimization",
        "algorithm",
        "refactor",
        "redesign",
        "implement",
        "create",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_simplicity_keywords() -> Vec<String> {
    [
        "simple", "easy", "basic", "quick", "small", "minor", "fix", "update", "change", "modify",
        "adjust", "tweak",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_hours: default_base_hours(),
            complexity_keywords: default_complexity_keywords(),
            simplicity_keywords: default_simplicity_keywords(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            schedule: ScheduleConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(WorkplanError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but an uninitialized root yields the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(WorkplanError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.schedule.day_start_hour > 23 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "schedule.day_start_hour={} is not an hour of the day (0-23)",
                    self.schedule.day_start_hour
                ),
            });
        }

        let hours = self.schedule.default_hours_per_week;
        if !(MIN_HOURS_PER_WEEK..=MAX_HOURS_PER_WEEK).contains(&hours) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "schedule.default_hours_per_week={hours} will be clamped to \
                     {MIN_HOURS_PER_WEEK}-{MAX_HOURS_PER_WEEK}"
                ),
            });
        }

        if !(self.estimator.base_hours.is_finite() && self.estimator.base_hours > 0.0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "estimator.base_hours={} must be a positive number",
                    self.estimator.base_hours
                ),
            });
        }

        for (field, list) in [
            ("complexity_keywords", &self.estimator.complexity_keywords),
            ("simplicity_keywords", &self.estimator.simplicity_keywords),
        ] {
            if list.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("estimator.{field} is empty"),
                });
            }
        }

        for keyword in &self.estimator.complexity_keywords {
            let lowered = keyword.to_lowercase();
            if self
                .estimator
                .simplicity_keywords
                .iter()
                .any(|k| k.to_lowercase() == lowered)
            {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "keyword '{keyword}' is listed as both complexity and simplicity"
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let parsed: Config = serde_yaml::from_str("schedule:\n  day_start_hour: 8\n").unwrap();
        assert_eq!(parsed.schedule.day_start_hour, 8);
        assert_eq!(parsed.schedule.default_hours_per_week, 40.0);
        assert_eq!(parsed.estimator, EstimatorConfig::default());
    }

    #[test]
    fn load_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(WorkplanError::NotInitialized)
        ));
        assert_eq!(Config::load_or_default(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.schedule.day_start_hour = 10;
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().schedule.day_start_hour, 10);
    }

    #[test]
    fn default_config_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = Config::default();
        cfg.schedule.day_start_hour = 25;
        cfg.schedule.default_hours_per_week = 120.0;
        cfg.estimator.base_hours = 0.0;
        cfg.estimator.simplicity_keywords = vec!["Refactor".to_string()];

        let warnings = cfg.validate();
        let errors = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Error)
            .count();
        assert_eq!(errors, 2);
        assert!(warnings.iter().any(|w| w.message.contains("default_hours_per_week")));
        assert!(warnings.iter().any(|w| w.message.contains("'refactor'")));
    }

    #[test]
    fn validate_warns_on_empty_lists() {
        let mut cfg = Config::default();
        cfg.estimator.complexity_keywords.clear();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
    }
}
