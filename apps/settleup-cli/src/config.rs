//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --format json                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SETTLEUP_TOLERANCE=0.5                                             │
//! │     SETTLEUP_FORMAT=json                                               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/settleup/settleup.toml (Linux)                           │
//! │     ~/Library/Application Support/app.settleup.settleup/... (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     tolerance 0.01, text output                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # settleup.toml
//! [settlement]
//! tolerance = 0.01   # balances closer to zero than this count as settled
//!
//! [output]
//! format = "text"    # text | json
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use settleup_core::{Money, SettlementPolicy};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_TOLERANCE: &str = "SETTLEUP_TOLERANCE";
pub const ENV_FORMAT: &str = "SETTLEUP_FORMAT";

const CONFIG_FILE_NAME: &str = "settleup.toml";

// =============================================================================
// Output Format
// =============================================================================

/// How the summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,

    /// Pretty-printed `Summary` JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// CLI Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tolerance used by the debt optimizer.
    #[serde(default)]
    pub settlement: SettlementPolicy,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`settleup.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given `config_path` must exist; the default path is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: PathBuf) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path)
            .map_err(|source| CliError::Read { path, source })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.settlement
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_TOLERANCE) {
            match raw.trim().parse::<f64>().ok().and_then(Money::from_unit_f64) {
                Some(tolerance) => {
                    debug!(%tolerance, "Overriding tolerance from environment");
                    self.settlement.tolerance = tolerance;
                }
                None => warn!(value = %raw, "Ignoring unparseable {}", ENV_TOLERANCE),
            }
        }

        if let Some(raw) = lookup(ENV_FORMAT) {
            match raw.parse::<OutputFormat>() {
                Ok(format) => {
                    debug!(%format, "Overriding output format from environment");
                    self.output.format = format;
                }
                Err(e) => warn!("Ignoring {}: {}", ENV_FORMAT, e),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "settleup", "settleup")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.settlement.tolerance, Money::from_micros(10_000));
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_toml_parsing() {
        let config = CliConfig::from_toml(
            r#"
            [settlement]
            tolerance = 0.5

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.settlement.tolerance, Money::from_micros(500_000));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.settlement.tolerance, Money::from_micros(10_000));

        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(matches!(
            CliConfig::from_toml("[output]\nformat = \"xml\"\n"),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config.apply_overrides(env(&[(ENV_TOLERANCE, "0.25"), (ENV_FORMAT, "json")]));

        assert_eq!(config.settlement.tolerance, Money::from_micros(250_000));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = CliConfig::default();
        config.apply_overrides(env(&[(ENV_TOLERANCE, "lots"), (ENV_FORMAT, "xml")]));

        assert_eq!(config.settlement.tolerance, Money::from_micros(10_000));
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_out_of_range_tolerance_fails_validation() {
        let mut config = CliConfig::default();
        config.apply_overrides(env(&[(ENV_TOLERANCE, "2")]));

        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let path = PathBuf::from("/nonexistent/settleup.toml");
        assert!(matches!(
            CliConfig::load(Some(path)),
            Err(CliError::Read { .. })
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CliConfig::default()).unwrap();
        assert!(toml_str.contains("[settlement]"));
        assert!(toml_str.contains("[output]"));
    }
}
