//! Configuration for tally
//!
//! Every value has a default matching the classic height/weight run: input
//! `dados.txt`, height classes of 8 cm, weight classes of 4 kg, a preview of
//! the first 5 classes. Config files may be TOML or JSON and only need to
//! name the values they change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_io::{Column, GeneratorParams};
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Sample file location
    pub input: InputConfig,
    /// The two analysed variables
    pub variables: VariablesConfig,
    /// Report formatting
    pub report: ReportConfig,
    /// Worker pool settings
    pub execution: ExecutionConfig,
    /// Synthetic data settings for `generate`
    pub generator: GeneratorParams,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            variables: VariablesConfig::default(),
            report: ReportConfig::default(),
            execution: ExecutionConfig::default(),
            generator: GeneratorParams::default(),
        }
    }
}

/// Sample file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dados.txt"),
        }
    }
}

/// One analysed variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Display name
    pub name: String,
    /// Unit appended to mean and standard deviation
    pub unit: String,
    /// Which value of each sample pair to read
    pub column: Column,
    /// Class width
    pub width: f64,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, column: Column, width: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            column,
            width,
        }
    }

    pub fn height() -> Self {
        Self::new("Height", "cm", Column::Primary, 8.0)
    }

    pub fn weight() -> Self {
        Self::new("Weight", "kg", Column::Secondary, 4.0)
    }
}

/// Height and weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariablesConfig {
    pub height: VariableSpec,
    pub weight: VariableSpec,
}

impl Default for VariablesConfig {
    fn default() -> Self {
        Self {
            height: VariableSpec::height(),
            weight: VariableSpec::weight(),
        }
    }
}

impl VariablesConfig {
    /// Both variables, height first
    pub fn specs(&self) -> Vec<VariableSpec> {
        vec![self.height.clone(), self.weight.clone()]
    }
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of leading classes listed per variable
    pub preview_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { preview_bins: 5 }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Worker threads; 0 lets rayon pick one per core
    pub threads: usize,
}

impl TallyConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text)?,
            Some("json") => Self::from_json(&text)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for spec in [&self.variables.height, &self.variables.weight] {
            if !(spec.width.is_finite() && spec.width > 0.0) {
                return Err(ConfigError::OutOfRange(format!(
                    "{} class width must be positive, got {}",
                    spec.name, spec.width
                )));
            }
        }

        if self.variables.height.column == self.variables.weight.column {
            return Err(ConfigError::DuplicateColumn(format!(
                "{} and {} both read the {:?} column",
                self.variables.height.name, self.variables.weight.name, self.variables.height.column
            )));
        }

        if self.report.preview_bins == 0 {
            return Err(ConfigError::OutOfRange(
                "preview_bins must be at least 1".to_string(),
            ));
        }

        for dist in [&self.generator.primary, &self.generator.secondary] {
            if dist.std_dev < 0.0 || dist.min > dist.max {
                return Err(ConfigError::OutOfRange(format!(
                    "generator distribution needs std_dev >= 0 and min <= max, got {:?}",
                    dist
                )));
            }
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Both variables read the same column
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// File contents are not valid TOML/JSON for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// File could not be read
    #[error("Read error: {0}")]
    Read(String),

    /// Extension is neither .toml nor .json
    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config() {
        let config = TallyConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.variables.height.width, 8.0);
        assert_eq!(config.variables.weight.width, 4.0);
        assert_eq!(config.input.path, PathBuf::from("dados.txt"));
        assert_eq!(config.report.preview_bins, 5);
    }

    #[test]
    fn test_partial_toml() {
        let config = TallyConfig::from_toml(
            r#"
[input]
path = "people.txt"

[variables.weight]
name = "Weight"
unit = "lb"
column = "secondary"
width = 10.0

[execution]
threads = 2
"#,
        )
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("people.txt"));
        assert_eq!(config.variables.weight.unit, "lb");
        assert_eq!(config.variables.weight.width, 10.0);
        assert_eq!(config.variables.height, VariableSpec::height());
        assert_eq!(config.execution.threads, 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TallyConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(TallyConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_json_serialization() {
        let config = TallyConfig::default();
        let json = config.to_json().unwrap();
        let parsed = TallyConfig::from_json(&json).unwrap();
        assert_eq!(parsed.generator.count, config.generator.count);
    }

    #[test]
    fn test_invalid_width() {
        let mut config = TallyConfig::default();
        config.variables.height.width = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }

    #[test]
    fn test_duplicate_column() {
        let mut config = TallyConfig::default();
        config.variables.weight.column = Column::Primary;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[report]\npreview_bins = 3\n").unwrap();
        file.flush().unwrap();

        let config = TallyConfig::load(file.path()).unwrap();
        assert_eq!(config.report.preview_bins, 3);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            TallyConfig::load(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
