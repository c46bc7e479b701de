//! @ai:module:intent Configuration structs for the analyzer
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalyzerConfig, PathConfig, RunConfig, ChartConfig
//! @ai:module:stateless true

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lighthouse-bench.toml";

/// @ai:intent Main configuration for the analyzer
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

/// @ai:intent Input and output locations
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// @ai:intent Which framework groups to load and how their files are named
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_frameworks")]
    pub frameworks: Vec<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// @ai:intent Which chart artifacts to render and at what size
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_true")]
    pub per_metric: bool,
    #[serde(default = "default_true")]
    pub grid: bool,
    #[serde(default = "default_true")]
    pub normalized: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frameworks: default_frameworks(),
            extension: default_extension(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            per_metric: true,
            grid: true,
            normalized: true,
        }
    }
}

impl ChartConfig {
    /// @ai:intent True when at least one chart kind is enabled
    /// @ai:effects pure
    pub fn any_enabled(&self) -> bool {
        self.per_metric || self.grid || self.normalized
    }

    pub fn disable_all(&mut self) {
        self.per_metric = false;
        self.grid = false;
        self.normalized = false;
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("charts")
}

fn default_frameworks() -> Vec<String> {
    vec!["react".to_string(), "vue".to_string(), "angular".to_string()]
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    500
}

fn default_true() -> bool {
    true
}

impl AnalyzerConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load from an explicit path, else the default file if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&std::path::Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_lighthouse_layout() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.run.frameworks, vec!["react", "vue", "angular"]);
        assert_eq!(config.run.extension, "json");
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
        assert!(config.charts.any_enabled());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AnalyzerConfig = toml::from_str(
            r#"
[run]
frameworks = ["svelte"]

[charts]
grid = false
"#,
        )
        .unwrap();

        assert_eq!(config.run.frameworks, vec!["svelte"]);
        assert_eq!(config.run.extension, "json");
        assert!(!config.charts.grid);
        assert!(config.charts.per_metric);
        assert_eq!(config.charts.width, 800);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lighthouse-bench.toml");

        let mut config = AnalyzerConfig::default();
        config.paths.output_dir = PathBuf::from("out");
        config.charts.disable_all();
        config.save(&path).unwrap();

        let loaded = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!loaded.charts.any_enabled());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[run\nframeworks = 3").unwrap();

        let err = AnalyzerConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
