use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub topics: Vec<TopicConfig>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Title shown on the index and tree pages
    pub title: String,
    /// Optional HTML fragment inserted at the top of the index page
    pub intro: Option<String>,
}

/// Section pre-scan and highlighting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Tab stop width used when expanding tabs to spaces
    pub tab_width: usize,
    /// Regex deciding which section labels are linkable symbols
    pub symbol_pattern: String,
    /// Section labels to drop during the pre-scan, case-insensitive
    pub skip_sections: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

/// One topic of the navigation tree, in declaration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    /// Include-style paths relative to the source directory; entries may be
    /// glob patterns
    pub files: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            title: "API Reference".to_string(),
            intro: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            symbol_pattern: "^[A-Za-z_][A-Za-z0-9_]*$".to_string(),
            skip_sections: vec![
                "implementations".to_string(),
                "inline implementations".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./headlamp-docs"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, output: Option<PathBuf>, tab_width: Option<usize>) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(w) = tab_width {
            self.scan.tab_width = w;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.tab_width == 0 {
            return Err(Error::config_validation("tab_width must be at least 1"));
        }

        if self.scan.tab_width > 64 {
            return Err(Error::config_validation("tab_width cannot exceed 64"));
        }

        if let Err(e) = regex::Regex::new(&self.scan.symbol_pattern) {
            return Err(Error::config_validation(format!(
                "symbol_pattern does not compile: {}",
                e
            )));
        }

        for topic in &self.topics {
            if topic.name.trim().is_empty() {
                return Err(Error::config_validation("topic name cannot be empty"));
            }
            if topic.files.is_empty() {
                return Err(Error::config_validation(format!(
                    "topic \"{}\" has no files",
                    topic.name
                )));
            }
        }

        Ok(())
    }
}
