//! m3u-merge configuration file handling
//!
//! Loads and saves ~/.config/m3u-merge/config.yaml. Every section is
//! optional; command-line flags override whatever the file provides.

use crate::playlist::{IdentityMode, KeyPolicy, RenderOptions, DEFAULT_DESIGNATOR};
use crate::transform::{ClassifyRule, TransformOptions};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Identity key settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// exact or normalized
    #[serde(default)]
    pub mode: IdentityMode,

    /// Trailing character stripped by normalized keys
    #[serde(default = "default_designator")]
    pub designator: char,
}

fn default_designator() -> char {
    DEFAULT_DESIGNATOR
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            mode: IdentityMode::default(),
            designator: default_designator(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Keep comment/option lines such as #EXTVLCOPT
    #[serde(default = "default_keep_config")]
    pub keep_config: bool,

    /// Overwrite an existing output that is not one of the inputs
    #[serde(default)]
    pub force: bool,
}

fn default_keep_config() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            keep_config: default_keep_config(),
            force: false,
        }
    }
}

/// Rename targets; setting either switches the run to rename mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Keyword lists for the predicates and the scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default)]
    pub name: Vec<String>,

    #[serde(default)]
    pub resource: Vec<String>,

    #[serde(default)]
    pub group: Vec<String>,
}

/// Sort mode settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Unmatched first, matches last
    #[serde(default)]
    pub reverse: bool,

    /// Reorder whole groups by the group keywords
    #[serde(default)]
    pub reorder_groups: bool,

    /// Case-sensitive keyword scoring
    #[serde(default)]
    pub case_sensitive: bool,
}

/// m3u-merge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub rename: RenameConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default)]
    pub sort: SortConfig,

    /// Name-based classification rules, applied before the transform
    #[serde(default)]
    pub classify: Vec<ClassifyRule>,
}

impl MergeConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration written by `config init`: defaults plus example
    /// classification rules for CCTV channels and satellite (卫视) channels
    pub fn starter() -> Self {
        Self {
            classify: vec![
                ClassifyRule {
                    keyword: "CCTV".to_string(),
                    group: "央视".to_string(),
                    numeric: true,
                },
                ClassifyRule {
                    keyword: "卫视".to_string(),
                    group: "卫视".to_string(),
                    numeric: false,
                },
            ],
            ..Self::default()
        }
    }

    /// Load configuration from the default path, or defaults if it is missing
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::M3uMergeError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading m3u-merge configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            mode = ?config.identity.mode,
            classify_rules = config.classify.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load from an explicit path when given, else from the default path
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        }
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving m3u-merge configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/m3u-merge/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("m3u-merge");
        path.push("config.yaml");
        path
    }

    pub fn key_policy(&self) -> KeyPolicy {
        KeyPolicy::from_mode(self.identity.mode, self.identity.designator)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            keep_config: self.output.keep_config,
        }
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            rename_name: self.rename.name.clone(),
            rename_group: self.rename.group.clone(),
            name_keywords: self.keywords.name.clone(),
            resource_keywords: self.keywords.resource.clone(),
            group_keywords: self.keywords.group.clone(),
            reverse: self.sort.reverse,
            reorder_groups: self.sort.reorder_groups,
            case_sensitive: self.sort.case_sensitive,
        }
    }
}
