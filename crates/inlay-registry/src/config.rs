//! Consumer project configuration.
//!
//! Mirrors the `components.json` file a consumer project keeps at its root.
//! Every transformer reads this record; none of them mutate it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Writing direction of the consumer project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

/// Project configuration loaded from `components.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Registry style the project was initialized with
    #[serde(default)]
    pub style: Option<String>,

    /// Tailwind settings for the consumer project
    #[serde(default)]
    pub tailwind: TailwindConfig,

    /// Import path aliases
    #[serde(default)]
    pub aliases: Aliases,

    /// Layout direction; physical classes are mirrored when set to rtl
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Icon library the project prefers (e.g. "lucide", "radix", "tabler")
    #[serde(default)]
    pub icon_library: Option<String>,

    /// Detected host framework version, when known (e.g. "16.0.0")
    #[serde(default)]
    pub framework_version: Option<String>,
}

/// Tailwind-specific settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Base color palette name (e.g. "neutral", "slate")
    #[serde(default = "default_base_color")]
    pub base_color: String,

    /// Whether the project styles colors through CSS variables
    #[serde(default = "default_true")]
    pub css_variables: bool,

    /// Utility class prefix (empty means unprefixed)
    #[serde(default)]
    pub prefix: String,

    /// Path to the project stylesheet
    #[serde(default)]
    pub css: Option<String>,
}

/// Import path aliases for each registry bucket.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Aliases {
    /// Components bucket; also the fallback for unrecognized buckets
    #[serde(default = "default_components_alias")]
    pub components: String,

    /// The class-combining utility module
    #[serde(default = "default_utils_alias")]
    pub utils: String,

    /// UI primitives bucket; defaults beneath the components alias
    #[serde(default)]
    pub ui: Option<String>,

    /// Shared library bucket
    #[serde(default)]
    pub lib: Option<String>,

    /// Hooks bucket
    #[serde(default)]
    pub hooks: Option<String>,
}

fn default_base_color() -> String {
    "neutral".to_string()
}
fn default_true() -> bool {
    true
}
fn default_components_alias() -> String {
    "@/components".to_string()
}
fn default_utils_alias() -> String {
    "@/lib/utils".to_string()
}

impl Default for TailwindConfig {
    fn default() -> Self {
        Self {
            base_color: default_base_color(),
            css_variables: true,
            prefix: String::new(),
            css: None,
        }
    }
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: default_components_alias(),
            utils: default_utils_alias(),
            ui: None,
            lib: None,
            hooks: None,
        }
    }
}

impl Config {
    /// Load configuration from a `components.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Whether the project lays out right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.direction == Some(Direction::Rtl)
    }
}

impl Aliases {
    /// The ui bucket alias, falling back beneath the components alias.
    pub fn ui_alias(&self) -> String {
        self.ui
            .clone()
            .unwrap_or_else(|| format!("{}/ui", self.components))
    }

    /// The leading segment of the components alias (e.g. `@` or `~`).
    pub fn root(&self) -> &str {
        self.components.split('/').next().unwrap_or("@")
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
