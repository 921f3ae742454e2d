//! # Configuration Management
//!
//! Handles parsing and validation of the optional `mavenpages.toml` file at
//! the repository root. Every field has a default, so a repository without a
//! configuration file is maintained with the conventional Maven layout under
//! `docs/`.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::checksum::Algorithm;
use crate::constants::*;

/// Configuration error types
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid TOML syntax in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {msg}")]
    Validation { msg: String },
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Published directory, relative to the repository root
    pub content_root: PathBuf,

    /// Extension of binary package archives (no leading dot)
    pub package_extension: String,

    /// Extension of descriptor files
    pub descriptor_extension: String,

    /// Extension of repository metadata documents
    pub metadata_extension: String,

    /// Checksum algorithms generated for tracked files
    pub algorithms: Vec<Algorithm>,

    /// Custom descriptor template, relative to the repository root
    pub descriptor_template: Option<PathBuf>,

    /// Directory listing settings
    pub index: IndexConfig,

    /// Repository-root sanity check settings
    pub preflight: PreflightConfig,
}

/// Directory listing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub file_name: String,
    pub template_name: String,
    pub stylesheet_name: String,
    pub script_name: String,
}

/// Marker files that identify the repository root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreflightConfig {
    /// Canonical-name file inside the content root
    pub canonical_name_file: String,
    /// Robots-exclusion file inside the content root
    pub robots_file: String,
    /// Files expected at the top of the repository
    pub metadata_files: Vec<String>,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            package_extension: DEFAULT_PACKAGE_EXTENSION.to_string(),
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            metadata_extension: DEFAULT_METADATA_EXTENSION.to_string(),
            algorithms: Algorithm::ALL.to_vec(),
            descriptor_template: None,
            index: IndexConfig::default(),
            preflight: PreflightConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_INDEX_FILE_NAME.to_string(),
            template_name: DEFAULT_INDEX_TEMPLATE_NAME.to_string(),
            stylesheet_name: DEFAULT_INDEX_STYLESHEET_NAME.to_string(),
            script_name: DEFAULT_INDEX_SCRIPT_NAME.to_string(),
        }
    }
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            canonical_name_file: DEFAULT_CANONICAL_NAME_FILE.to_string(),
            robots_file: DEFAULT_ROBOTS_FILE.to_string(),
            metadata_files: DEFAULT_METADATA_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RepoConfig {
    /// Load `mavenpages.toml` from the repository root, falling back to
    /// defaults when the file does not exist
    pub fn load_from_repo<P: AsRef<Path>>(repo_root: P) -> Result<Self, ConfigError> {
        let path = repo_root.as_ref().join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load configuration from an explicit file
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: config_path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(config_path)?;
        let config = Self::parse(&content).map_err(|err| match err {
            ConfigError::TomlParse { source, .. } => ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        tracing::debug!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RepoConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
            path: PathBuf::from(CONFIG_FILE_NAME),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("package_extension", &self.package_extension),
            ("descriptor_extension", &self.descriptor_extension),
            ("metadata_extension", &self.metadata_extension),
        ] {
            if value.is_empty() || value.contains('.') || value.contains('/') {
                return Err(ConfigError::Validation {
                    msg: format!("{field} must be a bare extension without dots, got '{value}'"),
                });
            }
        }

        if self.algorithms.is_empty() {
            return Err(ConfigError::Validation {
                msg: "at least one checksum algorithm is required".to_string(),
            });
        }

        if self.content_root.as_os_str().is_empty()
            || self
                .content_root
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation {
                msg: format!(
                    "content_root must be a relative path inside the repository, got '{}'",
                    self.content_root.display()
                ),
            });
        }

        if self.index.file_name.trim().is_empty() {
            return Err(ConfigError::Validation {
                msg: "index.file_name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Extensions whose files receive checksum sidecars
    pub fn tracked_extensions(&self) -> [&str; 3] {
        [
            self.package_extension.as_str(),
            self.descriptor_extension.as_str(),
            self.metadata_extension.as_str(),
        ]
    }
}
