//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading pathkit configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::FsPath;
use crate::{metadata, ops};

/// Name of the per-project configuration file.
pub const PROJECT_FILE: &str = "pathkit.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: FsPath,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use pathkit::config::ConfigLoader;
/// use pathkit::FsPath;
///
/// let sources = ConfigLoader::load_all(&FsPath::parse(".").unwrap(), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.pathkit/config.yaml` (precedence 1)
    /// 2. The nearest `pathkit.yaml` walking up from `start_dir` (precedence 2)
    ///
    /// The `data_dir` parameter allows overriding where the user config is loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(start_dir: &FsPath, data_dir: Option<&FsPath>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }
        if let Some(project) = Self::discover_project_config(start_dir)? {
            sources.push(project);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Load user configuration file.
    ///
    /// If `data_dir` is provided, loads from `{data_dir}/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_user_config(data_dir: Option<&FsPath>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join("config.yaml")?,
            None => Self::user_config_path()?,
        };

        if !metadata::exists(&config_path)? {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Find the nearest project file at or above `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovered file cannot be read or parsed.
    pub fn discover_project_config(start_dir: &FsPath) -> Result<Option<ConfigSource>> {
        let start = start_dir.normalize();
        for dir in std::iter::once(start.clone()).chain(start.parents()) {
            let candidate = dir.join(PROJECT_FILE)?;
            if metadata::is_file(&candidate)? {
                log::debug!("using project configuration {candidate}");
                let config = Self::load_file(&candidate)?;
                return Ok(Some(ConfigSource {
                    path: candidate,
                    precedence: 2,
                    config,
                }));
            }
        }
        Ok(None)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &FsPath) -> Result<Config> {
        let contents = ops::read_text(path)?;
        Self::parse(&contents).map_err(|e| Error::Validation {
            field: path.to_string(),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse YAML text into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for malformed YAML or unknown fields.
    pub fn parse(text: &str) -> Result<Config> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Get user config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn user_config_path() -> Result<FsPath> {
        let Some(home) = home::home_dir() else {
            return Err(Error::InvalidPath {
                path: FsPath::parse("~")?,
                reason: "Cannot determine home directory".to_string(),
            });
        };
        FsPath::from_std_path(&home)?.join_all([".pathkit", "config.yaml"])
    }
}
