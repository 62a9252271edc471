//! Layered configuration assembly.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::cwd;
use crate::error::Result;
use crate::path::FsPath;

/// Builds a [`Config`] from files, the environment and explicit values.
///
/// Precedence, lowest first: defaults, user file, project file, files added
/// with [`ConfigBuilder::with_file`], environment, [`ConfigBuilder::with_config`].
///
/// # Examples
///
/// ```
/// use pathkit::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { max_symlink_depth: Some(8), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.max_symlink_depth, Some(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    search_dir: Option<FsPath>,
    data_dir: Option<FsPath>,
    extra_files: Vec<FsPath>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory from which project-file discovery starts (default: the
    /// process working directory).
    #[must_use]
    pub fn with_search_dir(mut self, dir: FsPath) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Directory holding the user `config.yaml` (default: `~/.pathkit`).
    #[must_use]
    pub fn with_data_dir(mut self, dir: FsPath) -> Self {
        self.data_dir = Some(dir);
        self
    }

    /// Add an explicit configuration file; later files win.
    #[must_use]
    pub fn with_file(mut self, path: FsPath) -> Self {
        self.extra_files.push(path);
        self
    }

    /// Values that override every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Do not read the user and project files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read `PATHKIT_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns the first load, parse or validation failure.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();
        if !self.skip_files {
            let search_dir = match self.search_dir {
                Some(dir) => dir,
                None => cwd::current_dir()?,
            };
            sources = ConfigLoader::load_all(&search_dir, self.data_dir.as_ref())?;
        }
        for path in self.extra_files {
            let config = ConfigLoader::load_file(&path)?;
            sources.push(ConfigSource {
                path,
                precedence: 3,
                config,
            });
        }

        let mut config = ConfigMerger::merge(sources);
        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }
        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
