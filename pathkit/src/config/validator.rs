//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::FsPath;

/// Largest accepted `max_symlink_depth`.
pub const MAX_SYMLINK_DEPTH_LIMIT: usize = 1024;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use pathkit::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_symlink_depth: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(depth) = config.max_symlink_depth {
            Self::validate_depth(depth)?;
        }

        if let Some(ref dir) = config.working_dir {
            Self::validate_working_dir(dir)?;
        }

        Ok(())
    }

    fn validate_depth(depth: usize) -> Result<()> {
        if depth == 0 || depth > MAX_SYMLINK_DEPTH_LIMIT {
            return Err(Error::Validation {
                field: "max_symlink_depth".into(),
                message: format!("Must be between 1 and {MAX_SYMLINK_DEPTH_LIMIT}"),
            });
        }
        Ok(())
    }

    fn validate_working_dir(dir: &str) -> Result<()> {
        let path = FsPath::parse(dir).map_err(|e| Error::Validation {
            field: "working_dir".into(),
            message: e.to_string(),
        })?;
        if !path.is_absolute() {
            return Err(Error::Validation {
                field: "working_dir".into(),
                message: format!("Must be an absolute path, got '{dir}'"),
            });
        }
        Ok(())
    }
}
