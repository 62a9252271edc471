//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHKIT_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Bound on symlink hops during resolution.
pub const ENV_MAX_SYMLINK_DEPTH: &str = "PATHKIT_MAX_SYMLINK_DEPTH";
/// Working reference for `FsContext::from_config`.
pub const ENV_WORKING_DIR: &str = "PATHKIT_WORKING_DIR";
/// Whether copy and move create missing destination parents.
pub const ENV_COPY_CREATE_PARENTS: &str = "PATHKIT_COPY_CREATE_PARENTS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathkit::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric depth, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(depth) = env::var(ENV_MAX_SYMLINK_DEPTH) {
            config.max_symlink_depth = Some(depth.trim().parse().map_err(|_| Error::Validation {
                field: ENV_MAX_SYMLINK_DEPTH.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Ok(dir) = env::var(ENV_WORKING_DIR) {
            config.working_dir = Some(dir);
        }

        if let Ok(val) = env::var(ENV_COPY_CREATE_PARENTS) {
            let copy = config.copy.get_or_insert_with(Default::default);
            copy.create_parents = Some(Self::parse_bool(ENV_COPY_CREATE_PARENTS, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
