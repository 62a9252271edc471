//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; consumers
//! apply the defaults documented on each field.

use serde::{Deserialize, Serialize};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use pathkit::config::{Config, CopyConfig};
///
/// let config = Config {
///     max_symlink_depth: Some(16),
///     copy: Some(CopyConfig { create_parents: Some(false) }),
///     ..Default::default()
/// };
/// assert_eq!(config.working_dir, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bound on symlink hops during resolution (default 40).
    pub max_symlink_depth: Option<usize>,

    /// Absolute path used as the working reference of an `FsContext`
    /// (default: the process working directory).
    pub working_dir: Option<String>,

    /// Copy and move settings.
    pub copy: Option<CopyConfig>,
}

/// Copy and move settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Create the destination's missing parents (default true).
    pub create_parents: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
max_symlink_depth: 20
working_dir: /srv/app
copy:
  create_parents: false
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.max_symlink_depth, Some(20));
        assert_eq!(config.working_dir.as_deref(), Some("/srv/app"));
        assert_eq!(config.copy.unwrap().create_parents, Some(false));
    }

    #[test]
    fn test_parse_empty_mapping() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("max_depth: 3");
        assert!(result.is_err());

        let result: Result<Config, _> = serde_yaml::from_str("copy:\n  force: true");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = Config {
            max_symlink_depth: Some(8),
            working_dir: None,
            copy: Some(CopyConfig::default()),
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
