//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, CopyConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathkit::config::{Config, ConfigMerger};
///
/// let low = Config { max_symlink_depth: Some(10), ..Default::default() };
/// let high = Config { max_symlink_depth: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_symlink_depth, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Simple fields are overwritten when set in `source`; nested sections
    /// are merged field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.max_symlink_depth.is_some() {
            target.max_symlink_depth = source.max_symlink_depth;
        }

        if source.working_dir.is_some() {
            target.working_dir.clone_from(&source.working_dir);
        }

        if let Some(ref source_copy) = source.copy {
            target.copy = Some(match &target.copy {
                Some(target_copy) => Self::merge_copy(target_copy, source_copy),
                None => source_copy.clone(),
            });
        }
    }

    fn merge_copy(target: &CopyConfig, source: &CopyConfig) -> CopyConfig {
        CopyConfig {
            create_parents: source.create_parents.or(target.create_parents),
        }
    }
}
