//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, CopyConfig};
use super::validator::{ConfigValidator, MAX_SYMLINK_DEPTH_LIMIT};
use proptest::prelude::*;

fn working_dir_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 0..4).prop_map(|segments| {
        let root = if cfg!(windows) { r"C:\" } else { "/" };
        format!("{root}{}", segments.join(if cfg!(windows) { r"\" } else { "/" }))
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1usize..=MAX_SYMLINK_DEPTH_LIMIT),
        prop::option::of(working_dir_strategy()),
        prop::option::of(prop::option::of(any::<bool>())),
    )
        .prop_map(|(depth, working_dir, copy)| Config {
            max_symlink_depth: depth,
            working_dir,
            copy: copy.map(|create_parents| CopyConfig { create_parents }),
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Configuration merging preserves non-None values from higher precedence
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.max_symlink_depth, high.max_symlink_depth.or(low.max_symlink_depth));
        prop_assert_eq!(
            result.working_dir.as_deref(),
            high.working_dir.as_deref().or(low.working_dir.as_deref())
        );

        let low_parents = low.copy.as_ref().and_then(|c| c.create_parents);
        let high_parents = high.copy.as_ref().and_then(|c| c.create_parents);
        let merged_parents = result.copy.as_ref().and_then(|c| c.create_parents);
        prop_assert_eq!(merged_parents, high_parents.or(low_parents));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging valid configs yields a valid config
    #[test]
    fn valid_configs_stay_valid_after_merge(a in config_strategy(), b in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&a).is_ok());
        prop_assert!(ConfigValidator::validate(&b).is_ok());

        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

    // Depths outside the accepted range are always rejected
    #[test]
    fn out_of_range_depth_rejected(depth in (MAX_SYMLINK_DEPTH_LIMIT + 1)..usize::MAX) {
        let config = Config { max_symlink_depth: Some(depth), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
