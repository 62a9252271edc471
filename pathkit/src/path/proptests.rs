//! Property-based tests for path algebra.
//!
//! Note: The normalize module already has property tests for normalization.
//! This module focuses on joins, parents, relative paths and relationships.

use super::relationship::PathRelationship;
use super::FsPath;
use proptest::prelude::*;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = FsPath> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        FsPath::parse(&format!("/{}", parts.join("/"))).unwrap()
    })
}

fn messy_path_strategy() -> impl Strategy<Value = FsPath> {
    let segment = prop_oneof![
        3 => path_component_strategy(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ];
    (any::<bool>(), prop::collection::vec(segment, 0..8)).prop_map(|(rooted, parts)| {
        let prefix = if rooted { "/" } else { "" };
        FsPath::parse(&format!("{prefix}{}", parts.join("/"))).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // parse(to_text(p)) == p
    #[test]
    fn path_round_trip(path in messy_path_strategy()) {
        prop_assert_eq!(FsPath::parse(&path.to_text()).unwrap(), path);
    }

    // join(p, a, b) == join(join(p, a), b)
    #[test]
    fn join_associative(
        base in messy_path_strategy(),
        a in path_component_strategy(),
        b in path_component_strategy(),
    ) {
        let all = base.join_all([a.as_str(), b.as_str()]).unwrap();
        let stepwise = base.join(&a).unwrap().join(&b).unwrap();
        prop_assert_eq!(all, stepwise);
    }

    // Joining nothing is the identity
    #[test]
    fn join_identity(base in messy_path_strategy()) {
        prop_assert_eq!(base.join_all::<_, &str>([]).unwrap(), base.clone());
        prop_assert_eq!(base.join_path(&FsPath::new()), base);
    }

    // parents() is strictly decreasing and ends at the anchor
    #[test]
    fn parents_strictly_decreasing(path in messy_path_strategy()) {
        let parents: Vec<FsPath> = path.parents().collect();
        let mut previous = path.segments().len();
        for parent in &parents {
            prop_assert!(parent.segments().len() < previous);
            previous = parent.segments().len();
        }
        if let Some(last) = parents.last() {
            prop_assert!(last.segments().is_empty());
            prop_assert_eq!(last.anchor(), path.anchor());
        }
    }

    // base / relative(target, base) normalizes to normalize(target)
    #[test]
    fn relative_inverse(target in absolute_path_strategy(), base in absolute_path_strategy()) {
        let rel = target.relative_to(&base).unwrap();
        prop_assert_eq!(base.join_path(&rel).normalize(), target.normalize());
    }

    // Path relationship is reflexive: path is always identical to itself
    #[test]
    fn path_relationship_reflexive(path in absolute_path_strategy()) {
        let rel = PathRelationship::between(&path, &path);
        prop_assert_eq!(rel, PathRelationship::Same);
    }

    // Containment is transitive
    #[test]
    fn path_containment_transitive(base in absolute_path_strategy(), parts1 in 1..5usize, parts2 in 1..5usize) {
        let path_b = base.join_all((0..parts1).map(|i| format!("sub{i}"))).unwrap();
        let path_c = path_b.join_all((0..parts2).map(|i| format!("deep{i}"))).unwrap();

        let rel_ab = PathRelationship::between(&base, &path_b);
        let rel_bc = PathRelationship::between(&path_b, &path_c);
        let rel_ac = PathRelationship::between(&base, &path_c);

        prop_assert_eq!(rel_ab, PathRelationship::Ancestor);
        prop_assert_eq!(rel_bc, PathRelationship::Ancestor);
        prop_assert_eq!(rel_ac, PathRelationship::Ancestor);
    }

    // Relationship symmetry: if A is ancestor of B, then B is descendant of A
    #[test]
    fn path_relationship_symmetric(path1 in absolute_path_strategy(), path2 in absolute_path_strategy()) {
        let rel_12 = PathRelationship::between(&path1, &path2);
        let rel_21 = PathRelationship::between(&path2, &path1);

        let is_symmetric = matches!(
            (rel_12, rel_21),
            (PathRelationship::Ancestor, PathRelationship::Descendant)
                | (PathRelationship::Descendant, PathRelationship::Ancestor)
                | (PathRelationship::Same, PathRelationship::Same)
                | (PathRelationship::Unrelated, PathRelationship::Unrelated)
        );

        prop_assert!(is_symmetric, "Invalid symmetry: {:?} <-> {:?}", rel_12, rel_21);
    }

    // Ancestors really are ancestors
    #[test]
    fn parents_are_ancestors(path in absolute_path_strategy()) {
        for parent in path.parents() {
            prop_assert_eq!(
                PathRelationship::between(&parent, &path),
                PathRelationship::Ancestor
            );
        }
    }
}
