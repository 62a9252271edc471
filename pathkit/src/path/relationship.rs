//! Path relationship checking.
//!
//! This module determines how two paths relate in the hierarchy: whether
//! one lies inside the other, they coincide, or they live in different
//! branches. Comparison is symbolic: both sides are normalized first and
//! the filesystem is never consulted.

use crate::path::FsPath;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use pathkit::FsPath;
/// use pathkit::path::PathRelationship;
///
/// let parent = FsPath::parse("/home/user").unwrap();
/// let child = FsPath::parse("/home/user/project").unwrap();
///
/// assert_eq!(
///     PathRelationship::between(&parent, &child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same after normalization.
    Same,

    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    /// use pathkit::path::PathRelationship;
    ///
    /// let p = |s| FsPath::parse(s).unwrap();
    /// assert_eq!(PathRelationship::between(&p("/a"), &p("/a/b")), PathRelationship::Ancestor);
    /// assert_eq!(PathRelationship::between(&p("/a/b"), &p("/a")), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between(&p("/a/./b"), &p("/a/b/")), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between(&p("/a"), &p("/b")), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &FsPath, path2: &FsPath) -> Self {
        let p1 = path1.normalize();
        let p2 = path2.normalize();

        if p1 == p2 {
            return Self::Same;
        }
        if p2.starts_with(&p1) {
            return Self::Ancestor;
        }
        if p1.starts_with(&p2) {
            return Self::Descendant;
        }
        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    /// use pathkit::path::PathRelationship;
    ///
    /// let dir = FsPath::parse("/home/user").unwrap();
    /// let file = FsPath::parse("/home/user/file.txt").unwrap();
    ///
    /// assert!(PathRelationship::is_within(&file, &dir));
    /// assert!(PathRelationship::is_within(&dir, &dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &FsPath, directory: &FsPath) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }

    /// Check if a path contains another path (ancestor or same).
    #[must_use]
    pub fn contains(path: &FsPath, other: &FsPath) -> bool {
        matches!(Self::between(path, other), Self::Ancestor | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &FsPath, path2: &FsPath) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}
