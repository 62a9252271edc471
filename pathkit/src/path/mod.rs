//! Path values and pure path algebra.
//!
//! This module provides the [`FsPath`] value type and everything that can be
//! computed from it without touching a filesystem.
//!
//! # Key Concepts
//!
//! ## Parsing
//!
//! Text is split according to the backend's [`Grammar`]: separators are
//! collapsed, the anchor (drive plus root) is recognized, and `.` / `..`
//! segments are kept verbatim. Serializing a path and parsing it back
//! always yields the same value.
//!
//! ## Normalization
//!
//! [`FsPath::normalize`] resolves `.` and `..` symbolically. It never
//! follows links; for that, see [`crate::metadata::resolve`].
//!
//! # Examples
//!
//! ```
//! use pathkit::FsPath;
//!
//! let root = FsPath::parse("/srv").unwrap();
//! let file = (&root / "bar/../foo/report.tar.gz").unwrap();
//!
//! assert_eq!(file.normalize().to_string(), "/srv/foo/report.tar.gz");
//! assert_eq!(file.extensions(), ["tar", "gz"]);
//! ```
//!
//! # Path Relationships
//!
//! The module also provides functionality to determine relationships between
//! paths:
//!
//! ```
//! use pathkit::FsPath;
//! use pathkit::path::PathRelationship;
//!
//! let parent = FsPath::parse("/home/user").unwrap();
//! let child = FsPath::parse("/home/user/project").unwrap();
//!
//! let rel = PathRelationship::between(&parent, &child);
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert!(rel.is_hierarchical());
//! ```

mod algebra;
pub mod grammar;
pub mod normalize;
pub mod relationship;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use algebra::Parents;
pub use grammar::{Grammar, ParsedParts};
pub use normalize::expand_user;
pub use relationship::PathRelationship;
pub use types::FsPath;
