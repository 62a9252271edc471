//! Symbolic normalization and home-directory expansion.
//!
//! This module provides functionality to:
//! - Resolve `.` and `..` segments without touching the filesystem
//! - Expand a leading `~` to the current user's home directory

use crate::error::{Error, Result};
use crate::path::FsPath;

/// Resolve `.` and `..` in a segment list.
///
/// `..` pops the previous ordinary segment. With no ordinary segment to pop
/// it is kept on a relative path and dropped under a root, since the parent
/// of a root is the root itself.
///
/// # Examples
///
/// ```
/// use pathkit::path::normalize::resolve_components;
///
/// fn segs(v: &[&str]) -> Vec<String> {
///     v.iter().map(|s| s.to_string()).collect()
/// }
///
/// assert_eq!(resolve_components(true, &segs(&["a", ".", "b", "..", "c"])), segs(&["a", "c"]));
/// assert_eq!(resolve_components(false, &segs(&["..", "a", "..", ".."])), segs(&["..", ".."]));
/// assert_eq!(resolve_components(true, &segs(&["..", "a"])), segs(&["a"]));
/// ```
#[must_use]
pub fn resolve_components(rooted: bool, segments: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment.as_str() {
            "." => {}
            ".." => {
                if result.last().is_some_and(|last| last != "..") {
                    result.pop();
                } else if !rooted {
                    result.push(segment.clone());
                }
            }
            _ => result.push(segment.clone()),
        }
    }

    result
}

/// Expand a leading `~` segment to the home directory.
///
/// Handles `~` and `~/path`; `~user` is rejected. Paths that do not start
/// with `~` are returned unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined
/// - The home directory is not representable as an `FsPath`
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use pathkit::FsPath;
/// use pathkit::path::normalize::expand_user;
///
/// let expanded = expand_user(&FsPath::parse("~/project").unwrap()).unwrap();
/// assert!(expanded.is_absolute());
/// assert_eq!(expanded.basename(), "project");
///
/// let plain = FsPath::parse("/absolute").unwrap();
/// assert_eq!(expand_user(&plain).unwrap(), plain);
/// ```
pub fn expand_user(path: &FsPath) -> Result<FsPath> {
    let Some(first) = path.segments().first() else {
        return Ok(path.clone());
    };
    if !path.anchor().is_empty() || !first.starts_with('~') {
        return Ok(path.clone());
    }
    if first != "~" {
        return Err(Error::InvalidPath {
            path: path.clone(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        });
    }

    let home = home_dir(path)?;
    Ok(home.with_segments(
        home.segments()
            .iter()
            .chain(&path.segments()[1..])
            .cloned()
            .collect(),
    ))
}

fn home_dir(requested: &FsPath) -> Result<FsPath> {
    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: requested.clone(),
        reason: "Cannot determine home directory".to_string(),
    })?;
    FsPath::from_std_path(&home)
}
