//! Common test utilities for integration tests.
//!
//! This module provides a temporary directory fixture and an environment
//! guard shared by the pathkit integration suites.

use std::env;
use std::fs;

use pathkit::FsPath;
use tempfile::TempDir;

/// A temporary directory addressed through [`FsPath`].
///
/// The root is canonicalized so it compares equal to what the process
/// reports after a `change_dir` into it. The directory is removed when the
/// fixture is dropped.
#[allow(dead_code)]
pub struct TempTree {
    dir: TempDir,
    root: FsPath,
}

#[allow(dead_code)]
impl TempTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let canonical = fs::canonicalize(dir.path()).unwrap();
        let root = FsPath::from_std_path(&canonical).unwrap();
        Self { dir, root }
    }

    /// Creates the walk fixture:
    ///
    /// ```text
    /// root/
    ///   bar/qux/quux.tar.gz
    ///   foo/baz.txt
    ///   fred/
    /// ```
    pub fn sample() -> Self {
        let tree = Self::new();
        tree.file("foo/baz.txt", "baz");
        tree.file("bar/qux/quux.tar.gz", "quux");
        tree.dir("fred");
        tree
    }

    /// The root as an [`FsPath`].
    pub fn root(&self) -> &FsPath {
        &self.root
    }

    /// The root as a std path.
    pub fn std_root(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Join slash-separated `relative` onto the root.
    pub fn path(&self, relative: &str) -> FsPath {
        self.root.join_all(relative.split('/')).unwrap()
    }

    /// Create a file (and its parents) with `contents`.
    pub fn file(&self, relative: &str, contents: &str) -> FsPath {
        let path = self.path(relative);
        let std_path = path.to_std_path();
        if let Some(parent) = std_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&std_path, contents).unwrap();
        path
    }

    /// Create a directory (and its parents).
    pub fn dir(&self, relative: &str) -> FsPath {
        let path = self.path(relative);
        fs::create_dir_all(path.to_std_path()).unwrap();
        path
    }
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using environment variables must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Set `key` to `value` until the guard drops.
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Remove `key` until the guard drops.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear every `PATHKIT_*` variable the library reads.
#[allow(dead_code)]
pub fn clear_pathkit_env_vars() -> Vec<EnvGuard> {
    [
        "PATHKIT_MAX_SYMLINK_DEPTH",
        "PATHKIT_WORKING_DIR",
        "PATHKIT_COPY_CREATE_PARENTS",
        "PATHKIT_LOG_MODE",
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}
