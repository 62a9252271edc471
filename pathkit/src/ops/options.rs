//! Option sets for the mutating operations.

use crate::config::CopyConfig;

/// Options for [`make_dir`](super::make_dir).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MakeDirOptions {
    /// Create missing parents too.
    pub recursive: bool,

    /// Succeed if the directory already exists.
    pub exist_ok: bool,
}

impl MakeDirOptions {
    /// Creates options with both flags off.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::ops::MakeDirOptions;
    ///
    /// let options = MakeDirOptions::new().with_recursive(true);
    /// assert!(options.recursive);
    /// assert!(!options.exist_ok);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recursive: false,
            exist_ok: false,
        }
    }

    /// Shorthand for `mkdir -p`: recursive and idempotent.
    #[must_use]
    pub const fn parents() -> Self {
        Self {
            recursive: true,
            exist_ok: true,
        }
    }

    /// Sets the recursive flag.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the `exist_ok` flag.
    #[must_use]
    pub const fn with_exist_ok(mut self, exist_ok: bool) -> Self {
        self.exist_ok = exist_ok;
        self
    }
}

/// Options for [`remove`](super::remove).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove directories together with their contents.
    pub recursive: bool,

    /// Succeed if the path is already absent.
    pub force: bool,
}

impl RemoveOptions {
    /// Creates options with both flags off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recursive: false,
            force: false,
        }
    }

    /// Shorthand for `rm -rf`.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            recursive: true,
            force: true,
        }
    }

    /// Sets the recursive flag.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Options for [`copy`](super::copy) and [`move_to`](super::move_to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Overwrite an existing destination.
    pub force: bool,

    /// Create the destination's missing parent directories.
    pub create_parents: bool,
}

impl CopyOptions {
    /// Creates options that refuse to overwrite and create parents.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::ops::CopyOptions;
    ///
    /// let options = CopyOptions::new().with_force(true);
    /// assert!(options.force);
    /// assert!(options.create_parents);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            force: false,
            create_parents: true,
        }
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Sets the `create_parents` flag.
    #[must_use]
    pub const fn with_create_parents(mut self, create_parents: bool) -> Self {
        self.create_parents = create_parents;
        self
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CopyConfig> for CopyOptions {
    fn from(config: &CopyConfig) -> Self {
        Self {
            force: false,
            create_parents: config.create_parents.unwrap_or(true),
        }
    }
}
