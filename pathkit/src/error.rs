//! Error types for the pathkit library.
//!
//! Every fallible operation in the crate reports one of the variants below.
//! Pure path algebra never produces errors; parsing, metadata queries, file
//! operations and traversal do.

use std::io;

use thiserror::Error;

use crate::backend::BackendKind;
use crate::path::FsPath;

/// Result type alias for operations that may fail with a pathkit error.
///
/// # Examples
///
/// ```
/// use pathkit::{FsPath, Result};
///
/// fn example_operation() -> Result<FsPath> {
///     FsPath::parse("/srv/data")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathkit library.
#[derive(Debug, Error)]
pub enum Error {
    /// Path text (or a mode string) is structurally invalid.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The offending text.
        input: String,
        /// Why the text was rejected.
        reason: String,
    },

    /// A path that was required to exist does not.
    #[error("path not found: {path}")]
    NotFound {
        /// The missing path.
        path: FsPath,
    },

    /// The destination is occupied and neither `force` nor `exist_ok` was set.
    #[error("path already exists: {path}")]
    AlreadyExists {
        /// The occupied path.
        path: FsPath,
    },

    /// A directory was required but something else was found.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: FsPath,
    },

    /// A non-directory was required but a directory was found.
    #[error("not a file: {path}")]
    NotAFile {
        /// The offending path.
        path: FsPath,
    },

    /// A directory could not be removed because it still has entries.
    #[error("directory not empty: {path}")]
    NotEmpty {
        /// The populated directory.
        path: FsPath,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: FsPath,
    },

    /// A symlink loop was detected.
    #[error("symlink loop detected: {path}")]
    SymlinkLoop {
        /// The link at which the loop was detected.
        path: FsPath,
    },

    /// An operation was asked to span two incompatible backends.
    #[error("cannot operate across backends: {source_backend} -> {target_backend}")]
    CrossBackend {
        /// Backend of the source path.
        source_backend: BackendKind,
        /// Backend of the destination path.
        target_backend: BackendKind,
    },

    /// A well-formed path that cannot be used for the requested operation.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The invalid path.
        path: FsPath,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An operating system failure that matches none of the kinds above.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path being operated on.
        path: FsPath,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),
}

impl Error {
    /// Translate an OS error into the matching error kind for `path`.
    ///
    /// Kinds without a dedicated variant are kept as [`Error::Io`] so the
    /// original `io::ErrorKind` stays available to callers.
    #[must_use]
    pub fn from_io(err: io::Error, path: &FsPath) -> Self {
        #[cfg(unix)]
        if err.raw_os_error() == Some(libc::ELOOP) {
            return Self::SymlinkLoop { path: path.clone() };
        }

        let path = path.clone();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::IsADirectory => Self::NotAFile { path },
            io::ErrorKind::DirectoryNotEmpty => Self::NotEmpty { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::{Error, FsPath};
    ///
    /// let err = Error::NotFound { path: FsPath::parse("/nonexistent").unwrap() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::{Error, FsPath};
    ///
    /// let err = Error::PermissionDenied { path: FsPath::parse("/restricted").unwrap() };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error reports an occupied destination.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// True for errors that mean "nothing is there" from a caller's view.
    ///
    /// A path below a regular file does not exist either, so
    /// `NotADirectory` counts as missing here.
    pub(crate) fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotADirectory { .. })
    }
}
