//! Backend abstraction.
//!
//! A backend supplies the raw primitives the metadata, file-operation and
//! traversal layers are built on. Every [`FsPath`] carries a
//! [`BackendKind`] tag; the tag selects the backend that serves it. The set
//! of tags is closed: adding a backend means adding a variant here and an
//! implementation of [`Backend`].

use std::fmt;
use std::io::{Read, Seek, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metadata::{Access, Metadata};
use crate::ops::OpenMode;
use crate::path::{FsPath, Grammar};
use crate::walk::DirEntry;

pub mod local;

pub use local::LocalBackend;

/// A readable, writable, seekable byte stream returned by [`Backend::raw_open`].
pub trait ByteStream: Read + Write + Seek + Send + fmt::Debug {}

impl<T: Read + Write + Seek + Send + fmt::Debug> ByteStream for T {}

/// What became of a rename request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The entry was renamed in place.
    Renamed,
    /// Source and destination are on different devices; nothing was changed.
    CrossDevice,
}

/// Raw filesystem primitives.
///
/// Implementations translate their native failures into the crate's
/// [`Error`](crate::Error) kinds and never follow more links than the
/// method documents. Higher layers add options, recursion and error
/// policy on top.
///
/// # Examples
///
/// ```
/// use pathkit::backend::{Backend, LocalBackend};
/// use pathkit::FsPath;
///
/// let backend = LocalBackend;
/// let cwd = backend.raw_current_dir().unwrap();
/// assert!(cwd.is_absolute());
/// assert!(backend.raw_status(&cwd).unwrap().is_dir());
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Separator and anchor conventions for this backend's paths.
    fn grammar(&self) -> Grammar;

    /// Metadata of the entry, following every symlink.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry (or a link target) is missing.
    fn raw_status(&self, path: &FsPath) -> Result<Metadata>;

    /// Metadata of the entry itself; a final symlink is not followed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing.
    fn raw_link_status(&self, path: &FsPath) -> Result<Metadata>;

    /// Immediate children of a directory, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotADirectory` as appropriate.
    fn raw_list(&self, path: &FsPath) -> Result<Vec<DirEntry>>;

    /// Create one directory whose parent already exists.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if anything is at `path`, `NotFound` if the
    /// parent is missing.
    fn raw_make_dir(&self, path: &FsPath) -> Result<()>;

    /// Remove one file, symlink or empty directory.
    ///
    /// # Errors
    ///
    /// Returns `NotEmpty` for a populated directory.
    fn raw_remove(&self, path: &FsPath) -> Result<()>;

    /// Open a byte stream.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for read modes on a missing file and `NotAFile`
    /// for a directory.
    fn raw_open(&self, path: &FsPath, mode: OpenMode) -> Result<Box<dyn ByteStream>>;

    /// Copy the contents of one regular file, replacing `dst`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error for either side.
    fn raw_copy_file(&self, src: &FsPath, dst: &FsPath) -> Result<()>;

    /// Rename an entry, replacing a file at `dst`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; a cross-device request is reported as
    /// [`RenameOutcome::CrossDevice`] instead of an error.
    fn raw_rename(&self, src: &FsPath, dst: &FsPath) -> Result<RenameOutcome>;

    /// The target text stored in a symlink.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `path` is not a symlink.
    fn raw_read_link(&self, path: &FsPath) -> Result<FsPath>;

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if `link` is occupied.
    fn raw_symlink(&self, target: &FsPath, link: &FsPath) -> Result<()>;

    /// Whether the calling process may access the entry in the given way.
    ///
    /// # Errors
    ///
    /// Returns an error only when the check itself fails.
    fn raw_access(&self, path: &FsPath, access: Access) -> Result<bool>;

    /// Create an empty file or bump the modification time of an existing one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the parent is missing.
    fn raw_touch(&self, path: &FsPath) -> Result<()>;

    /// The process working directory as an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory was removed.
    fn raw_current_dir(&self) -> Result<FsPath>;

    /// Replace the process working directory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotADirectory` as appropriate.
    fn raw_set_current_dir(&self, path: &FsPath) -> Result<()>;
}

static LOCAL: LocalBackend = LocalBackend;

/// Tag selecting the backend that serves a path.
///
/// # Examples
///
/// ```
/// use pathkit::backend::BackendKind;
/// use pathkit::FsPath;
///
/// assert_eq!(FsPath::parse("a").unwrap().backend(), BackendKind::Local);
/// assert_eq!(BackendKind::Local.to_string(), "local");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum BackendKind {
    /// The operating system's filesystem.
    #[default]
    Local,
}

impl BackendKind {
    /// Grammar used to parse and render paths of this kind.
    #[must_use]
    pub fn grammar(self) -> Grammar {
        self.backend().grammar()
    }

    /// Name shown in a path's debug form.
    #[must_use]
    pub const fn path_type_name(self) -> &'static str {
        match self {
            Self::Local => "LocalPath",
        }
    }

    /// The backend implementation for this tag.
    #[must_use]
    pub fn backend(self) -> &'static dyn Backend {
        match self {
            Self::Local => &LOCAL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
        }
    }
}
