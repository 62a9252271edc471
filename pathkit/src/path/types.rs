//! The path value type.
//!
//! [`FsPath`] is an immutable descriptor: an anchor, a list of segments and
//! the tag of the backend whose operations apply to it. Building, comparing
//! and printing an `FsPath` never touches the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backend::BackendKind;
use crate::error::{Error, Result};
use crate::path::grammar::{Grammar, ParsedParts};

/// A parsed, backend-tagged path.
///
/// Two paths are equal when their backend, anchor and segments are equal.
/// The empty path (no anchor, no segments) is distinct from `.`.
///
/// # Examples
///
/// ```
/// use pathkit::FsPath;
///
/// let path = FsPath::parse("/srv//data/").unwrap();
/// assert_eq!(path.to_string(), "/srv/data");
/// assert_eq!(path, FsPath::parse("/srv/data").unwrap());
/// assert_ne!(FsPath::new(), FsPath::parse(".").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FsPath {
    backend: BackendKind,
    anchor: String,
    drive_len: usize,
    segments: Vec<String>,
}

impl FsPath {
    /// The empty local path.
    #[must_use]
    pub fn new() -> Self {
        Self::empty(BackendKind::Local)
    }

    /// The empty path of a given backend.
    #[must_use]
    pub fn empty(backend: BackendKind) -> Self {
        Self {
            backend,
            anchor: String::new(),
            drive_len: 0,
            segments: Vec::new(),
        }
    }

    /// Parse path text using the local backend's grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for text the grammar rejects (e.g. embedded
    /// NUL).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("a/./b/..").unwrap();
    /// assert_eq!(path.segments(), ["a", ".", "b", ".."]);
    /// assert!(FsPath::parse("bad\0path").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_for(BackendKind::Local, text)
    }

    /// Parse path text for a specific backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for text the backend's grammar rejects.
    pub fn parse_for(backend: BackendKind, text: &str) -> Result<Self> {
        let ParsedParts {
            anchor,
            drive_len,
            segments,
        } = backend.grammar().parse(text)?;
        Ok(Self {
            backend,
            anchor,
            drive_len,
            segments,
        })
    }

    /// Assemble a path from parts that are already known to be valid.
    pub(crate) fn from_parts(
        backend: BackendKind,
        anchor: String,
        drive_len: usize,
        segments: Vec<String>,
    ) -> Self {
        debug_assert!(drive_len <= anchor.len());
        debug_assert!(segments.iter().all(|s| !s.is_empty()));
        Self {
            backend,
            anchor,
            drive_len,
            segments,
        }
    }

    /// Convert a standard library path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the path is not valid UTF-8 or is rejected
    /// by the local grammar.
    pub fn from_std_path(path: &Path) -> Result<Self> {
        let text = path.to_str().ok_or_else(|| Error::Parse {
            input: path.to_string_lossy().into_owned(),
            reason: "path contains invalid UTF-8".to_string(),
        })?;
        Self::parse(text)
    }

    /// Render as a standard library path for local I/O.
    ///
    /// The empty path maps to `.` because operating systems reject empty
    /// path strings.
    #[must_use]
    pub fn to_std_path(&self) -> PathBuf {
        if self.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(self.to_text())
        }
    }

    /// The exact textual form; `FsPath::parse_for(b, &p.to_text()) == p`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.grammar().render(&self.anchor, &self.segments)
    }

    /// The backend whose operations apply to this path.
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// The grammar used to parse and render this path.
    #[must_use]
    pub fn grammar(&self) -> Grammar {
        self.backend.grammar()
    }

    /// Drive followed by root; empty for a relative path.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// The drive part of the anchor (`"C:"`, `"\\\\srv\\share"` or `""`).
    #[must_use]
    pub fn drive(&self) -> &str {
        &self.anchor[..self.drive_len]
    }

    /// The root part of the anchor (`"/"`, `"\\"` or `""`).
    #[must_use]
    pub fn root(&self) -> &str {
        &self.anchor[self.drive_len..]
    }

    /// The segments after the anchor.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub(crate) fn drive_len(&self) -> usize {
        self.drive_len
    }

    /// True when there is neither an anchor nor any segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor.is_empty() && self.segments.is_empty()
    }

    /// True when the anchor makes the path independent of a working directory.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.grammar().is_absolute(self.drive(), self.root())
    }
}

impl Default for FsPath {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.backend.path_type_name(), self.to_text())
    }
}

impl FromStr for FsPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&Path> for FsPath {
    type Error = Error;

    fn try_from(path: &Path) -> Result<Self> {
        Self::from_std_path(path)
    }
}

impl TryFrom<PathBuf> for FsPath {
    type Error = Error;

    fn try_from(path: PathBuf) -> Result<Self> {
        Self::from_std_path(&path)
    }
}

impl Serialize for FsPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for FsPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
