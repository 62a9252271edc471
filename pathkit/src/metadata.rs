//! Metadata queries.
//!
//! Stat-like queries, link-aware predicates and symlink resolution. Every
//! call goes to the path's backend; nothing is cached.
//!
//! Predicates (`exists`, `is_dir`, ...) answer `false` for paths that do
//! not exist, including paths below a regular file. Any other failure, such
//! as a permission error on a parent directory, is returned to the caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::path::FsPath;

/// Default bound on symlink hops during [`resolve`].
pub const DEFAULT_MAX_SYMLINK_DEPTH: usize = 40;

/// What kind of entry a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link (only reported by link-status queries).
    Symlink,
    /// Sockets, FIFOs, devices and anything else.
    Other,
}

/// A snapshot of an entry's attributes.
///
/// # Examples
///
/// ```no_run
/// use pathkit::{metadata, FsPath};
///
/// let meta = metadata::status(&FsPath::parse("/etc/hosts").unwrap()).unwrap();
/// println!("{} bytes, modified {}", meta.size, meta.modified);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Creation time; the status-change time where the platform has no birth time.
    pub created: DateTime<Utc>,
    /// Owning user id, where the platform has one.
    pub uid: Option<u32>,
    /// Owning group id, where the platform has one.
    pub gid: Option<u32>,
    /// Permission bits (`0o7777` mask).
    pub mode: u32,
}

impl Metadata {
    /// True for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// True for symbolic links.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Access right checked by the `is_readable` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Read permission.
    Read,
    /// Write permission.
    Write,
    /// Execute (or search, for directories) permission.
    Execute,
}

/// Metadata of the entry after following every symlink.
///
/// # Errors
///
/// Returns `NotFound` if the path or a link target is missing,
/// `PermissionDenied` if a parent directory cannot be searched, and
/// `SymlinkLoop` for a link cycle.
pub fn status(path: &FsPath) -> Result<Metadata> {
    path.backend().backend().raw_status(path)
}

/// Metadata of the entry itself, without following a final symlink.
///
/// # Errors
///
/// Same as [`status`], minus link-target failures.
pub fn link_status(path: &FsPath) -> Result<Metadata> {
    path.backend().backend().raw_link_status(path)
}

/// Whether anything exists at `path` (a dangling symlink does not).
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn exists(path: &FsPath) -> Result<bool> {
    exists_in(path.backend().backend(), path)
}

/// Whether `path` is a directory or a symlink to one.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_dir(path: &FsPath) -> Result<bool> {
    kind_in(path.backend().backend(), path, |b, p| b.raw_status(p), EntryKind::Directory)
}

/// Whether `path` is a regular file or a symlink to one.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_file(path: &FsPath) -> Result<bool> {
    kind_in(path.backend().backend(), path, |b, p| b.raw_status(p), EntryKind::File)
}

/// Whether `path` itself is a symbolic link.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_symlink(path: &FsPath) -> Result<bool> {
    kind_in(
        path.backend().backend(),
        path,
        |b, p| b.raw_link_status(p),
        EntryKind::Symlink,
    )
}

/// Whether the process may read `path`.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_readable(path: &FsPath) -> Result<bool> {
    access_in(path.backend().backend(), path, Access::Read)
}

/// Whether the process may write `path`.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_writable(path: &FsPath) -> Result<bool> {
    access_in(path.backend().backend(), path, Access::Write)
}

/// Whether the process may execute (or search) `path`.
///
/// # Errors
///
/// Returns failures other than the path being missing.
pub fn is_executable(path: &FsPath) -> Result<bool> {
    access_in(path.backend().backend(), path, Access::Execute)
}

/// The target stored in a symlink, unresolved.
///
/// # Errors
///
/// Returns `NotFound` for a missing path and `InvalidPath` for a path that
/// is not a symlink.
pub fn read_link(path: &FsPath) -> Result<FsPath> {
    path.backend().backend().raw_read_link(path)
}

/// Follow every symlink to an absolute, normalized path.
///
/// Relative input is taken relative to the process working directory. Use
/// [`FsContext::resolve`](crate::cwd::FsContext::resolve) to resolve against
/// an explicit working reference.
///
/// # Errors
///
/// Returns `NotFound` if any segment is missing and `SymlinkLoop` on a
/// link cycle or after [`DEFAULT_MAX_SYMLINK_DEPTH`] hops.
///
/// # Examples
///
/// ```no_run
/// use pathkit::{metadata, FsPath};
///
/// let real = metadata::resolve(&FsPath::parse("./target/../src").unwrap()).unwrap();
/// assert!(real.is_absolute());
/// ```
pub fn resolve(path: &FsPath) -> Result<FsPath> {
    let backend = path.backend().backend();
    let base = if path.is_absolute() {
        path.anchor_path()
    } else {
        backend.raw_current_dir()?
    };
    resolve_with(backend, path, &base, DEFAULT_MAX_SYMLINK_DEPTH)
}

pub(crate) fn exists_in(backend: &dyn Backend, path: &FsPath) -> Result<bool> {
    swallow_missing(backend.raw_status(path).map(|_| true))
}

fn kind_in(
    backend: &dyn Backend,
    path: &FsPath,
    query: fn(&dyn Backend, &FsPath) -> Result<Metadata>,
    kind: EntryKind,
) -> Result<bool> {
    swallow_missing(query(backend, path).map(|meta| meta.kind == kind))
}

fn access_in(backend: &dyn Backend, path: &FsPath, access: Access) -> Result<bool> {
    if !exists_in(backend, path)? {
        return Ok(false);
    }
    swallow_missing(backend.raw_access(path, access))
}

fn swallow_missing(result: Result<bool>) -> Result<bool> {
    match result {
        Err(e) if e.is_missing() => Ok(false),
        other => other,
    }
}

/// Resolve `path` segment by segment against `base`.
///
/// Each link hop records the link together with the segments still to be
/// resolved; meeting the same state twice is a cycle. `max_depth` bounds
/// chains that never repeat a state but never terminate either (a link
/// pointing into itself).
pub(crate) fn resolve_with(
    backend: &dyn Backend,
    path: &FsPath,
    base: &FsPath,
    max_depth: usize,
) -> Result<FsPath> {
    let start = base.join_path(path);
    let mut pending: Vec<String> = start.segments().iter().rev().cloned().collect();
    let mut resolved = start.anchor_path();
    let mut seen: HashSet<(FsPath, Vec<String>)> = HashSet::new();
    let mut hops = 0usize;

    while let Some(segment) = pending.pop() {
        match segment.as_str() {
            "." => continue,
            ".." => {
                resolved = resolved.parent();
                continue;
            }
            _ => {}
        }

        let candidate = resolved.child(&segment);
        let meta = backend.raw_link_status(&candidate)?;
        if !meta.is_symlink() {
            resolved = candidate;
            continue;
        }

        hops += 1;
        if hops > max_depth || !seen.insert((candidate.clone(), pending.clone())) {
            log::debug!("symlink loop at {candidate} while resolving {path}");
            return Err(Error::SymlinkLoop { path: candidate });
        }

        let target = backend.raw_read_link(&candidate)?;
        log::trace!("{candidate} -> {target}");
        if !target.anchor().is_empty() {
            resolved = resolved.join_path(&target.anchor_path());
        }
        pending.extend(target.segments().iter().rev().cloned());
    }

    Ok(resolved)
}
