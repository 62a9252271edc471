//! Creating and removing entries.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::metadata::EntryKind;
use crate::path::FsPath;
use crate::walk::{Walk, WalkOrder};

use super::options::{MakeDirOptions, RemoveOptions};

/// Create `path` as a directory.
///
/// # Errors
///
/// - `NotFound` (naming the parent) when the parent is missing and
///   `recursive` is off
/// - `AlreadyExists` when something is at `path`, unless it is a directory
///   and `exist_ok` is on
///
/// # Examples
///
/// ```no_run
/// use pathkit::ops::{make_dir, MakeDirOptions};
/// use pathkit::FsPath;
///
/// let dir = FsPath::parse("build/out/logs").unwrap();
/// make_dir(&dir, MakeDirOptions::parents()).unwrap();
/// make_dir(&dir, MakeDirOptions::parents()).unwrap();
/// ```
pub fn make_dir(path: &FsPath, options: MakeDirOptions) -> Result<()> {
    make_dir_in(path.backend().backend(), path, options)
}

pub(crate) fn make_dir_in(
    backend: &dyn Backend,
    path: &FsPath,
    options: MakeDirOptions,
) -> Result<()> {
    match backend.raw_make_dir(path) {
        Ok(()) => {
            log::debug!("created directory {path}");
            Ok(())
        }
        Err(Error::AlreadyExists { .. }) if options.exist_ok => {
            if backend.raw_status(path)?.is_dir() {
                Ok(())
            } else {
                Err(Error::AlreadyExists { path: path.clone() })
            }
        }
        Err(Error::NotFound { .. }) if options.recursive && path.has_parent() => {
            let parent = path.parent();
            make_dir_in(backend, &parent, MakeDirOptions::parents())?;
            make_dir_in(backend, path, options.with_recursive(false))
        }
        Err(Error::NotFound { .. }) => Err(Error::NotFound {
            path: path.parent(),
        }),
        Err(e) => Err(e),
    }
}

/// Remove a file, symlink or (with `recursive`) a directory tree.
///
/// Symlinks are removed, never followed.
///
/// # Errors
///
/// - `NotFound` when nothing is at `path`, unless `force` is on
/// - `NotEmpty` for a populated directory without `recursive`
///
/// # Examples
///
/// ```no_run
/// use pathkit::ops::{remove, RemoveOptions};
/// use pathkit::FsPath;
///
/// let dir = FsPath::parse("build").unwrap();
/// remove(&dir, RemoveOptions::all()).unwrap();
/// remove(&dir, RemoveOptions::all()).unwrap();
/// ```
pub fn remove(path: &FsPath, options: RemoveOptions) -> Result<()> {
    remove_in(path.backend().backend(), path, options)
}

pub(crate) fn remove_in(backend: &dyn Backend, path: &FsPath, options: RemoveOptions) -> Result<()> {
    let meta = match backend.raw_link_status(path) {
        Ok(meta) => meta,
        Err(e) if options.force && e.is_missing() => return Ok(()),
        Err(e) => return Err(e),
    };

    if meta.kind == EntryKind::Directory && options.recursive {
        for entry in Walk::with_backend(backend, path, WalkOrder::BottomUp) {
            backend.raw_remove(&entry?.path)?;
        }
    }

    backend.raw_remove(path)?;
    log::debug!("removed {path}");
    Ok(())
}

/// Create an empty file, or update the modification time of an existing one.
///
/// # Errors
///
/// Returns `NotFound` if the parent directory is missing.
pub fn touch(path: &FsPath) -> Result<()> {
    path.backend().backend().raw_touch(path)
}

/// Create a symlink at `link` whose stored target is `target`.
///
/// `target` is stored as given; a relative target is interpreted relative
/// to the link's directory when followed.
///
/// # Errors
///
/// Returns `AlreadyExists` if `link` is occupied and `CrossBackend` if the
/// two paths belong to different backends.
pub fn symlink(target: &FsPath, link: &FsPath) -> Result<()> {
    super::same_backend(target, link)?;
    link.backend().backend().raw_symlink(target, link)?;
    log::debug!("linked {link} -> {target}");
    Ok(())
}
