//! Copying and moving entries.

use crate::backend::{Backend, RenameOutcome};
use crate::error::{Error, Result};
use crate::metadata::EntryKind;
use crate::path::{FsPath, PathRelationship};
use crate::walk::{Walk, WalkOrder};

use super::dir::{make_dir_in, remove_in};
use super::options::{CopyOptions, MakeDirOptions, RemoveOptions};

/// Copy a file, or a directory tree, from `src` to `dst`.
///
/// A symlink given as `src` is followed; symlinks inside a copied tree are
/// recreated as symlinks with the same stored target.
///
/// # Errors
///
/// - `NotFound` if `src` is missing
/// - `AlreadyExists` if `dst` is occupied and `force` is off
/// - `InvalidPath` when copying a directory into itself, onto a directory
///   that contains `src`, or when `src` is a special file
/// - `CrossBackend` when the paths belong to different backends
///
/// # Examples
///
/// ```no_run
/// use pathkit::ops::{copy, CopyOptions};
/// use pathkit::FsPath;
///
/// let src = FsPath::parse("assets").unwrap();
/// let dst = FsPath::parse("dist/assets").unwrap();
/// copy(&src, &dst, CopyOptions::new().with_force(true)).unwrap();
/// ```
pub fn copy(src: &FsPath, dst: &FsPath, options: CopyOptions) -> Result<()> {
    super::same_backend(src, dst)?;
    copy_in(src.backend().backend(), src, dst, options)
}

pub(crate) fn copy_in(
    backend: &dyn Backend,
    src: &FsPath,
    dst: &FsPath,
    options: CopyOptions,
) -> Result<()> {
    let kind = backend.raw_status(src)?.kind;
    ensure_copyable(src, kind)?;
    check_destination(backend, src, dst, kind)?;
    prepare_destination(backend, dst, options)?;
    copy_entry(backend, src, kind, dst)?;
    log::debug!("copied {src} -> {dst}");
    Ok(())
}

/// Move `src` to `dst`, renaming when possible.
///
/// When the backend cannot rename across devices, the entry is copied and
/// the source removed. Moving a path onto itself does nothing.
///
/// # Errors
///
/// Same as [`copy`]. A symlink given as `src` is moved as a link. Special
/// files can be renamed but not moved across devices.
pub fn move_to(src: &FsPath, dst: &FsPath, options: CopyOptions) -> Result<()> {
    super::same_backend(src, dst)?;
    move_in(src.backend().backend(), src, dst, options)
}

pub(crate) fn move_in(
    backend: &dyn Backend,
    src: &FsPath,
    dst: &FsPath,
    options: CopyOptions,
) -> Result<()> {
    for path in [src, dst] {
        if path.is_empty() {
            return Err(Error::InvalidPath {
                path: path.clone(),
                reason: "cannot rename the empty path".to_string(),
            });
        }
    }
    let kind = backend.raw_link_status(src)?.kind;
    if PathRelationship::between(&absolute_in(backend, src)?, &absolute_in(backend, dst)?)
        == PathRelationship::Same
    {
        return Ok(());
    }
    check_destination(backend, src, dst, kind)?;
    prepare_destination(backend, dst, options)?;

    match backend.raw_rename(src, dst)? {
        RenameOutcome::Renamed => {
            log::debug!("renamed {src} -> {dst}");
        }
        RenameOutcome::CrossDevice => {
            log::debug!("{src} and {dst} are on different devices; copying instead");
            copy_entry(backend, src, kind, dst)?;
            remove_in(backend, src, RemoveOptions::new().with_recursive(true))?;
        }
    }
    Ok(())
}

fn absolute_in(backend: &dyn Backend, path: &FsPath) -> Result<FsPath> {
    if path.is_absolute() {
        Ok(path.clone())
    } else {
        Ok(backend.raw_current_dir()?.join_path(path))
    }
}

fn check_destination(
    backend: &dyn Backend,
    src: &FsPath,
    dst: &FsPath,
    kind: EntryKind,
) -> Result<()> {
    let relation =
        PathRelationship::between(&absolute_in(backend, src)?, &absolute_in(backend, dst)?);
    match relation {
        PathRelationship::Same => Err(Error::InvalidPath {
            path: dst.clone(),
            reason: format!("source and destination are both {src}"),
        }),
        PathRelationship::Ancestor if kind == EntryKind::Directory => Err(Error::InvalidPath {
            path: dst.clone(),
            reason: format!("cannot place directory {src} inside itself"),
        }),
        // Replacing dst would remove src along with it.
        PathRelationship::Descendant => Err(Error::InvalidPath {
            path: dst.clone(),
            reason: format!("destination contains the source {src}"),
        }),
        _ => Ok(()),
    }
}

fn ensure_copyable(src: &FsPath, kind: EntryKind) -> Result<()> {
    if kind == EntryKind::Other {
        return Err(Error::InvalidPath {
            path: src.clone(),
            reason: "special files cannot be copied".to_string(),
        });
    }
    Ok(())
}

fn prepare_destination(backend: &dyn Backend, dst: &FsPath, options: CopyOptions) -> Result<()> {
    match backend.raw_link_status(dst) {
        Ok(_) if !options.force => return Err(Error::AlreadyExists { path: dst.clone() }),
        Ok(_) => remove_in(backend, dst, RemoveOptions::all())?,
        Err(e) if e.is_missing() => {}
        Err(e) => return Err(e),
    }

    if options.create_parents && dst.has_parent() {
        make_dir_in(backend, &dst.parent(), MakeDirOptions::parents())?;
    }
    Ok(())
}

fn copy_entry(backend: &dyn Backend, src: &FsPath, kind: EntryKind, dst: &FsPath) -> Result<()> {
    match kind {
        EntryKind::File => backend.raw_copy_file(src, dst),
        EntryKind::Symlink => {
            let target = backend.raw_read_link(src)?;
            backend.raw_symlink(&target, dst)
        }
        EntryKind::Directory => copy_tree(backend, src, dst),
        EntryKind::Other => ensure_copyable(src, kind),
    }
}

fn copy_tree(backend: &dyn Backend, src: &FsPath, dst: &FsPath) -> Result<()> {
    backend.raw_make_dir(dst)?;
    let depth = src.segments().len();
    for entry in Walk::with_backend(backend, src, WalkOrder::TopDown) {
        let entry = entry?;
        let mut segments = dst.segments().to_vec();
        segments.extend_from_slice(&entry.path.segments()[depth..]);
        let target = dst.with_segments(segments);
        match entry.kind {
            EntryKind::Directory => backend.raw_make_dir(&target)?,
            kind => copy_entry(backend, &entry.path, kind, &target)?,
        }
    }
    Ok(())
}
