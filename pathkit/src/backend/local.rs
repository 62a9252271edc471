//! The operating system filesystem backend.

use std::fs::{self, File, OpenOptions};
use std::io;

use chrono::{DateTime, Utc};
use filetime::FileTime;

use super::{Backend, ByteStream, RenameOutcome};
use crate::error::{Error, Result};
use crate::metadata::{Access, EntryKind, Metadata};
use crate::ops::OpenMode;
use crate::path::{FsPath, Grammar};
use crate::walk::DirEntry;

/// Backend over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl Backend for LocalBackend {
    fn grammar(&self) -> Grammar {
        Grammar::native()
    }

    fn raw_status(&self, path: &FsPath) -> Result<Metadata> {
        let meta = fs::metadata(path.to_std_path()).map_err(|e| Error::from_io(e, path))?;
        Ok(convert_metadata(&meta))
    }

    fn raw_link_status(&self, path: &FsPath) -> Result<Metadata> {
        let meta = fs::symlink_metadata(path.to_std_path()).map_err(|e| Error::from_io(e, path))?;
        Ok(convert_metadata(&meta))
    }

    fn raw_list(&self, path: &FsPath) -> Result<Vec<DirEntry>> {
        let reader = fs::read_dir(path.to_std_path()).map_err(|e| Error::from_io(e, path))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| Error::from_io(e, path))?;
            let name = entry.file_name().into_string().map_err(|raw| Error::Parse {
                input: raw.to_string_lossy().into_owned(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
            let child = path.join(&name)?;
            let file_type = entry.file_type().map_err(|e| Error::from_io(e, &child))?;
            entries.push(DirEntry {
                path: child,
                kind: EntryKind::from(file_type),
            });
        }
        Ok(entries)
    }

    fn raw_make_dir(&self, path: &FsPath) -> Result<()> {
        fs::create_dir(path.to_std_path()).map_err(|e| Error::from_io(e, path))
    }

    fn raw_remove(&self, path: &FsPath) -> Result<()> {
        let meta = self.raw_link_status(path)?;
        let target = path.to_std_path();
        let outcome = if meta.is_dir() {
            fs::remove_dir(&target)
        } else {
            remove_non_dir(&target)
        };
        outcome.map_err(|e| Error::from_io(e, path))
    }

    fn raw_open(&self, path: &FsPath, mode: OpenMode) -> Result<Box<dyn ByteStream>> {
        let file = open_options(mode)
            .open(path.to_std_path())
            .map_err(|e| Error::from_io(e, path))?;
        let meta = file.metadata().map_err(|e| Error::from_io(e, path))?;
        if meta.is_dir() {
            return Err(Error::NotAFile { path: path.clone() });
        }
        Ok(Box::new(file))
    }

    fn raw_copy_file(&self, src: &FsPath, dst: &FsPath) -> Result<()> {
        let mut reader = File::open(src.to_std_path()).map_err(|e| Error::from_io(e, src))?;
        let mut writer = File::create(dst.to_std_path()).map_err(|e| Error::from_io(e, dst))?;
        io::copy(&mut reader, &mut writer).map_err(|e| Error::from_io(e, dst))?;

        // Carry permission bits and mtime over like `cp -p` does for files.
        let meta = reader.metadata().map_err(|e| Error::from_io(e, src))?;
        fs::set_permissions(dst.to_std_path(), meta.permissions())
            .map_err(|e| Error::from_io(e, dst))?;
        filetime::set_file_mtime(dst.to_std_path(), FileTime::from_last_modification_time(&meta))
            .map_err(|e| Error::from_io(e, dst))
    }

    fn raw_rename(&self, src: &FsPath, dst: &FsPath) -> Result<RenameOutcome> {
        match fs::rename(src.to_std_path(), dst.to_std_path()) {
            Ok(()) => Ok(RenameOutcome::Renamed),
            Err(e) if is_cross_device(&e) => Ok(RenameOutcome::CrossDevice),
            Err(e) => {
                let culprit = rename_culprit(&e, src, dst);
                Err(Error::from_io(e, &culprit))
            }
        }
    }

    fn raw_read_link(&self, path: &FsPath) -> Result<FsPath> {
        let target = fs::read_link(path.to_std_path()).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidInput => Error::InvalidPath {
                path: path.clone(),
                reason: "not a symbolic link".to_string(),
            },
            _ => Error::from_io(e, path),
        })?;
        FsPath::from_std_path(&target)
    }

    fn raw_symlink(&self, target: &FsPath, link: &FsPath) -> Result<()> {
        make_symlink(target, link).map_err(|e| Error::from_io(e, link))
    }

    fn raw_access(&self, path: &FsPath, access: Access) -> Result<bool> {
        check_access(path, access)
    }

    fn raw_touch(&self, path: &FsPath) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.to_std_path())
            .map_err(|e| Error::from_io(e, path))?;
        filetime::set_file_mtime(path.to_std_path(), FileTime::now())
            .map_err(|e| Error::from_io(e, path))
    }

    fn raw_current_dir(&self) -> Result<FsPath> {
        let cwd = std::env::current_dir().map_err(|e| Error::from_io(e, &FsPath::new()))?;
        FsPath::from_std_path(&cwd)
    }

    fn raw_set_current_dir(&self, path: &FsPath) -> Result<()> {
        std::env::set_current_dir(path.to_std_path()).map_err(|e| Error::from_io(e, path))
    }
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

fn open_options(mode: OpenMode) -> OpenOptions {
    let mut options = OpenOptions::new();
    options
        .read(mode.is_readable())
        .write(mode.is_writable() && !mode.is_append())
        .append(mode.is_append())
        .truncate(mode.is_truncating())
        .create(mode.creates());
    options
}

fn convert_metadata(meta: &fs::Metadata) -> Metadata {
    let modified = meta
        .modified()
        .map_or(DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::from);
    let created = meta
        .created()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| change_time(meta).unwrap_or(modified));

    Metadata {
        kind: EntryKind::from(meta.file_type()),
        size: meta.len(),
        modified,
        created,
        uid: owner_uid(meta),
        gid: owner_gid(meta),
        mode: permission_bits(meta),
    }
}

#[cfg(unix)]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn change_time(meta: &fs::Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;
    DateTime::from_timestamp(meta.ctime(), meta.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn change_time(_meta: &fs::Metadata) -> Option<DateTime<Utc>> {
    None
}

#[cfg(unix)]
fn owner_uid(meta: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.uid())
}

#[cfg(not(unix))]
fn owner_uid(_meta: &fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn owner_gid(meta: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.gid())
}

#[cfg(not(unix))]
fn owner_gid(_meta: &fs::Metadata) -> Option<u32> {
    None
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn remove_non_dir(target: &std::path::Path) -> io::Result<()> {
    fs::remove_file(target)
}

// Windows directory symlinks must be removed with remove_dir.
#[cfg(not(unix))]
fn remove_non_dir(target: &std::path::Path) -> io::Result<()> {
    fs::remove_file(target).or_else(|_| fs::remove_dir(target))
}

#[cfg(unix)]
fn make_symlink(target: &FsPath, link: &FsPath) -> io::Result<()> {
    std::os::unix::fs::symlink(target.to_std_path(), link.to_std_path())
}

#[cfg(windows)]
fn make_symlink(target: &FsPath, link: &FsPath) -> io::Result<()> {
    let resolved = link.parent().join_path(target);
    if fs::metadata(resolved.to_std_path()).is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(target.to_std_path(), link.to_std_path())
    } else {
        std::os::windows::fs::symlink_file(target.to_std_path(), link.to_std_path())
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(not(unix))]
fn is_cross_device(err: &io::Error) -> bool {
    const ERROR_NOT_SAME_DEVICE: i32 = 17;
    err.raw_os_error() == Some(ERROR_NOT_SAME_DEVICE)
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn check_access(path: &FsPath, access: Access) -> Result<bool> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path =
        CString::new(path.to_std_path().as_os_str().as_bytes()).map_err(|_| Error::Parse {
            input: path.to_text(),
            reason: "embedded NUL".to_string(),
        })?;
    let flag = match access {
        Access::Read => libc::R_OK,
        Access::Write => libc::W_OK,
        Access::Execute => libc::X_OK,
    };

    // SAFETY: `c_path` is a valid NUL-terminated string for the whole call.
    let rc = unsafe { libc::access(c_path.as_ptr(), flag) };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::EACCES | libc::EROFS | libc::ETXTBSY) => Ok(false),
        _ => Err(Error::from_io(err, path)),
    }
}

#[cfg(not(unix))]
fn check_access(path: &FsPath, access: Access) -> Result<bool> {
    let meta = fs::metadata(path.to_std_path()).map_err(|e| Error::from_io(e, path))?;
    Ok(match access {
        Access::Read => true,
        Access::Write => !meta.permissions().readonly(),
        Access::Execute => {
            meta.is_dir()
                || matches!(
                    path.extension().to_ascii_lowercase().as_str(),
                    "exe" | "bat" | "cmd" | "com"
                )
        }
    })
}

/// The path a failed rename is reported against. While `src` still exists,
/// a missing or non-directory component belongs to the parent of `dst`.
fn rename_culprit(err: &io::Error, src: &FsPath, dst: &FsPath) -> FsPath {
    let misplaced = matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    );
    if misplaced && dst.has_parent() && fs::symlink_metadata(src.to_std_path()).is_ok() {
        dst.parent()
    } else {
        src.clone()
    }
}
