//! Mutating filesystem operations.
//!
//! Every operation is a free function taking the paths it works on and an
//! options struct. The path's backend performs the raw work; this layer adds
//! recursion, idempotence flags and the checks that keep an operation from
//! damaging its own source.
//!
//! # Examples
//!
//! ```no_run
//! use pathkit::ops::{self, CopyOptions, MakeDirOptions, RemoveOptions};
//! use pathkit::FsPath;
//!
//! let work = FsPath::parse("/tmp/pathkit-demo").unwrap();
//! ops::make_dir(&work, MakeDirOptions::parents()).unwrap();
//!
//! let file = work.join("hello.txt").unwrap();
//! ops::write_text(&file, "hello").unwrap();
//! ops::append(&file, b", world").unwrap();
//! assert_eq!(ops::read_text(&file).unwrap(), "hello, world");
//!
//! ops::copy(&file, &work.join("copy/hello.txt").unwrap(), CopyOptions::new()).unwrap();
//! ops::remove(&work, RemoveOptions::all()).unwrap();
//! ```

mod dir;
mod options;
mod stream;
mod transfer;

pub use dir::{make_dir, remove, symlink, touch};
pub use options::{CopyOptions, MakeDirOptions, RemoveOptions};
pub use stream::{append, open, read, read_text, write, write_text, OpenMode, Stream};
pub use transfer::{copy, move_to};

use crate::error::{Error, Result};
use crate::path::FsPath;

/// Reject operations whose two paths are served by different backends.
pub(crate) fn same_backend(src: &FsPath, dst: &FsPath) -> Result<()> {
    if src.backend() == dst.backend() {
        Ok(())
    } else {
        Err(Error::CrossBackend {
            source_backend: src.backend(),
            target_backend: dst.backend(),
        })
    }
}
