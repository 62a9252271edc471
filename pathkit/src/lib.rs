#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathkit
//!
//! Typed filesystem paths with a pure path algebra and a thin layer of
//! filesystem operations.
//!
//! A path is an immutable [`FsPath`] value tagged with the backend that
//! owns it. Lexical operations (joining, parents, extensions, relative
//! paths) never touch the disk. Metadata queries, file operations and
//! traversal dispatch through the path's [`backend::Backend`]; the only
//! backend today is the local filesystem.
//!
//! ## Core Types
//!
//! - [`FsPath`]: Parsed path value with the path algebra
//! - [`Metadata`] and [`EntryKind`]: Results of status queries
//! - [`DirEntry`], [`WalkOrder`] and [`walk::Walk`]: Directory traversal
//! - [`FsContext`]: An explicit working-directory reference
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathkit::FsPath;
//!
//! let path = FsPath::parse("/srv/site/../assets/logo.tar.gz").unwrap();
//! assert_eq!(path.extension(), "gz");
//! assert_eq!(path.normalize().to_text(), "/srv/assets/logo.tar.gz");
//!
//! let base = FsPath::parse("/srv").unwrap();
//! let rel = path.normalize().relative_to(&base).unwrap();
//! assert_eq!(rel.to_text(), "assets/logo.tar.gz");
//! ```

pub mod backend;
pub mod config;
pub mod cwd;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod ops;
pub mod path;
pub mod walk;

// Re-export key types at crate root for convenience
pub use backend::BackendKind;
pub use config::{Config, ConfigBuilder};
pub use cwd::{DirGuard, FsContext};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use metadata::{EntryKind, Metadata};
pub use ops::{CopyOptions, MakeDirOptions, OpenMode, RemoveOptions, Stream};
pub use path::{FsPath, PathRelationship};
pub use walk::{DirEntry, WalkOrder};
