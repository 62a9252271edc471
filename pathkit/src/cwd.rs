//! The working directory.
//!
//! Two ways to deal with relative paths are offered:
//!
//! - [`FsContext`] carries an explicit working reference. It never touches
//!   process state and is the preferred way to interpret relative paths.
//! - [`change_dir`] and [`with_dir`] change the process working directory
//!   for a scope and restore it afterwards. Scopes on different threads
//!   exclude each other; nested scopes on one thread are allowed.

use std::marker::PhantomData;
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread::{self, ThreadId};

use crate::backend::{Backend, BackendKind};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::metadata::{self, DEFAULT_MAX_SYMLINK_DEPTH};
use crate::ops::same_backend;
use crate::path::FsPath;

/// Current process working directory.
///
/// # Errors
///
/// Returns an error if the working directory no longer exists or is not
/// valid UTF-8.
pub fn current_dir() -> Result<FsPath> {
    BackendKind::Local.backend().raw_current_dir()
}

/// Change the process working directory until the guard is dropped.
///
/// The calling thread holds the working-directory lock for the lifetime of
/// the guard; other threads calling `change_dir` block until it is released.
///
/// # Errors
///
/// Returns `NotFound` or `NotADirectory` if `path` cannot become the
/// working directory. The working directory is unchanged in that case.
///
/// # Examples
///
/// ```no_run
/// use pathkit::{cwd, FsPath};
///
/// let before = cwd::current_dir().unwrap();
/// {
///     let _guard = cwd::change_dir(&FsPath::parse("/tmp").unwrap()).unwrap();
///     assert_ne!(cwd::current_dir().unwrap(), before);
/// }
/// assert_eq!(cwd::current_dir().unwrap(), before);
/// ```
pub fn change_dir(path: &FsPath) -> Result<DirGuard> {
    let backend = path.backend().backend();
    DIR_LOCK.acquire();
    let entered = backend
        .raw_current_dir()
        .and_then(|previous| backend.raw_set_current_dir(path).map(|()| previous));
    match entered {
        Ok(previous) => {
            log::debug!("working directory {previous} -> {path}");
            Ok(DirGuard {
                backend,
                previous,
                _thread_bound: PhantomData,
            })
        }
        Err(e) => {
            DIR_LOCK.release();
            Err(e)
        }
    }
}

/// Run `f` with the process working directory set to `path`.
///
/// # Errors
///
/// Same as [`change_dir`].
pub fn with_dir<F, R>(path: &FsPath, f: F) -> Result<R>
where
    F: FnOnce() -> R,
{
    let _guard = change_dir(path)?;
    Ok(f())
}

/// Restores the previous working directory when dropped.
#[must_use = "the working directory is restored as soon as the guard is dropped"]
pub struct DirGuard {
    backend: &'static dyn Backend,
    previous: FsPath,
    // The lock is owned by the thread that created the guard.
    _thread_bound: PhantomData<*const ()>,
}

impl DirGuard {
    /// The working directory that will be restored.
    #[must_use]
    pub fn previous(&self) -> &FsPath {
        &self.previous
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = self.backend.raw_set_current_dir(&self.previous) {
            log::warn!("failed to restore working directory {}: {e}", self.previous);
        }
        DIR_LOCK.release();
    }
}

/// Re-entrant, thread-owned lock for the process working directory.
struct DirLock {
    state: Mutex<(Option<ThreadId>, usize)>,
    released: Condvar,
}

static DIR_LOCK: DirLock = DirLock {
    state: Mutex::new((None, 0)),
    released: Condvar::new(),
};

impl DirLock {
    fn acquire(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.0.is_some_and(|owner| owner != me) {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.0 = Some(me);
        state.1 += 1;
    }

    fn release(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.1 = state.1.saturating_sub(1);
        if state.1 == 0 {
            state.0 = None;
            self.released.notify_all();
        }
    }
}

/// An explicit working reference for interpreting relative paths.
///
/// # Examples
///
/// ```
/// use pathkit::cwd::FsContext;
/// use pathkit::FsPath;
///
/// let root = if cfg!(windows) { r"C:\srv" } else { "/srv" };
/// let ctx = FsContext::new(FsPath::parse(root).unwrap()).unwrap();
///
/// let abs = ctx.absolute(&FsPath::parse("data/raw").unwrap());
/// assert_eq!(abs, FsPath::parse(root).unwrap().join("data/raw").unwrap());
///
/// let rel = ctx.relative(&abs, &FsPath::parse("logs").unwrap()).unwrap();
/// assert_eq!(rel.segments(), ["..", "data", "raw"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsContext {
    cwd: FsPath,
    max_symlink_depth: usize,
}

impl FsContext {
    /// A context rooted at an absolute path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `cwd` is not absolute.
    pub fn new(cwd: FsPath) -> Result<Self> {
        if !cwd.is_absolute() {
            return Err(Error::InvalidPath {
                path: cwd,
                reason: "working reference must be absolute".to_string(),
            });
        }
        Ok(Self {
            cwd: cwd.normalize(),
            max_symlink_depth: DEFAULT_MAX_SYMLINK_DEPTH,
        })
    }

    /// A context rooted at the current process working directory.
    ///
    /// # Errors
    ///
    /// Same as [`current_dir`].
    pub fn from_process() -> Result<Self> {
        Self::new(current_dir()?)
    }

    /// A context built from configuration.
    ///
    /// Uses `working_dir` when set and the process working directory
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Parse`/`InvalidPath` for an unusable `working_dir`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cwd = match &config.working_dir {
            Some(text) => FsPath::parse(text)?,
            None => current_dir()?,
        };
        Ok(Self::new(cwd)?
            .with_max_symlink_depth(config.max_symlink_depth.unwrap_or(DEFAULT_MAX_SYMLINK_DEPTH)))
    }

    /// Sets the symlink hop bound used by [`FsContext::resolve`].
    #[must_use]
    pub fn with_max_symlink_depth(mut self, depth: usize) -> Self {
        self.max_symlink_depth = depth;
        self
    }

    /// The same context with a different working reference.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `cwd` is not absolute.
    pub fn with_cwd(&self, cwd: FsPath) -> Result<Self> {
        Ok(Self::new(cwd)?.with_max_symlink_depth(self.max_symlink_depth))
    }

    /// A context whose working reference is `path`, taken relative to this
    /// one. The target must be an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotADirectory`.
    pub fn change_dir(&self, path: &FsPath) -> Result<Self> {
        let target = self.absolute(path);
        if !metadata::is_dir(&target)? {
            return Err(if metadata::exists(&target)? {
                Error::NotADirectory { path: target }
            } else {
                Error::NotFound { path: target }
            });
        }
        self.with_cwd(target)
    }

    /// The working reference.
    #[must_use]
    pub fn cwd(&self) -> &FsPath {
        &self.cwd
    }

    /// The symlink hop bound.
    #[must_use]
    pub fn max_symlink_depth(&self) -> usize {
        self.max_symlink_depth
    }

    /// `path` if absolute, otherwise `path` joined onto the working reference.
    #[must_use]
    pub fn absolute(&self, path: &FsPath) -> FsPath {
        if path.is_absolute() {
            path.clone()
        } else {
            self.cwd.join_path(path)
        }
    }

    /// The path that leads from `base` to `target`, both taken relative to
    /// the working reference.
    ///
    /// Returns `None` only when the two cannot be related at all, such as
    /// paths on different drives.
    #[must_use]
    pub fn relative(&self, target: &FsPath, base: &FsPath) -> Option<FsPath> {
        self.absolute(target).relative_to(&self.absolute(base))
    }

    /// Follow every symlink in `path`, taken relative to the working reference.
    ///
    /// # Errors
    ///
    /// Same as [`metadata::resolve`], with this context's hop bound.
    pub fn resolve(&self, path: &FsPath) -> Result<FsPath> {
        same_backend(path, &self.cwd)?;
        metadata::resolve_with(
            path.backend().backend(),
            path,
            &self.cwd,
            self.max_symlink_depth,
        )
    }
}
