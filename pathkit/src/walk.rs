//! Directory traversal.
//!
//! Traversal is built on two backend primitives only: listing a directory
//! and the entry kind that listing reports. Symlinks are reported as
//! symlinks and never descended into.

use std::iter::FusedIterator;

use globset::GlobBuilder;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::metadata::EntryKind;
use crate::path::FsPath;

/// A path found while listing a directory, with its unfollowed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry.
    pub path: FsPath,
    /// Kind of the entry itself; symlinks report [`EntryKind::Symlink`].
    pub kind: EntryKind,
}

impl DirEntry {
    /// True when the entry is a real directory (not a link to one).
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Consume the entry, keeping only its path.
    #[must_use]
    pub fn into_path(self) -> FsPath {
        self.path
    }
}

/// Order in which [`walk`] yields a directory relative to its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkOrder {
    /// Pre-order: a directory, then its contents.
    #[default]
    TopDown,
    /// Post-order: a directory's contents, then the directory.
    BottomUp,
}

/// Immediate children of a directory, sorted by name.
///
/// # Errors
///
/// Returns `NotFound` or `NotADirectory` as appropriate.
///
/// # Examples
///
/// ```no_run
/// use pathkit::{walk, FsPath};
///
/// for child in walk::list_children(&FsPath::parse("/etc").unwrap()).unwrap() {
///     println!("{child}");
/// }
/// ```
pub fn list_children(dir: &FsPath) -> Result<Vec<FsPath>> {
    Ok(list_entries(dir)?
        .into_iter()
        .map(DirEntry::into_path)
        .collect())
}

/// Immediate children with their kinds, sorted by name.
///
/// # Errors
///
/// Same as [`list_children`].
pub fn list_entries(dir: &FsPath) -> Result<Vec<DirEntry>> {
    sorted_entries(dir.backend().backend(), dir)
}

fn sorted_entries(backend: &dyn Backend, dir: &FsPath) -> Result<Vec<DirEntry>> {
    let mut entries = backend.raw_list(dir)?;
    entries.sort_by(|a, b| a.path.basename().cmp(b.path.basename()));
    Ok(entries)
}

/// Lazily walk the tree below `root`.
///
/// The root itself is not yielded. Each directory is listed only when the
/// walk reaches it. The first error ends the walk.
///
/// # Examples
///
/// ```no_run
/// use pathkit::walk::{walk, WalkOrder};
/// use pathkit::FsPath;
///
/// let root = FsPath::parse("src").unwrap();
/// for entry in walk(&root, WalkOrder::TopDown).prune(|e| e.path.basename() != "target") {
///     println!("{}", entry.unwrap().path);
/// }
/// ```
#[must_use]
pub fn walk(root: &FsPath, order: WalkOrder) -> Walk<'static> {
    Walk::with_backend(root.backend().backend(), root, order)
}

/// Files and directories below `dir` whose relative path matches `pattern`.
///
/// Matching uses `/` between segments on every platform. `*` stays inside
/// one segment; `**` crosses any number of them. Results are sorted.
///
/// # Errors
///
/// Returns `Parse` for a malformed pattern and any traversal error.
///
/// # Examples
///
/// ```no_run
/// use pathkit::{walk, FsPath};
///
/// let sources = walk::glob(&FsPath::parse("src").unwrap(), "**/*.rs").unwrap();
/// ```
pub fn glob(dir: &FsPath, pattern: &str) -> Result<Vec<FsPath>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::Parse {
            input: pattern.to_string(),
            reason: e.to_string(),
        })?
        .compile_matcher();

    let base_depth = dir.segments().len();
    let mut matches = Vec::new();
    for entry in walk(dir, WalkOrder::TopDown) {
        let entry = entry?;
        let relative = entry.path.segments()[base_depth..].join("/");
        if matcher.is_match(&relative) {
            matches.push(entry.path);
        }
    }
    matches.sort();
    Ok(matches)
}

struct Frame {
    /// The directory this frame lists; `None` for the walk root.
    owner: Option<DirEntry>,
    entries: std::vec::IntoIter<DirEntry>,
}

type PrunePredicate<'a> = Box<dyn FnMut(&DirEntry) -> bool + Send + 'a>;

/// Iterator returned by [`walk`].
///
/// Holds a stack of partially consumed directory listings. Once it has
/// returned an error or `None` it keeps returning `None`.
pub struct Walk<'a> {
    backend: &'a dyn Backend,
    order: WalkOrder,
    pending: Option<(Option<DirEntry>, FsPath)>,
    stack: Vec<Frame>,
    prune: Option<PrunePredicate<'a>>,
    done: bool,
}

impl<'a> Walk<'a> {
    pub(crate) fn with_backend(backend: &'a dyn Backend, root: &FsPath, order: WalkOrder) -> Self {
        Self {
            backend,
            order,
            pending: Some((None, root.clone())),
            stack: Vec::new(),
            prune: None,
            done: false,
        }
    }

    /// Only descend into directories for which `keep` returns true.
    ///
    /// Directories failing the predicate are still yielded; their contents
    /// are skipped.
    #[must_use]
    pub fn prune<F>(mut self, keep: F) -> Self
    where
        F: FnMut(&DirEntry) -> bool + Send + 'a,
    {
        self.prune = Some(Box::new(keep));
        self
    }

    /// Yield paths only.
    pub fn paths(self) -> impl Iterator<Item = Result<FsPath>> + 'a {
        self.map(|entry| entry.map(DirEntry::into_path))
    }

    fn should_descend(&mut self, entry: &DirEntry) -> bool {
        entry.is_dir() && self.prune.as_mut().map_or(true, |keep| keep(entry))
    }

    fn open(&mut self, owner: Option<DirEntry>, dir: &FsPath) -> Result<()> {
        log::trace!("listing {dir}");
        let entries = sorted_entries(self.backend, dir)?;
        self.stack.push(Frame {
            owner,
            entries: entries.into_iter(),
        });
        Ok(())
    }

    fn fail(&mut self, err: Error) -> Option<Result<DirEntry>> {
        self.done = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some((owner, dir)) = self.pending.take() {
                if let Err(err) = self.open(owner, &dir) {
                    return self.fail(err);
                }
            }

            let Some(frame) = self.stack.last_mut() else {
                self.done = true;
                return None;
            };

            let Some(entry) = frame.entries.next() else {
                let finished = self.stack.pop().and_then(|frame| frame.owner);
                match (self.order, finished) {
                    (WalkOrder::BottomUp, Some(owner)) => return Some(Ok(owner)),
                    _ => continue,
                }
            };

            if !self.should_descend(&entry) {
                return Some(Ok(entry));
            }

            match self.order {
                WalkOrder::TopDown => {
                    self.pending = Some((None, entry.path.clone()));
                    return Some(Ok(entry));
                }
                WalkOrder::BottomUp => {
                    let dir = entry.path.clone();
                    self.pending = Some((Some(entry), dir));
                }
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}
