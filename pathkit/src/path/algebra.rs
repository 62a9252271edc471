//! Pure path manipulation.
//!
//! Everything here works on segments only: joining, parents, name and
//! extension decomposition, normalization and relative paths. No function
//! in this module performs I/O.

use std::ops::Div;

use crate::error::{Error, Result};
use crate::path::normalize::resolve_components;
use crate::path::FsPath;

impl FsPath {
    /// The anchor tokens followed by every segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("a/b").unwrap();
    /// assert_eq!(path.components().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn components(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.anchor())
            .filter(|anchor| !anchor.is_empty())
            .chain(self.segments().iter().map(String::as_str))
    }

    /// Append path text, splitting it on the grammar's separators.
    ///
    /// An anchored argument replaces the accumulated path, the way a rooted
    /// path does in a shell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `part` does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let base = FsPath::parse("srv").unwrap();
    /// assert_eq!(base.join("data/raw").unwrap(), FsPath::parse("srv/data/raw").unwrap());
    /// ```
    pub fn join(&self, part: &str) -> Result<FsPath> {
        let other = FsPath::parse_for(self.backend(), part)?;
        Ok(self.join_path(&other))
    }

    /// Append several pieces of path text in order.
    ///
    /// `p.join_all::<_, &str>([])` is `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for the first piece that does not parse.
    pub fn join_all<I, S>(&self, parts: I) -> Result<FsPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parts
            .into_iter()
            .try_fold(self.clone(), |acc, part| acc.join(part.as_ref()))
    }

    /// Append another path's segments.
    ///
    /// If `other` carries a drive it replaces `self` entirely (unless it is
    /// the same drive without a root); if it carries only a root it keeps
    /// `self`'s drive and replaces everything else.
    #[must_use]
    pub fn join_path(&self, other: &FsPath) -> FsPath {
        let same_drive = other.drive() == self.drive();
        if !other.drive().is_empty() && (!other.root().is_empty() || !same_drive) {
            return FsPath::from_parts(
                self.backend(),
                other.anchor().to_string(),
                other.drive_len(),
                other.segments().to_vec(),
            );
        }
        if !other.root().is_empty() {
            return FsPath::from_parts(
                self.backend(),
                format!("{}{}", self.drive(), other.root()),
                self.drive_len(),
                other.segments().to_vec(),
            );
        }
        let mut segments = self.segments().to_vec();
        segments.extend(other.segments().iter().cloned());
        FsPath::from_parts(
            self.backend(),
            self.anchor().to_string(),
            self.drive_len(),
            segments,
        )
    }

    /// Append one segment that is already known to be valid.
    pub(crate) fn child(&self, segment: &str) -> FsPath {
        let mut segments = self.segments().to_vec();
        segments.push(segment.to_string());
        self.with_segments(segments)
    }

    /// Same anchor and backend, different segments.
    pub(crate) fn with_segments(&self, segments: Vec<String>) -> FsPath {
        FsPath::from_parts(
            self.backend(),
            self.anchor().to_string(),
            self.drive_len(),
            segments,
        )
    }

    /// The anchor alone (or the empty path for a relative path).
    #[must_use]
    pub fn anchor_path(&self) -> FsPath {
        self.with_segments(Vec::new())
    }

    /// Drop the last segment.
    ///
    /// A path with no segments is its own parent; a single-segment path
    /// has the anchor-only (or empty) path as its parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("a/b").unwrap();
    /// assert_eq!(path.parent(), FsPath::parse("a").unwrap());
    /// assert_eq!(path.parent().parent(), FsPath::new());
    /// assert_eq!(FsPath::new().parent(), FsPath::new());
    /// ```
    #[must_use]
    pub fn parent(&self) -> FsPath {
        match self.segments().split_last() {
            Some((_, rest)) => self.with_segments(rest.to_vec()),
            None => self.clone(),
        }
    }

    /// True iff `parent()` differs from `self`.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        !self.segments().is_empty()
    }

    /// Ancestors from the parent up to the anchor-only path, nearest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("a/b/c").unwrap();
    /// let parents: Vec<String> = path.parents().map(|p| p.to_string()).collect();
    /// assert_eq!(parents, ["a/b", "a", ""]);
    /// ```
    #[must_use]
    pub fn parents(&self) -> Parents {
        Parents {
            current: self.clone(),
        }
    }

    /// The last segment, or `""` when there is none.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.segments().last().map_or("", String::as_str)
    }

    /// The last segment with every extension stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("dist/quux.tar.gz").unwrap();
    /// assert_eq!(path.filename(), "quux");
    /// assert_eq!(path.extension(), "gz");
    /// assert_eq!(path.extensions(), ["tar", "gz"]);
    ///
    /// let dotfile = FsPath::parse(".bashrc").unwrap();
    /// assert_eq!(dotfile.filename(), ".bashrc");
    /// assert!(dotfile.extensions().is_empty());
    /// ```
    #[must_use]
    pub fn filename(&self) -> &str {
        split_extensions(self.basename()).0
    }

    /// The final extension without its dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        split_extensions(self.basename()).1.last().copied().unwrap_or("")
    }

    /// Every extension piece in order, without dots.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        split_extensions(self.basename()).1
    }

    /// Replace the last segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path has no segment to replace
    /// and [`Error::Parse`] if `name` is not a single valid segment.
    pub fn with_name(&self, name: &str) -> Result<FsPath> {
        if self.segments().is_empty() {
            return Err(Error::InvalidPath {
                path: self.clone(),
                reason: "path has no final segment to rename".to_string(),
            });
        }
        self.grammar()
            .validate_segment(name)
            .map_err(|reason| Error::Parse {
                input: name.to_string(),
                reason,
            })?;
        Ok(self.parent().child(name))
    }

    /// Replace the final extension (or add one); an empty `ext` removes it.
    ///
    /// # Errors
    ///
    /// Same as [`FsPath::with_name`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("a/report.tar.gz").unwrap();
    /// assert_eq!(path.with_extension("bz2").unwrap().basename(), "report.tar.bz2");
    /// assert_eq!(path.with_extension("").unwrap().basename(), "report.tar");
    /// ```
    pub fn with_extension(&self, ext: &str) -> Result<FsPath> {
        let name = self.basename();
        let (_, exts) = split_extensions(name);
        let base = match exts.last() {
            Some(last) => &name[..name.len() - last.len() - 1],
            None => name,
        };
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            self.with_name(base)
        } else {
            self.with_name(&format!("{base}.{ext}"))
        }
    }

    /// Resolve `.` and `..` symbolically.
    ///
    /// `..` removes the preceding ordinary segment; leading `..` segments of
    /// a relative path are kept, and `..` directly under a root is dropped.
    /// A relative path that cancels out completely becomes `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let path = FsPath::parse("/bar/../foo/./x").unwrap();
    /// assert_eq!(path.normalize(), FsPath::parse("/foo/x").unwrap());
    /// assert_eq!(FsPath::parse("../a/..").unwrap().normalize(), FsPath::parse("..").unwrap());
    /// ```
    #[must_use]
    pub fn normalize(&self) -> FsPath {
        let mut segments = resolve_components(!self.root().is_empty(), self.segments());
        if segments.is_empty() && self.anchor().is_empty() && !self.segments().is_empty() {
            segments.push(".".to_string());
        }
        self.with_segments(segments)
    }

    /// Whether `other`'s anchor and segments form a prefix of `self`'s.
    #[must_use]
    pub fn starts_with(&self, other: &FsPath) -> bool {
        self.anchor() == other.anchor() && self.segments().starts_with(other.segments())
    }

    /// The path that, joined onto `base`, names the same location as `self`.
    ///
    /// Both paths are normalized first. Returns `None` when no such path
    /// exists without consulting a working directory: the anchors differ,
    /// or `base` keeps a `..` that would have to be undone.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkit::FsPath;
    ///
    /// let target = FsPath::parse("/srv/data/raw").unwrap();
    /// let base = FsPath::parse("/srv/logs").unwrap();
    /// let rel = target.relative_to(&base).unwrap();
    /// assert_eq!(rel, FsPath::parse("../data/raw").unwrap());
    /// assert_eq!(base.join_path(&rel).normalize(), target);
    /// ```
    #[must_use]
    pub fn relative_to(&self, base: &FsPath) -> Option<FsPath> {
        let target = self.normalize();
        let base = base.normalize();
        if target.anchor() != base.anchor() {
            return None;
        }

        let target_segs = strip_dot(target.segments());
        let base_segs = strip_dot(base.segments());
        let common = target_segs
            .iter()
            .zip(base_segs)
            .take_while(|(a, b)| a == b)
            .count();

        let base_rest = &base_segs[common..];
        if base_rest.iter().any(|s| s == "..") {
            return None;
        }

        let mut segments: Vec<String> = base_rest.iter().map(|_| "..".to_string()).collect();
        segments.extend(target_segs[common..].iter().cloned());
        Some(FsPath::from_parts(self.backend(), String::new(), 0, segments))
    }
}

fn strip_dot(segments: &[String]) -> &[String] {
    match segments {
        [only] if only == "." => &[],
        other => other,
    }
}

/// Split a segment into its stem and extension pieces.
///
/// Leading dots belong to the stem. An empty piece anywhere (`"a."`,
/// `"a..b"`) means the name has no extensions.
fn split_extensions(name: &str) -> (&str, Vec<&str>) {
    let body_start = name.len() - name.trim_start_matches('.').len();
    let body = &name[body_start..];
    let Some(first_dot) = body.find('.') else {
        return (name, Vec::new());
    };

    let pieces: Vec<&str> = body[first_dot + 1..].split('.').collect();
    if pieces.iter().any(|piece| piece.is_empty()) {
        return (name, Vec::new());
    }
    (&name[..body_start + first_dot], pieces)
}

/// Lazy iterator over a path's ancestors; see [`FsPath::parents`].
#[derive(Debug, Clone)]
pub struct Parents {
    current: FsPath,
}

impl Iterator for Parents {
    type Item = FsPath;

    fn next(&mut self) -> Option<FsPath> {
        if !self.current.has_parent() {
            return None;
        }
        self.current = self.current.parent();
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.current.segments().len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Parents {}

impl Div<&FsPath> for &FsPath {
    type Output = FsPath;

    fn div(self, rhs: &FsPath) -> FsPath {
        self.join_path(rhs)
    }
}

impl Div<FsPath> for FsPath {
    type Output = FsPath;

    fn div(self, rhs: FsPath) -> FsPath {
        self.join_path(&rhs)
    }
}

/// Text division parses, so it yields a `Result`.
impl Div<&str> for &FsPath {
    type Output = Result<FsPath>;

    fn div(self, rhs: &str) -> Result<FsPath> {
        self.join(rhs)
    }
}

impl Div<&str> for FsPath {
    type Output = Result<FsPath>;

    fn div(self, rhs: &str) -> Result<FsPath> {
        self.join(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> FsPath {
        FsPath::parse(text).unwrap()
    }

    #[test]
    fn test_join_identity() {
        let path = p("a/b");
        assert_eq!(path.join_all::<_, &str>([]).unwrap(), path);
    }

    #[test]
    fn test_join_associative() {
        let path = p("root");
        assert_eq!(
            path.join_all(["a", "b"]).unwrap(),
            path.join("a").unwrap().join("b").unwrap()
        );
    }

    #[test]
    fn test_join_splits_separators() {
        assert_eq!(p("x").join("a/b").unwrap(), p("x/a/b"));
        assert_eq!(p("x").join("a/b").unwrap().segments().len(), 3);
    }

    #[test]
    #[cfg(unix)]
    fn test_join_rooted_resets() {
        assert_eq!(p("/a/b").join("/c").unwrap(), p("/c"));
    }

    #[test]
    fn test_join_rejects_nul() {
        assert!(p("a").join("b\0c").is_err());
    }

    #[test]
    fn test_div_operators() {
        let base = p("a");
        let other = p("b/c");
        assert_eq!(&base / &other, p("a/b/c"));
        assert_eq!((&base / "b").unwrap(), p("a/b"));
        assert_eq!(base.clone() / other, p("a/b/c"));
    }

    #[test]
    fn test_components_include_anchor() {
        let root = p("/").anchor().to_string();
        let abs = p("/a/b");
        let parts: Vec<&str> = abs.components().collect();
        assert_eq!(parts, [root.as_str(), "a", "b"]);
        assert!(FsPath::new().components().next().is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_parent_of_root_is_root() {
        let root = p("/");
        assert_eq!(root.parent(), root);
        assert!(!root.has_parent());
        assert_eq!(p("/a").parent(), root);
        assert!(p("/a").has_parent());
    }

    #[test]
    fn test_parent_of_single_segment_is_empty() {
        assert_eq!(p("a").parent(), FsPath::new());
        assert!(p("a").has_parent());
        assert!(!FsPath::new().has_parent());
    }

    #[test]
    #[cfg(unix)]
    fn test_parents_absolute() {
        let parents: Vec<FsPath> = p("/a/b/c").parents().collect();
        assert_eq!(parents, vec![p("/a/b"), p("/a"), p("/")]);
    }

    #[test]
    fn test_parents_strictly_decreasing() {
        let path = p("a/b/c/d");
        let lens: Vec<usize> = path.parents().map(|x| x.segments().len()).collect();
        assert_eq!(lens, [3, 2, 1, 0]);
        assert_eq!(path.parents().len(), 4);
    }

    #[test]
    fn test_basename() {
        assert_eq!(p("a/b.txt").basename(), "b.txt");
        assert_eq!(FsPath::new().basename(), "");
    }

    #[test]
    fn test_extension_decomposition() {
        let path = p("quux.tar.gz");
        assert_eq!(path.extensions(), ["tar", "gz"]);
        assert_eq!(path.extension(), "gz");
        assert_eq!(path.filename(), "quux");
    }

    #[test]
    fn test_dotfile_with_extension() {
        let path = p(".config.yaml");
        assert_eq!(path.filename(), ".config");
        assert_eq!(path.extensions(), ["yaml"]);
    }

    #[test]
    fn test_no_extension_cases() {
        for name in ["plain", ".hidden", "trailing.", "a..b", "..", "."] {
            let path = p(name);
            assert!(path.extensions().is_empty(), "{name}");
            assert_eq!(path.extension(), "", "{name}");
            assert_eq!(path.filename(), name, "{name}");
        }
    }

    #[test]
    fn test_with_name() {
        assert_eq!(p("a/b.txt").with_name("c.md").unwrap(), p("a/c.md"));
        assert!(p("a").with_name("x/y").is_err());
        assert!(FsPath::new().with_name("x").is_err());
    }

    #[test]
    fn test_with_extension_on_plain_name() {
        assert_eq!(p("a/notes").with_extension(".md").unwrap(), p("a/notes.md"));
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_example() {
        let root = p("/");
        let path = root.join("bar").unwrap().join("..").unwrap().join("foo").unwrap();
        assert_eq!(path.normalize(), root.join("foo").unwrap());
    }

    #[test]
    fn test_normalize_relative_cancels_to_dot() {
        assert_eq!(p("a/..").normalize(), p("."));
        assert_eq!(p(".").normalize(), p("."));
        assert_eq!(FsPath::new().normalize(), FsPath::new());
    }

    #[test]
    fn test_normalize_keeps_leading_parent() {
        assert_eq!(p("../../a/./b/..").normalize(), p("../../a"));
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_drops_parent_at_root() {
        assert_eq!(p("/../a").normalize(), p("/a"));
    }

    #[test]
    fn test_normalize_idempotent() {
        for text in ["a/../..", "./x/./y/../z", "..", "a/b/c/../../.."] {
            let once = p(text).normalize();
            assert_eq!(once.normalize(), once, "{text}");
        }
    }

    #[test]
    fn test_relative_to_relative_paths() {
        let rel = p("a/b/c").relative_to(&p("a/x")).unwrap();
        assert_eq!(rel, p("../b/c"));
        assert_eq!(p("a").relative_to(&p("a")).unwrap(), FsPath::new());
    }

    #[test]
    fn test_relative_to_unresolvable_parent() {
        assert!(p("a").relative_to(&p("../b")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_relative_to_mixed_anchor() {
        assert!(p("/a").relative_to(&p("a")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_relative_inverse() {
        let target = p("/srv/a/./b/../c");
        let base = p("/srv/x/y");
        let rel = target.relative_to(&base).unwrap();
        assert_eq!(base.join_path(&rel).normalize(), target.normalize());
    }

    #[test]
    fn test_starts_with() {
        assert!(p("a/b/c").starts_with(&p("a/b")));
        assert!(!p("a/bc").starts_with(&p("a/b")));
    }
}
