//! Separator and anchor conventions.
//!
//! A [`Grammar`] describes how a backend spells paths: which characters
//! separate segments, what an anchor (drive plus root) looks like, and which
//! segment text is structurally invalid. It is the only part of a backend
//! that path parsing consults.

use crate::error::{Error, Result};

/// The pieces of a parsed path, before they are tagged with a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedParts {
    /// Drive followed by root, e.g. `"/"`, `"C:\\"`, `"C:"` or `""`.
    pub anchor: String,
    /// Length in bytes of the drive prefix inside `anchor`.
    pub drive_len: usize,
    /// Non-empty segments in order.
    pub segments: Vec<String>,
}

/// Path spelling convention of a backend.
///
/// # Examples
///
/// ```
/// use pathkit::path::Grammar;
///
/// let parts = Grammar::Posix.parse("/usr//lib/").unwrap();
/// assert_eq!(parts.anchor, "/");
/// assert_eq!(parts.segments, vec!["usr", "lib"]);
///
/// let parts = Grammar::Windows.parse(r"C:\Users\me").unwrap();
/// assert_eq!(parts.anchor, r"C:\");
/// assert_eq!(parts.drive_len, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Single `/` root, `/` separator.
    Posix,
    /// Drive letters and UNC shares, `\` separator with `/` accepted.
    Windows,
}

impl Grammar {
    /// The grammar of the platform this crate was compiled for.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The separator used when serializing.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` separates segments when parsing.
    #[must_use]
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '\\' || c == '/',
        }
    }

    /// Whether an anchor made of `drive` and `root` denotes an absolute path.
    #[must_use]
    pub fn is_absolute(self, drive: &str, root: &str) -> bool {
        match self {
            Self::Posix => !root.is_empty(),
            Self::Windows => !drive.is_empty() && !root.is_empty(),
        }
    }

    /// Split path text into anchor and segments.
    ///
    /// Consecutive and trailing separators collapse; `.` and `..` are kept
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if any segment contains characters the
    /// grammar declares invalid (NUL everywhere; `<>:"|?*` and control
    /// characters on Windows).
    pub fn parse(self, text: &str) -> Result<ParsedParts> {
        let (drive, root, rest) = match self {
            Self::Posix => split_posix_anchor(text),
            Self::Windows => split_windows_anchor(text),
        };

        let mut segments = Vec::new();
        for segment in rest.split(|c| self.is_separator(c)) {
            if segment.is_empty() {
                continue;
            }
            self.validate_segment(segment).map_err(|reason| Error::Parse {
                input: text.to_string(),
                reason,
            })?;
            segments.push(segment.to_string());
        }

        let drive = match self {
            Self::Posix => drive.to_string(),
            Self::Windows => drive.replace('/', "\\"),
        };
        Ok(ParsedParts {
            anchor: format!("{drive}{root}"),
            drive_len: drive.len(),
            segments,
        })
    }

    /// Render an anchor and segments back into text.
    ///
    /// `parse(render(a, s))` reproduces `a` and `s` for any parts this
    /// grammar produced.
    #[must_use]
    pub fn render(self, anchor: &str, segments: &[String]) -> String {
        let mut out = String::from(anchor);
        let sep = self.separator();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(segment);
        }
        out
    }

    /// Check a single segment, returning a human-readable reason on failure.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason for empty segments, segments containing
    /// a separator, and characters the grammar forbids.
    pub fn validate_segment(self, segment: &str) -> std::result::Result<(), String> {
        if segment.is_empty() {
            return Err("empty segment".to_string());
        }
        for c in segment.chars() {
            if c == '\0' {
                return Err("embedded NUL".to_string());
            }
            if self.is_separator(c) {
                return Err(format!("separator {c:?} inside segment"));
            }
            if self == Self::Windows && (c.is_control() || "<>:\"|?*".contains(c)) {
                return Err(format!("character {c:?} is not allowed"));
            }
        }
        Ok(())
    }
}

fn split_posix_anchor(text: &str) -> (&str, &str, &str) {
    match text.strip_prefix('/') {
        Some(rest) => ("", "/", rest),
        None => ("", "", text),
    }
}

fn split_windows_anchor(text: &str) -> (&str, &str, &str) {
    let is_sep = |c: char| c == '\\' || c == '/';
    let bytes = text.as_bytes();

    // \\server\share
    if bytes.len() > 2 && is_sep(bytes[0] as char) && is_sep(bytes[1] as char) {
        let after = &text[2..];
        if let Some(server_end) = after.find(is_sep) {
            let server = &after[..server_end];
            let tail = &after[server_end + 1..];
            let share_end = tail.find(is_sep).unwrap_or(tail.len());
            let share = &tail[..share_end];
            if !server.is_empty() && !share.is_empty() && !share.contains(':') {
                let drive_end = 2 + server_end + 1 + share_end;
                return (&text[..drive_end], "\\", &text[drive_end..]);
            }
        }
    }

    // X: and X:\
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = &text[2..];
        return match rest.chars().next() {
            Some(c) if is_sep(c) => (&text[..2], "\\", &rest[1..]),
            _ => (&text[..2], "", rest),
        };
    }

    match text.chars().next() {
        Some(c) if is_sep(c) => ("", "\\", &text[1..]),
        _ => ("", "", text),
    }
}
