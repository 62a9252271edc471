//! Byte streams and whole-file convenience wrappers.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::str::FromStr;

use crate::backend::ByteStream;
use crate::error::{Error, Result};
use crate::path::FsPath;

/// How a stream is opened.
///
/// Parsed from the familiar mode strings `r`, `w`, `a`, `r+`, `w+` and
/// `a+`. A `b` anywhere in the string is accepted and ignored, since every
/// stream is binary.
///
/// | mode | read | write | creates | truncates | writes go to end |
/// |------|------|-------|---------|-----------|------------------|
/// | `r`  | yes  |       |         |           |                  |
/// | `r+` | yes  | yes   |         |           |                  |
/// | `w`  |      | yes   | yes     | yes       |                  |
/// | `w+` | yes  | yes   | yes     | yes       |                  |
/// | `a`  |      | yes   | yes     |           | yes              |
/// | `a+` | yes  | yes   | yes     |           | yes              |
///
/// # Examples
///
/// ```
/// use pathkit::ops::OpenMode;
///
/// let mode: OpenMode = "rb+".parse().unwrap();
/// assert_eq!(mode, OpenMode::READ_WRITE);
/// assert!("x".parse::<OpenMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenMode {
    base: Base,
    plus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Base {
    Read,
    Write,
    Append,
}

impl OpenMode {
    /// `r`
    pub const READ: Self = Self::of(Base::Read, false);
    /// `r+`
    pub const READ_WRITE: Self = Self::of(Base::Read, true);
    /// `w`
    pub const WRITE: Self = Self::of(Base::Write, false);
    /// `w+`
    pub const WRITE_READ: Self = Self::of(Base::Write, true);
    /// `a`
    pub const APPEND: Self = Self::of(Base::Append, false);
    /// `a+`
    pub const APPEND_READ: Self = Self::of(Base::Append, true);

    const fn of(base: Base, plus: bool) -> Self {
        Self { base, plus }
    }

    /// Whether reads are allowed.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(self.base, Base::Read) || self.plus
    }

    /// Whether writes are allowed.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self.base, Base::Read) || self.plus
    }

    /// Whether every write goes to the end of the file.
    #[must_use]
    pub const fn is_append(self) -> bool {
        matches!(self.base, Base::Append)
    }

    /// Whether existing content is discarded on open.
    #[must_use]
    pub const fn is_truncating(self) -> bool {
        matches!(self.base, Base::Write)
    }

    /// Whether a missing file is created.
    #[must_use]
    pub const fn creates(self) -> bool {
        !matches!(self.base, Base::Read)
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Parse {
            input: s.to_string(),
            reason: "expected one of r, w, a, r+, w+, a+ (optionally with b)".to_string(),
        };

        let mut base = None;
        let mut plus = false;
        let mut binary = false;
        for c in s.chars() {
            match c {
                'r' | 'w' | 'a' if base.is_none() => {
                    base = Some(match c {
                        'r' => Base::Read,
                        'w' => Base::Write,
                        _ => Base::Append,
                    });
                }
                '+' if !plus => plus = true,
                'b' if !binary => binary = true,
                _ => return Err(invalid()),
            }
        }
        base.map(|base| Self::of(base, plus)).ok_or_else(invalid)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            Base::Read => "r",
            Base::Write => "w",
            Base::Append => "a",
        };
        write!(f, "{base}{}", if self.plus { "+" } else { "" })
    }
}

/// An open byte stream.
///
/// The underlying handle is released when the stream is dropped, on every
/// exit path. Reads and writes are rejected up front when the mode does not
/// allow them.
///
/// # Examples
///
/// ```no_run
/// use std::io::{Read, Write};
/// use pathkit::ops::{open, OpenMode};
/// use pathkit::FsPath;
///
/// let path = FsPath::parse("notes.txt").unwrap();
/// {
///     let mut stream = open(&path, OpenMode::WRITE).unwrap();
///     stream.write_all(b"hello").unwrap();
/// }
/// let mut text = String::new();
/// open(&path, OpenMode::READ).unwrap().read_to_string(&mut text).unwrap();
/// ```
#[derive(Debug)]
pub struct Stream {
    path: FsPath,
    mode: OpenMode,
    inner: Box<dyn ByteStream>,
}

impl Stream {
    /// The path the stream was opened on.
    #[must_use]
    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// The mode the stream was opened with.
    #[must_use]
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    fn refuse(&self, what: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("stream on {} opened with mode {} is not {what}", self.path, self.mode),
        )
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.mode.is_readable() {
            return Err(self.refuse("readable"));
        }
        self.inner.read(buf)
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.mode.is_writable() {
            return Err(self.refuse("writable"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Open a byte stream on `path`.
///
/// # Errors
///
/// Returns `NotFound` for `r`/`r+` on a missing file, `NotFound` for any
/// mode when the parent directory is missing, and `NotAFile` for a
/// directory.
pub fn open(path: &FsPath, mode: OpenMode) -> Result<Stream> {
    let inner = path.backend().backend().raw_open(path, mode)?;
    Ok(Stream {
        path: path.clone(),
        mode,
        inner,
    })
}

/// Read the whole file.
///
/// # Errors
///
/// Same as [`open`] with [`OpenMode::READ`], plus read failures.
pub fn read(path: &FsPath) -> Result<Vec<u8>> {
    let mut stream = open(path, OpenMode::READ)?;
    let mut buf = Vec::new();
    stream
        .read_to_end(&mut buf)
        .map_err(|e| Error::from_io(e, path))?;
    Ok(buf)
}

/// Replace the file's content with `data`, creating it if needed.
///
/// # Errors
///
/// Same as [`open`] with [`OpenMode::WRITE`], plus write failures.
pub fn write(path: &FsPath, data: &[u8]) -> Result<()> {
    transfer(path, OpenMode::WRITE, data)
}

/// Add `data` at the end of the file, creating it if needed.
///
/// # Errors
///
/// Same as [`open`] with [`OpenMode::APPEND`], plus write failures.
pub fn append(path: &FsPath, data: &[u8]) -> Result<()> {
    transfer(path, OpenMode::APPEND, data)
}

/// Read the whole file as UTF-8.
///
/// # Errors
///
/// Same as [`read`]; invalid UTF-8 is reported as [`Error::Io`].
pub fn read_text(path: &FsPath) -> Result<String> {
    String::from_utf8(read(path)?).map_err(|e| Error::Io {
        path: path.clone(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Replace the file's content with `text`.
///
/// # Errors
///
/// Same as [`write`].
pub fn write_text(path: &FsPath, text: &str) -> Result<()> {
    write(path, text.as_bytes())
}

fn transfer(path: &FsPath, mode: OpenMode, data: &[u8]) -> Result<()> {
    let mut stream = open(path, mode)?;
    stream
        .write_all(data)
        .and_then(|()| stream.flush())
        .map_err(|e| Error::from_io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        let cases = [
            ("r", OpenMode::READ),
            ("rb", OpenMode::READ),
            ("r+", OpenMode::READ_WRITE),
            ("r+b", OpenMode::READ_WRITE),
            ("w", OpenMode::WRITE),
            ("wb+", OpenMode::WRITE_READ),
            ("a", OpenMode::APPEND),
            ("a+", OpenMode::APPEND_READ),
        ];
        for (text, mode) in cases {
            assert_eq!(text.parse::<OpenMode>().unwrap(), mode, "{text}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "+", "b", "rw", "r++", "x", "rbb"] {
            assert!(text.parse::<OpenMode>().is_err(), "{text}");
        }
    }

    #[test]
    fn test_mode_capabilities() {
        assert!(OpenMode::READ.is_readable());
        assert!(!OpenMode::READ.is_writable());
        assert!(!OpenMode::READ.creates());

        assert!(!OpenMode::WRITE.is_readable());
        assert!(OpenMode::WRITE.is_truncating());

        assert!(OpenMode::APPEND_READ.is_readable());
        assert!(OpenMode::APPEND_READ.is_append());
        assert!(!OpenMode::APPEND_READ.is_truncating());

        assert!(OpenMode::READ_WRITE.is_writable());
        assert!(!OpenMode::READ_WRITE.creates());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(OpenMode::WRITE_READ.to_string(), "w+");
        assert_eq!(OpenMode::APPEND.to_string(), "a");
    }

    #[test]
    fn test_stream_enforces_mode() {
        let mut stream = Stream {
            path: FsPath::parse("mem").unwrap(),
            mode: OpenMode::READ,
            inner: Box::new(io::Cursor::new(b"abc".to_vec())),
        };
        let err = stream.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        let mut buf = String::new();
        stream.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "abc");
    }
}
