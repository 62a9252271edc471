//! Integration tests for file operations: directory creation and removal,
//! byte and text I/O, streams, copy and move.

mod common;

use std::io::{Read, Seek, SeekFrom, Write};

use common::TempTree;
use pathkit::ops::{self, CopyOptions, MakeDirOptions, OpenMode, RemoveOptions};
use pathkit::{metadata, walk, Error};

// ============================================================================
// Directories
// ============================================================================

#[test]
fn test_make_dir_requires_parent() {
    let tree = TempTree::new();
    let nested = tree.path("a/b/c");

    match ops::make_dir(&nested, MakeDirOptions::new()) {
        Err(Error::NotFound { path }) => assert_eq!(path, tree.path("a/b")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    ops::make_dir(&nested, MakeDirOptions::new().with_recursive(true)).unwrap();
    assert!(metadata::is_dir(&nested).unwrap());
}

#[test]
fn test_make_dir_idempotent_with_exist_ok() {
    let tree = TempTree::new();
    let dir = tree.path("out");

    ops::make_dir(&dir, MakeDirOptions::parents()).unwrap();
    ops::make_dir(&dir, MakeDirOptions::parents()).unwrap();

    assert!(matches!(
        ops::make_dir(&dir, MakeDirOptions::new()),
        Err(Error::AlreadyExists { .. })
    ));
}

#[test]
fn test_make_dir_over_file_fails_even_with_exist_ok() {
    let tree = TempTree::sample();
    assert!(matches!(
        ops::make_dir(&tree.path("foo/baz.txt"), MakeDirOptions::parents()),
        Err(Error::AlreadyExists { .. })
    ));
}

#[test]
fn test_remove_is_final() {
    let tree = TempTree::sample();
    let file = tree.path("foo/baz.txt");

    ops::remove(&file, RemoveOptions::new()).unwrap();
    assert!(!metadata::exists(&file).unwrap());
    assert!(matches!(
        ops::remove(&file, RemoveOptions::new()),
        Err(Error::NotFound { .. })
    ));
    ops::remove(&file, RemoveOptions::new().with_force(true)).unwrap();
}

#[test]
fn test_remove_populated_dir_needs_recursive() {
    let tree = TempTree::sample();
    let bar = tree.path("bar");

    assert!(matches!(
        ops::remove(&bar, RemoveOptions::new()),
        Err(Error::NotEmpty { .. })
    ));

    ops::remove(&bar, RemoveOptions::all()).unwrap();
    assert!(!metadata::exists(&bar).unwrap());
    assert!(metadata::exists(&tree.path("foo/baz.txt")).unwrap());
}

// ============================================================================
// Reading and writing
// ============================================================================

#[test]
fn test_write_then_read() {
    let tree = TempTree::new();
    let path = tree.path("data.bin");

    ops::write(&path, b"\x00\x01\x02").unwrap();
    assert_eq!(ops::read(&path).unwrap(), b"\x00\x01\x02");

    ops::write(&path, b"z").unwrap();
    assert_eq!(ops::read(&path).unwrap(), b"z");
}

#[test]
fn test_append_extends() {
    let tree = TempTree::new();
    let path = tree.path("log.txt");

    ops::append(&path, b"one\n").unwrap();
    ops::append(&path, b"two\n").unwrap();
    assert_eq!(ops::read_text(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn test_text_round_trip_and_invalid_utf8() {
    let tree = TempTree::new();
    let path = tree.path("notes.md");

    ops::write_text(&path, "héllo").unwrap();
    assert_eq!(ops::read_text(&path).unwrap(), "héllo");

    ops::write(&path, &[0xff, 0xfe]).unwrap();
    assert!(ops::read_text(&path).is_err());
}

#[test]
fn test_read_missing_and_directory() {
    let tree = TempTree::sample();
    assert!(matches!(ops::read(&tree.path("nope")), Err(Error::NotFound { .. })));
    assert!(matches!(ops::read(&tree.path("fred")), Err(Error::NotAFile { .. })));
}

// ============================================================================
// Streams
// ============================================================================

#[test]
fn test_stream_modes() {
    let tree = TempTree::new();
    let path = tree.path("stream.txt");

    {
        let mut stream = ops::open(&path, OpenMode::WRITE).unwrap();
        stream.write_all(b"abcdef").unwrap();
        let mut buf = [0u8; 1];
        assert!(stream.read(&mut buf).is_err());
    }

    {
        let mut stream = ops::open(&path, OpenMode::READ).unwrap();
        assert!(stream.write(b"x").is_err());
        stream.seek(SeekFrom::Start(2)).unwrap();
        let mut rest = String::new();
        stream.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "cdef");
    }

    {
        let mut stream = ops::open(&path, "r+".parse().unwrap()).unwrap();
        stream.write_all(b"XY").unwrap();
    }
    assert_eq!(ops::read_text(&path).unwrap(), "XYcdef");

    {
        let mut stream = ops::open(&path, OpenMode::APPEND).unwrap();
        stream.write_all(b"!").unwrap();
    }
    assert_eq!(ops::read_text(&path).unwrap(), "XYcdef!");
}

#[test]
fn test_append_plus_reads_and_writes_at_end() {
    let tree = TempTree::new();
    let path = tree.file("log.txt", "abc");

    let mut stream = ops::open(&path, "a+".parse().unwrap()).unwrap();
    stream.seek(SeekFrom::Start(0)).unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    assert_eq!(text, "abc");

    stream.seek(SeekFrom::Start(0)).unwrap();
    stream.write_all(b"Z").unwrap();
    drop(stream);
    assert_eq!(ops::read_text(&path).unwrap(), "abcZ");
}

#[test]
fn test_write_plus_truncates_and_reads_back() {
    let tree = TempTree::new();
    let path = tree.file("scratch.txt", "previous contents");

    let mut stream = ops::open(&path, "w+".parse().unwrap()).unwrap();
    stream.write_all(b"xy").unwrap();
    stream.seek(SeekFrom::Start(0)).unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    assert_eq!(text, "xy");
    drop(stream);
    assert_eq!(ops::read_text(&path).unwrap(), "xy");
}

#[test]
fn test_open_read_missing() {
    let tree = TempTree::new();
    assert!(matches!(
        ops::open(&tree.path("nope"), OpenMode::READ),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_mode_strings() {
    for text in ["r", "rb", "r+", "w", "wb", "w+", "a", "a+", "ab"] {
        let mode: OpenMode = text.parse().unwrap();
        assert_eq!(mode.to_string(), text.replace('b', ""));
    }
    assert!("x".parse::<OpenMode>().is_err());
    assert!("rr".parse::<OpenMode>().is_err());
}

// ============================================================================
// Copy and move
// ============================================================================

#[test]
fn test_copy_file() {
    let tree = TempTree::sample();
    let src = tree.path("foo/baz.txt");
    let dst = tree.path("copies/baz.txt");

    ops::copy(&src, &dst, CopyOptions::new()).unwrap();
    assert_eq!(ops::read_text(&dst).unwrap(), "baz");
    assert!(metadata::exists(&src).unwrap());
}

#[test]
fn test_copy_refuses_occupied_destination() {
    let tree = TempTree::sample();
    let src = tree.path("foo/baz.txt");
    let dst = tree.file("other.txt", "old");

    assert!(matches!(
        ops::copy(&src, &dst, CopyOptions::new()),
        Err(Error::AlreadyExists { .. })
    ));
    ops::copy(&src, &dst, CopyOptions::new().with_force(true)).unwrap();
    assert_eq!(ops::read_text(&dst).unwrap(), "baz");
}

#[test]
fn test_copy_without_create_parents() {
    let tree = TempTree::sample();
    let result = ops::copy(
        &tree.path("foo/baz.txt"),
        &tree.path("missing/baz.txt"),
        CopyOptions::new().with_create_parents(false),
    );
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_copy_tree() {
    let tree = TempTree::sample();
    let dst = tree.path("backup");

    ops::copy(&tree.path("bar"), &dst, CopyOptions::new()).unwrap();
    assert_eq!(
        ops::read_text(&tree.path("backup/qux/quux.tar.gz")).unwrap(),
        "quux"
    );
}

#[test]
fn test_copy_into_itself_rejected() {
    let tree = TempTree::sample();
    let result = ops::copy(&tree.path("bar"), &tree.path("bar/qux/inner"), CopyOptions::new());
    assert!(matches!(result, Err(Error::InvalidPath { .. })));

    let same = tree.path("foo/baz.txt");
    assert!(matches!(
        ops::copy(&same, &same, CopyOptions::new()),
        Err(Error::InvalidPath { .. })
    ));
}

#[test]
fn test_move_file_and_tree() {
    let tree = TempTree::sample();

    let moved = tree.path("moved/baz.txt");
    ops::move_to(&tree.path("foo/baz.txt"), &moved, CopyOptions::new()).unwrap();
    assert!(!metadata::exists(&tree.path("foo/baz.txt")).unwrap());
    assert_eq!(ops::read_text(&moved).unwrap(), "baz");

    let dst = tree.path("renamed");
    ops::move_to(&tree.path("bar"), &dst, CopyOptions::new()).unwrap();
    assert!(!metadata::exists(&tree.path("bar")).unwrap());
    let remaining: Vec<_> = walk::walk(&dst, walk::WalkOrder::TopDown)
        .paths()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(remaining, [tree.path("renamed/qux"), tree.path("renamed/qux/quux.tar.gz")]);
}

#[test]
fn test_move_force_replaces_destination() {
    let tree = TempTree::sample();
    let dst = tree.file("other.txt", "old");
    let src = tree.path("foo/baz.txt");

    assert!(matches!(
        ops::move_to(&src, &dst, CopyOptions::new()),
        Err(Error::AlreadyExists { .. })
    ));
    assert_eq!(ops::read_text(&dst).unwrap(), "old");

    ops::move_to(&src, &dst, CopyOptions::new().with_force(true)).unwrap();
    assert!(!metadata::exists(&src).unwrap());
    assert_eq!(ops::read_text(&dst).unwrap(), "baz");
}

#[test]
fn test_force_onto_enclosing_directory_keeps_both() {
    let tree = TempTree::sample();
    let src = tree.path("bar/qux/quux.tar.gz");
    let dst = tree.path("bar");
    let forced = CopyOptions::new().with_force(true);

    assert!(matches!(
        ops::copy(&src, &dst, forced),
        Err(Error::InvalidPath { .. })
    ));
    assert!(matches!(
        ops::move_to(&src, &dst, forced),
        Err(Error::InvalidPath { .. })
    ));
    assert_eq!(ops::read_text(&src).unwrap(), "quux");
    assert!(metadata::is_dir(&dst).unwrap());
}

#[test]
fn test_move_onto_itself_is_noop() {
    let tree = TempTree::sample();
    let path = tree.path("foo/baz.txt");
    ops::move_to(&path, &path, CopyOptions::new()).unwrap();
    assert_eq!(ops::read_text(&path).unwrap(), "baz");
}

#[cfg(unix)]
#[test]
fn test_copy_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TempTree::new();
    let src = tree.file("tool.sh", "echo\n");
    std::fs::set_permissions(src.to_std_path(), std::fs::Permissions::from_mode(0o750)).unwrap();

    let dst = tree.path("bin/tool.sh");
    ops::copy(&src, &dst, CopyOptions::new()).unwrap();
    assert_eq!(metadata::status(&dst).unwrap().mode, 0o750);
}

#[cfg(unix)]
#[test]
fn test_copy_tree_recreates_links() {
    let tree = TempTree::sample();
    let target = pathkit::FsPath::parse("qux/quux.tar.gz").unwrap();
    ops::symlink(&target, &tree.path("bar/archive")).unwrap();

    ops::copy(&tree.path("bar"), &tree.path("copy"), CopyOptions::new()).unwrap();
    let link = tree.path("copy/archive");
    assert!(metadata::is_symlink(&link).unwrap());
    assert_eq!(metadata::read_link(&link).unwrap(), target);
    assert_eq!(ops::read_text(&link).unwrap(), "quux");
}
