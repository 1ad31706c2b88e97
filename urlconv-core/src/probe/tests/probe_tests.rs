use crate::conf::types::DocumentRoot;
use crate::probe::{Existence, ExistenceProbe, FsProbe, MapError};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn existing_file_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "hello").unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    // Act
    let existence = FsProbe.probe(&root, b"/index.html").unwrap();

    // Assert
    assert_eq!(existence, Existence::Exists);
}

#[test]
fn existing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    assert_eq!(FsProbe.probe(&root, b"/docs").unwrap(), Existence::Exists);
}

#[test]
fn missing_file_is_not_exists() {
    let dir = tempfile::tempdir().unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    assert_eq!(
        FsProbe.probe(&root, b"/missing.txt").unwrap(),
        Existence::NotExists
    );
}

#[test]
fn missing_root_directory_is_not_exists() {
    let root = DocumentRoot::Root("/definitely/not/a/real/root".into());

    assert_eq!(
        FsProbe.probe(&root, b"/index.html").unwrap(),
        Existence::NotExists
    );
}

#[test]
fn path_through_a_file_is_not_exists() {
    // stat fails with ENOTDIR, which still only means "not there".
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("file"), "x").unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    assert_eq!(
        FsProbe.probe(&root, b"/file/child").unwrap(),
        Existence::NotExists
    );
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_not_exists() {
    use std::os::unix::fs::PermissionsExt;

    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("a.txt"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    // Permission bits do not stop root.
    if fs::metadata(locked.join("a.txt")).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    // Act
    let existence = FsProbe.probe(&root, b"/locked/a.txt");

    // Assert
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(existence.unwrap(), Existence::NotExists);
}

#[test]
fn unmappable_uri_is_an_error() {
    let root = DocumentRoot::Alias {
        prefix: "/legacy".to_string(),
        dir: "/srv/legacy".into(),
    };

    assert!(matches!(
        FsProbe.probe(&root, b"/elsewhere"),
        Err(MapError::OutsideAlias { .. })
    ));
}

// Other unix filesystems (APFS) reject names that are not UTF-8.
#[cfg(target_os = "linux")]
#[test]
fn finds_files_with_legacy_encoded_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let euc_kr_name = OsStr::from_bytes(&[0xC7, 0xD1, 0xB1, 0xDB]);
    fs::write(dir.path().join(euc_kr_name), "legacy").unwrap();
    let root = DocumentRoot::Root(dir.path().to_path_buf());

    // Act
    let utf8 = FsProbe.probe(&root, "/한글".as_bytes()).unwrap();
    let euc_kr = FsProbe.probe(&root, &[b'/', 0xC7, 0xD1, 0xB1, 0xDB]).unwrap();

    // Assert
    assert_eq!(utf8, Existence::NotExists);
    assert_eq!(euc_kr, Existence::Exists);
}
