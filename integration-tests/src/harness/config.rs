use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Placeholder in fixture files replaced with the document root.
const WWW_PLACEHOLDER: &str = "@WWW@";

/// "한글" in EUC-KR.
pub const EUC_KR_HANGUL: [u8; 4] = [0xC7, 0xD1, 0xB1, 0xDB];

/// "日本" in Shift_JIS.
pub const SHIFT_JIS_NIHON: [u8; 4] = [0x93, 0xFA, 0x96, 0x7B];

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("config")
        .join(fixture)
}

/// Copy a fixture config directory into `dest`, pointing it at `www`.
pub(crate) fn render_fixture(fixture: &str, dest: &Path, www: &Path) {
    let src = fixture_dir(fixture);
    assert!(
        src.exists(),
        "fixture config directory does not exist: {:?}",
        src
    );
    copy_rendered(&src, dest, &www.display().to_string());
}

fn copy_rendered(src: &Path, dest: &Path, www: &str) {
    fs::create_dir_all(dest).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dest.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_rendered(&entry.path(), &target, www);
        } else {
            let text = fs::read_to_string(entry.path()).unwrap();
            fs::write(target, text.replace(WWW_PLACEHOLDER, www)).unwrap();
        }
    }
}

/// Document root shared by all fixtures.
///
/// ```text
/// index.html
/// <한글 in EUC-KR>.txt
/// legacy/<한글 in EUC-KR>.txt
/// jp/<日本 in Shift_JIS>.txt
/// ```
pub(crate) fn populate_www() -> TempDir {
    let www = tempfile::tempdir().unwrap();
    let root = www.path();

    fs::write(root.join("index.html"), "urlconv").unwrap();
    fs::create_dir(root.join("legacy")).unwrap();
    fs::create_dir(root.join("jp")).unwrap();

    write_legacy_name(root, &EUC_KR_HANGUL);
    write_legacy_name(&root.join("legacy"), &EUC_KR_HANGUL);
    write_legacy_name(&root.join("jp"), &SHIFT_JIS_NIHON);

    www
}

// Some filesystems (APFS) refuse names that are not UTF-8.
#[cfg(target_os = "linux")]
fn write_legacy_name(dir: &Path, stem: &[u8]) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let name = [stem, b".txt".as_slice()].concat();
    fs::write(dir.join(OsStr::from_bytes(&name)), "legacy").unwrap();
}

#[cfg(not(target_os = "linux"))]
fn write_legacy_name(_dir: &Path, _stem: &[u8]) {}
