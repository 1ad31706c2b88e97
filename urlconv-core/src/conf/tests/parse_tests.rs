use crate::conf::parse::{parse_entrypoint_str, parse_locations};
use crate::conf::types::{MultiplierSpec, Phase, SizeSpec};
use crate::conf::validation::ConfigError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn entry(path: &str) -> &Path {
    Path::new(path)
}

#[test]
fn parse_server_block() {
    // Arrange
    let hcl = r#"
server {
  root = "/var/www"

  url_encoding_convert {
    enable       = true
    phase        = "early"
    alloc_size_x = 8
    alloc_size   = "4k"
    from         = "utf-8"
    to           = "cp949"
  }
}
"#;

    // Act
    let parsed = parse_entrypoint_str(hcl, entry("/conf/urlconv.hcl")).unwrap();

    // Assert
    assert_eq!(parsed.server.root, Some(PathBuf::from("/var/www")));
    assert_eq!(parsed.server.origin.section, "server");
    let block = parsed.server.url_encoding_convert.unwrap();
    assert_eq!(block.enable, Some(true));
    assert_eq!(block.phase, Some(Phase::Early));
    assert_eq!(block.alloc_size_x, Some(MultiplierSpec::Factor(8)));
    assert_eq!(block.alloc_size, Some(SizeSpec::Text("4k".to_string())));
    assert_eq!(block.to.as_deref(), Some("cp949"));
    assert!(parsed.locations.is_empty());
}

#[test]
fn parse_x_token_multiplier() {
    let hcl = r#"
server {
  url_encoding_convert {
    alloc_size_x = "x8"
  }
}
"#;

    let parsed = parse_entrypoint_str(hcl, entry("urlconv.hcl")).unwrap();

    let block = parsed.server.url_encoding_convert.unwrap();
    assert_eq!(block.alloc_size_x, Some(MultiplierSpec::Token("x8".to_string())));
    assert_eq!(block.resolve().buffer_size_multiplier, 8);
}

#[test]
fn parse_numeric_alloc_size() {
    let hcl = r#"
server {
  url_encoding_convert {
    alloc_size = 512
  }
}
"#;

    let parsed = parse_entrypoint_str(hcl, entry("urlconv.hcl")).unwrap();

    let block = parsed.server.url_encoding_convert.unwrap();
    assert_eq!(block.alloc_size, Some(SizeSpec::Bytes(512)));
}

#[test]
fn parse_labeled_location_blocks() {
    // Arrange
    let hcl = r#"
location "/legacy" {
  alias = "/srv/legacy"

  url_encoding_convert {
    to = "shift_jis"
  }
}

location "/docs" {
  root = "/srv/docs"
}
"#;

    // Act
    let parsed = parse_entrypoint_str(hcl, entry("/conf/urlconv.hcl")).unwrap();

    // Assert
    let paths: Vec<_> = parsed.locations.iter().map(|l| l.path.as_str()).collect();
    assert_eq!(paths, vec!["/docs", "/legacy"]);

    let legacy = &parsed.locations[1];
    assert_eq!(legacy.alias, Some(PathBuf::from("/srv/legacy")));
    assert_eq!(legacy.origin.section, "location");
    assert_eq!(legacy.origin.label.as_deref(), Some("/legacy"));
    assert_eq!(legacy.origin.file(), Path::new("/conf/urlconv.hcl"));
}

#[test]
fn parse_include_block() {
    let hcl = r#"
include {
  locations = "locations/*.hcl"
}
"#;

    let parsed = parse_entrypoint_str(hcl, entry("urlconv.hcl")).unwrap();

    assert_eq!(parsed.include.unwrap().locations, "locations/*.hcl");
}

#[test]
fn empty_entrypoint_has_defaults() {
    let parsed = parse_entrypoint_str("", entry("urlconv.hcl")).unwrap();

    assert!(parsed.server.url_encoding_convert.is_none());
    assert!(parsed.server.root.is_none());
    assert!(parsed.include.is_none());
}

#[test]
fn unknown_attribute_is_rejected() {
    let hcl = r#"
server {
  url_encoding_convert {
    enabled = true
  }
}
"#;

    let err = parse_entrypoint_str(hcl, entry("urlconv.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_phase_is_rejected() {
    let hcl = r#"
server {
  url_encoding_convert {
    phase = "middle"
  }
}
"#;

    let err = parse_entrypoint_str(hcl, entry("urlconv.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn parse_locations_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.hcl");
    fs::write(
        &path,
        r#"
location "/old" {
  url_encoding_convert {
    enable = false
  }
}
"#,
    )
    .unwrap();

    // Act
    let locations = parse_locations(&path).unwrap();

    // Assert
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].path, "/old");
    assert_eq!(locations[0].origin.file(), path.as_path());
}

#[test]
fn server_block_is_not_allowed_in_a_locations_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.hcl");
    fs::write(&path, "server {\n}\n").unwrap();

    let err = parse_locations(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_locations_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = parse_locations(&dir.path().join("nope.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
