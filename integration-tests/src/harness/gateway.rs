use crate::harness::config::{populate_www, render_fixture};
use http::Uri;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use urlconv_core::conf::{ConfigError, ValidatedConfig, load_config};
use urlconv_core::ctx::RequestRejectError;
use urlconv_core::gateway::{Gateway, GatewayResponse};

/// Handle to a gateway built from a fixture config directory.
pub struct TestGateway {
    gateway: Gateway,
    www: TempDir,
    _conf: TempDir,
}

impl TestGateway {
    /// Render the fixture against a fresh document root and load it.
    ///
    /// Each call gets its own temp directories, so tests can run in parallel.
    pub fn start(fixture: &str) -> Self {
        let (conf, www, loaded) = Self::load(fixture);
        let cfg = loaded.expect("failed to load fixture config");

        let gateway =
            Gateway::from_config(Arc::new(cfg.config)).expect("failed to build gateway");

        Self {
            gateway,
            www,
            _conf: conf,
        }
    }

    /// Load a fixture that is expected to fail.
    pub fn load_err(fixture: &str) -> ConfigError {
        match Self::load(fixture).2 {
            Ok(_) => panic!("fixture {fixture} loaded but was expected to fail"),
            Err(err) => err,
        }
    }

    fn load(fixture: &str) -> (TempDir, TempDir, Result<ValidatedConfig, ConfigError>) {
        let www = populate_www();
        let conf = tempfile::tempdir().unwrap();
        render_fixture(fixture, conf.path(), www.path());

        let loaded = load_config(conf.path());
        (conf, www, loaded)
    }

    pub fn get(&self, target: &str) -> Result<GatewayResponse, RequestRejectError> {
        let uri: Uri = target.parse().expect("invalid request target");
        self.gateway.handle(&uri)
    }

    pub fn www(&self) -> &Path {
        self.www.path()
    }

    /// Path of a file under the document root, from raw name bytes.
    #[cfg(unix)]
    pub fn www_path(&self, rel: &[u8]) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        self.www().join(OsStr::from_bytes(rel))
    }
}
