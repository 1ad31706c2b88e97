use crate::conf::types::ScopeConfig;
use crate::ctx::{RequestId, RequestRejectError};
use http::{Extensions, Uri};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::sync::Arc;

/// Canonical request context passed through the urlconv pipeline
#[derive(Debug)]
pub struct RequestCtx {
    /// Lifecycle flag to determine if the context has already been hydrated.
    pub hydrated: bool,

    /// Request-scoped typed extensions.
    pub extensions: Extensions,

    /// URI exactly as received.
    original_uri: Uri,

    /// Percent-decoded request path. Not necessarily UTF-8.
    uri: Vec<u8>,

    /// Set once the logical URI has been replaced.
    uri_replaced: bool,

    /// Settings for the scope the request is currently in.
    scope: Arc<ScopeConfig>,
}

/// Hydration API
impl RequestCtx {
    pub fn new(scope: Arc<ScopeConfig>) -> Self {
        Self {
            hydrated: false,
            extensions: Extensions::new(),
            original_uri: Uri::default(),
            uri: Vec::new(),
            uri_replaced: false,
            scope,
        }
    }

    pub fn hydrate(&mut self, uri: &Uri) -> Result<(), RequestRejectError> {
        debug_assert!(!self.hydrated, "Already hydrated, cannot hydrate again");
        self.extensions.insert(RequestId::default());

        self.uri = normalize_path(uri.path())?;
        self.original_uri = uri.clone();

        self.hydrated = true;
        Ok(())
    }
}

/// Decode the path once and refuse anything that could escape a document root.
pub(crate) fn normalize_path(raw: &str) -> Result<Vec<u8>, RequestRejectError> {
    if !raw.starts_with('/') {
        return Err(RequestRejectError::InvalidPath);
    }

    let decoded: Vec<u8> = percent_decode_str(raw).collect();

    if decoded.contains(&0) {
        return Err(RequestRejectError::InvalidPath);
    }

    if decoded.split(|b| *b == b'/').any(|segment| segment == b"..") {
        return Err(RequestRejectError::InvalidPath);
    }

    Ok(decoded)
}

/// Request Path API
impl RequestCtx {
    /// Logical URI used for routing and serving decisions.
    pub fn uri(&self) -> &[u8] {
        debug_assert!(self.hydrated);
        &self.uri
    }

    /// Logical URI for logging.
    pub fn uri_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.uri)
    }

    pub fn original_uri(&self) -> &Uri {
        debug_assert!(self.hydrated);
        &self.original_uri
    }

    pub fn uri_replaced(&self) -> bool {
        self.uri_replaced
    }

    /// Replace the logical URI wholesale.
    pub(crate) fn replace_uri(&mut self, uri: Vec<u8>) {
        debug_assert!(self.hydrated);
        debug_assert!(!self.uri_replaced, "URI replaced twice");
        self.uri = uri;
        self.uri_replaced = true;
    }
}

/// Scope API
impl RequestCtx {
    pub fn scope(&self) -> &Arc<ScopeConfig> {
        &self.scope
    }

    /// Switch to the settings of the location the request was routed to.
    pub(crate) fn enter_scope(&mut self, scope: Arc<ScopeConfig>) {
        self.scope = scope;
    }
}

/// Request ID API
impl RequestCtx {
    pub fn request_id(&self) -> Option<String> {
        self.extensions.get::<RequestId>().map(|id| id.0.clone())
    }
}
