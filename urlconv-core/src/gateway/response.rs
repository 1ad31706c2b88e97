use crate::device::ConversionTrace;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The final URI names a regular file under the scope's document root.
    Served(PathBuf),
    NotFound,
}

/// What the gateway did with one request.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub request_id: Option<String>,
    /// `server`, or the matched location prefix.
    pub scope: String,
    /// Logical URI after both hooks ran.
    pub uri: Vec<u8>,
    pub uri_replaced: bool,
    pub trace: ConversionTrace,
    pub outcome: ServeOutcome,
}

impl GatewayResponse {
    pub fn served_path(&self) -> Option<&PathBuf> {
        match &self.outcome {
            ServeOutcome::Served(path) => Some(path),
            ServeOutcome::NotFound => None,
        }
    }
}
