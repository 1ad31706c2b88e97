use crate::conf::types::{ConfigSpec, LocationConfig, RuntimeConfig, ScopeConfig};
use std::sync::Arc;

/// Resolve inheritance and defaults for every scope.
pub fn lower_config(spec: &ConfigSpec) -> RuntimeConfig {
    let server = Arc::new(ScopeConfig::server(
        spec.server.conversion(),
        spec.server.document_root(),
    ));

    let locations = spec
        .locations
        .iter()
        .map(|loc| LocationConfig {
            path: loc.path.clone(),
            scope: Arc::new(ScopeConfig {
                name: loc.path.clone(),
                conversion: loc.conversion(&spec.server),
                document_root: loc.document_root(&spec.server),
            }),
        })
        .collect();

    RuntimeConfig { server, locations }
}
