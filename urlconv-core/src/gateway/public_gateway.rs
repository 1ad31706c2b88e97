use crate::conf::types::{RuntimeConfig, ScopeConfig};
use crate::ctx::{RequestCtx, RequestRejectError};
use crate::device::core::pipeline::DevicePipeline;
use crate::device::core::result::DeviceResult;
use crate::device::{ConversionTrace, DeviceRegistry};
use crate::gateway::response::{GatewayResponse, ServeOutcome};
use crate::probe::map_uri_to_path;
use crate::route::Router;
use anyhow::Context;
use http::Uri;
use std::fs;
use std::sync::Arc;
use tracing::{debug, error};

/// Gateway is the orchestration abstraction in urlconv.
/// It drives a request through the device hooks, routing and static file lookup.
pub struct Gateway {
    config: Arc<RuntimeConfig>,
    router: Router,
    devices: DeviceRegistry,
}

impl Gateway {
    pub fn new(config: Arc<RuntimeConfig>, devices: DeviceRegistry) -> anyhow::Result<Self> {
        let router = Router::from_config(&config).context("failed to build location router")?;
        Ok(Self {
            config,
            router,
            devices,
        })
    }

    /// Build a gateway with the builtin devices the configuration asks for.
    pub fn from_config(config: Arc<RuntimeConfig>) -> anyhow::Result<Self> {
        let mut devices = DeviceRegistry::new();
        devices.load_from_config(&config);
        Self::new(config, devices)
    }
}

/// Request processing order.
///
/// 1. hydrate
///    - Allocate RequestCtx in the server scope
///    - Decode the path, reject traversal
///
/// 2. on_request devices (early hook)
///
/// 3. route
///    - Longest-prefix location match on the logical URI
///    - Swap in the location scope; unmatched requests keep the server scope
///
/// 4. after_route devices (late hook)
///
/// 5. serve
///    - Map the final URI onto the scope's document root
///    - Regular file => Served, anything else => NotFound
impl Gateway {
    pub fn handle(&self, uri: &Uri) -> Result<GatewayResponse, RequestRejectError> {
        let mut ctx = RequestCtx::new(Arc::clone(&self.config.server));
        ctx.hydrate(uri)?;

        let early = DevicePipeline::run_on_request(self.devices.all(), &mut ctx);
        Self::run_hook("on_request", early)?;

        if let Some(location) = self.router.match_route(ctx.uri()) {
            debug!(
                request_id = ?ctx.request_id(),
                location = %location.path,
                uri = %ctx.uri_lossy(),
                "location matched"
            );
            ctx.enter_scope(Arc::clone(&location.scope));
        }

        let late = DevicePipeline::run_after_route(self.devices.all(), &mut ctx);
        Self::run_hook("after_route", late)?;

        let outcome = serve(ctx.scope(), ctx.uri());

        Ok(GatewayResponse {
            request_id: ctx.request_id(),
            scope: ctx.scope().name.clone(),
            uri: ctx.uri().to_vec(),
            uri_replaced: ctx.uri_replaced(),
            trace: ctx
                .extensions
                .get::<ConversionTrace>()
                .cloned()
                .unwrap_or_default(),
            outcome,
        })
    }

    fn run_hook(hook: &str, result: DeviceResult) -> Result<(), RequestRejectError> {
        match result {
            DeviceResult::Continue => Ok(()),
            DeviceResult::Error(err) => {
                error!("device error in {hook}: {err}");
                Err(RequestRejectError::DeviceFailure {
                    message: err.message,
                })
            }
        }
    }
}

fn serve(scope: &ScopeConfig, uri: &[u8]) -> ServeOutcome {
    let Some(root) = scope.document_root.as_ref() else {
        return ServeOutcome::NotFound;
    };

    let path = match map_uri_to_path(root, uri) {
        Ok(path) => path,
        Err(err) => {
            debug!(scope = %scope.name, error = %err, "cannot serve request path");
            return ServeOutcome::NotFound;
        }
    };

    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => ServeOutcome::Served(path),
        _ => ServeOutcome::NotFound,
    }
}
