use crate::conf::types::{ConversionConfig, Phase, ScopeConfig};
use crate::convert::{ConversionError, convert};
use crate::ctx::RequestCtx;
use crate::device::core::errors::DeviceError;
use crate::device::core::{Device, DeviceResult};
use crate::probe::{Existence, ExistenceProbe, FsProbe, MapError};
use std::sync::Arc;
use tracing::{debug, warn};

/// What one hook invocation did to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Nothing to do; the URI is unchanged.
    Declined,
    /// The URI was replaced with its converted form.
    Handled,
    /// The URI could not be mapped to the filesystem; the URI is unchanged.
    Error,
}

/// Reason a hook declined. Only used for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Decline {
    Disabled,
    InactivePhase,
    AlreadyConverted,
    PathExists,
    Conversion(ConversionError),
}

impl Decline {
    fn as_str(&self) -> &'static str {
        match self {
            Decline::Disabled => "disabled",
            Decline::InactivePhase => "inactive_phase",
            Decline::AlreadyConverted => "already_converted",
            Decline::PathExists => "path_exists",
            Decline::Conversion(err) => err.kind(),
        }
    }
}

enum Skip {
    Declined(Decline),
    Unmapped(MapError),
}

/// Outcomes recorded per hook for a request, kept in the request extensions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionTrace {
    pub early: Option<HookOutcome>,
    pub late: Option<HookOutcome>,
}

impl ConversionTrace {
    pub fn outcome(&self, hook: Phase) -> Option<HookOutcome> {
        match hook {
            Phase::Early => self.early,
            Phase::Late => self.late,
        }
    }

    fn record(&mut self, hook: Phase, outcome: HookOutcome) {
        match hook {
            Phase::Early => self.early = Some(outcome),
            Phase::Late => self.late = Some(outcome),
        }
    }
}

/// Re-encodes the request URI when it does not name anything on disk.
///
/// The same device is wired at both hook points. Each invocation reads the
/// settings of the scope the request is in and does work only when the hook
/// it was called from is the configured phase.
pub struct UrlConvertDevice {
    probe: Box<dyn ExistenceProbe>,
}

impl Default for UrlConvertDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlConvertDevice {
    pub fn new() -> Self {
        Self::with_probe(FsProbe)
    }

    pub fn with_probe(probe: impl ExistenceProbe + 'static) -> Self {
        Self {
            probe: Box::new(probe),
        }
    }

    /// Run the filter for `hook`. Never fails the request.
    pub fn handle(&self, hook: Phase, ctx: &mut RequestCtx) -> HookOutcome {
        let scope = Arc::clone(ctx.scope());

        let outcome = match self.evaluate(hook, &scope, ctx) {
            Ok(converted) => {
                debug!(
                    request_id = ?ctx.request_id(),
                    hook = %hook,
                    scope = %scope.name,
                    from = %scope.conversion.source_encoding,
                    to = %scope.conversion.target_encoding,
                    before = ctx.uri().len(),
                    after = converted.len(),
                    "request uri converted"
                );
                ctx.replace_uri(converted);
                HookOutcome::Handled
            }
            Err(Skip::Declined(reason)) => {
                match &reason {
                    Decline::Conversion(err) => debug!(
                        request_id = ?ctx.request_id(),
                        hook = %hook,
                        scope = %scope.name,
                        reason = reason.as_str(),
                        error = %err,
                        "uri conversion failed"
                    ),
                    _ => debug!(
                        request_id = ?ctx.request_id(),
                        hook = %hook,
                        scope = %scope.name,
                        reason = reason.as_str(),
                        "uri conversion declined"
                    ),
                }
                HookOutcome::Declined
            }
            Err(Skip::Unmapped(err)) => {
                warn!(
                    request_id = ?ctx.request_id(),
                    hook = %hook,
                    scope = %scope.name,
                    error = %err,
                    "cannot map request uri to a path"
                );
                HookOutcome::Error
            }
        };

        match ctx.extensions.get_mut::<ConversionTrace>() {
            Some(trace) => trace.record(hook, outcome),
            None => {
                let mut trace = ConversionTrace::default();
                trace.record(hook, outcome);
                ctx.extensions.insert(trace);
            }
        }

        outcome
    }

    fn evaluate(
        &self,
        hook: Phase,
        scope: &ScopeConfig,
        ctx: &RequestCtx,
    ) -> Result<Vec<u8>, Skip> {
        let cfg = &scope.conversion;

        //---------------------------------------------------------------------
        // 1. Dispatch guard
        //---------------------------------------------------------------------
        if !cfg.enabled {
            return Err(Skip::Declined(Decline::Disabled));
        }
        if hook != cfg.active_phase {
            return Err(Skip::Declined(Decline::InactivePhase));
        }
        if ctx.uri_replaced() {
            return Err(Skip::Declined(Decline::AlreadyConverted));
        }

        //---------------------------------------------------------------------
        // 2. Existence probe
        //---------------------------------------------------------------------
        let root = scope.document_root.as_ref().ok_or_else(|| {
            Skip::Unmapped(MapError::NoDocumentRoot {
                scope: scope.name.clone(),
            })
        })?;

        match self.probe.probe(root, ctx.uri()) {
            Ok(Existence::Exists) => return Err(Skip::Declined(Decline::PathExists)),
            Ok(Existence::NotExists) => {}
            Err(err) => return Err(Skip::Unmapped(err)),
        }

        //---------------------------------------------------------------------
        // 3. Convert
        //---------------------------------------------------------------------
        transcode(cfg, ctx.uri()).map_err(|err| Skip::Declined(Decline::Conversion(err)))
    }
}

fn transcode(cfg: &ConversionConfig, uri: &[u8]) -> Result<Vec<u8>, ConversionError> {
    let capacity = cfg
        .output_capacity(uri.len())
        .ok_or(ConversionError::AllocationFailure {
            requested: usize::MAX,
        })?;

    let converted = convert(&cfg.source_encoding, &cfg.target_encoding, uri, capacity)?;
    Ok(converted.bytes)
}

impl Device for UrlConvertDevice {
    fn name(&self) -> &'static str {
        "url_encoding_convert"
    }

    fn on_request(&self, ctx: &mut RequestCtx) -> DeviceResult {
        self.hook_result(Phase::Early, ctx)
    }

    fn after_route(&self, ctx: &mut RequestCtx) -> DeviceResult {
        self.hook_result(Phase::Late, ctx)
    }

    fn on_error(&self, err: &DeviceError) {
        debug!(device = self.name(), error = %err, "device error");
    }
}

impl UrlConvertDevice {
    fn hook_result(&self, hook: Phase, ctx: &mut RequestCtx) -> DeviceResult {
        match self.handle(hook, ctx) {
            HookOutcome::Declined | HookOutcome::Handled => DeviceResult::Continue,
            HookOutcome::Error => DeviceResult::Error(DeviceError::non_fatal(format!(
                "url_encoding_convert could not map the request path in the {hook} hook"
            ))),
        }
    }
}
