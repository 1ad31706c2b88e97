pub mod errors;
pub mod pipeline;
pub mod registry;
pub mod result;

use self::errors::DeviceError;
pub use self::result::DeviceResult;
use crate::ctx::RequestCtx;

/// A processing unit in the request pipeline.
///
/// The host wires every device at both hook points. Devices must be Send and
/// Sync because one instance serves all concurrent requests.
///
/// All methods provide default implementations that simply continue the pipeline,
/// allowing implementations to override only the methods they care about.
pub trait Device: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called after the request is hydrated, before routing and rewriting.
    fn on_request(&self, _ctx: &mut RequestCtx) -> DeviceResult {
        DeviceResult::Continue
    }

    /// Called once the request has been routed to a location.
    fn after_route(&self, _ctx: &mut RequestCtx) -> DeviceResult {
        DeviceResult::Continue
    }

    /// Called when this device returned an error from one of its hooks.
    fn on_error(&self, _err: &DeviceError) {}
}
