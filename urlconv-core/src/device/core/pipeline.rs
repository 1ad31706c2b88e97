use super::{Device, DeviceResult};
use crate::ctx::RequestCtx;
use std::sync::Arc;

pub struct DevicePipeline;

impl DevicePipeline {
    /// Early hook: before the request is routed.
    pub fn run_on_request(devices: &[Arc<dyn Device>], ctx: &mut RequestCtx) -> DeviceResult {
        Self::run(devices, ctx, |dev, ctx| dev.on_request(ctx))
    }

    /// Late hook: after the request is routed to a location.
    pub fn run_after_route(devices: &[Arc<dyn Device>], ctx: &mut RequestCtx) -> DeviceResult {
        Self::run(devices, ctx, |dev, ctx| dev.after_route(ctx))
    }

    fn run(
        devices: &[Arc<dyn Device>],
        ctx: &mut RequestCtx,
        hook: impl Fn(&dyn Device, &mut RequestCtx) -> DeviceResult,
    ) -> DeviceResult {
        for dev in devices {
            match hook(dev.as_ref(), ctx) {
                DeviceResult::Continue => continue,
                DeviceResult::Error(err) => {
                    dev.on_error(&err);
                    if err.fatal {
                        return DeviceResult::Error(err);
                    }
                }
            }
        }
        DeviceResult::Continue
    }
}
