use crate::conf::types::{ConversionConfig, ScopeConfig};
use crate::ctx::RequestCtx;
use crate::device::core::errors::DeviceError;
use crate::device::core::{Device, DeviceResult};
use crate::device::{DevicePipeline, DeviceRegistry};
use crate::conf::types::RuntimeConfig;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct TestDevice {
    result: DeviceResult,
    calls: AtomicUsize,
    errors: AtomicUsize,
}

impl TestDevice {
    fn new(result: DeviceResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        })
    }
}

impl Device for TestDevice {
    fn name(&self) -> &'static str {
        "test"
    }

    fn on_request(&self, _ctx: &mut RequestCtx) -> DeviceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn on_error(&self, _err: &DeviceError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

fn ctx() -> RequestCtx {
    RequestCtx::new(Arc::new(ScopeConfig::server(ConversionConfig::default(), None)))
}

#[test]
fn non_fatal_error_does_not_stop_the_pipeline() {
    // Arrange
    let failing = TestDevice::new(DeviceResult::Error(DeviceError::non_fatal("boom")));
    let next = TestDevice::new(DeviceResult::Continue);
    let devices: Vec<Arc<dyn Device>> = vec![failing.clone(), next.clone()];

    // Act
    let result = DevicePipeline::run_on_request(&devices, &mut ctx());

    // Assert
    assert_eq!(result, DeviceResult::Continue);
    assert_eq!(failing.errors.load(Ordering::SeqCst), 1);
    assert_eq!(next.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fatal_error_stops_the_pipeline() {
    let failing = TestDevice::new(DeviceResult::Error(DeviceError::fatal("boom")));
    let next = TestDevice::new(DeviceResult::Continue);
    let devices: Vec<Arc<dyn Device>> = vec![failing.clone(), next.clone()];

    let result = DevicePipeline::run_on_request(&devices, &mut ctx());

    assert_eq!(result, DeviceResult::Error(DeviceError::fatal("boom")));
    assert_eq!(next.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn default_after_route_continues() {
    let dev = TestDevice::new(DeviceResult::Error(DeviceError::fatal("boom")));
    let devices: Vec<Arc<dyn Device>> = vec![dev.clone()];

    let result = DevicePipeline::run_after_route(&devices, &mut ctx());

    assert_eq!(result, DeviceResult::Continue);
    assert_eq!(dev.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn registry_skips_converter_when_nothing_is_enabled() {
    let cfg = RuntimeConfig {
        server: Arc::new(ScopeConfig::server(ConversionConfig::default(), None)),
        locations: vec![],
    };

    let mut registry = DeviceRegistry::new();
    registry.load_from_config(&cfg);

    assert!(registry.all().is_empty());
}

#[test]
fn registry_adds_converter_once_when_any_scope_is_enabled() {
    let enabled = ConversionConfig {
        enabled: true,
        ..ConversionConfig::default()
    };
    let cfg = RuntimeConfig {
        server: Arc::new(ScopeConfig::server(enabled.clone(), None)),
        locations: vec![crate::conf::types::LocationConfig {
            path: "/docs".to_string(),
            scope: Arc::new(ScopeConfig {
                name: "/docs".to_string(),
                conversion: enabled,
                document_root: None,
            }),
        }],
    };

    let mut registry = DeviceRegistry::new();
    registry.load_from_config(&cfg);

    assert_eq!(registry.all().len(), 1);
    assert_eq!(registry.all()[0].name(), "url_encoding_convert");
}
