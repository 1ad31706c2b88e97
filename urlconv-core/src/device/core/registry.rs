use crate::conf::RuntimeConfig;
use crate::device::builtin::url_convert::UrlConvertDevice;
use crate::device::core::Device;
use std::sync::Arc;
use tracing::info;

pub struct DeviceRegistry {
    devices: Vec<Arc<dyn Device>>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Register the builtin devices the configuration needs.
    ///
    /// url_encoding_convert is registered once for all scopes; whether it
    /// does anything is decided per request from the scope's settings.
    pub fn load_from_config(&mut self, cfg: &RuntimeConfig) {
        let enabled_scopes = cfg.enabled_scopes();
        if enabled_scopes > 0 {
            info!(enabled_scopes, "registering url_encoding_convert device");
            self.register(Arc::new(UrlConvertDevice::new()));
        }
    }

    pub fn register(&mut self, device: Arc<dyn Device>) {
        self.devices.push(device);
    }

    pub fn all(&self) -> &[Arc<dyn Device>] {
        &self.devices
    }
}
