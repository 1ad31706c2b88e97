pub mod builtin;
pub mod core;
#[cfg(test)]
mod tests;

pub use self::builtin::url_convert::{ConversionTrace, HookOutcome, UrlConvertDevice};
pub use self::core::pipeline::DevicePipeline;
pub use self::core::registry::DeviceRegistry;
pub use self::core::{Device, DeviceResult};
