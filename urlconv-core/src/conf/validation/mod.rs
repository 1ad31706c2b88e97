mod error;
mod report;
mod validate;
mod validated_config;

pub use error::ConfigError;
pub use report::*;
pub use validate::{validate_location, validate_server, validate_spec};
pub use validated_config::ValidatedConfig;
