mod discover;
mod loader;
mod lower;
mod merge;
mod parse;
#[cfg(test)]
mod tests;
pub mod types;
pub mod validation;

pub use loader::{load_config, load_spec_config};
pub use lower::lower_config;
pub use parse::ENTRYPOINT_FILE;
pub use types::RuntimeConfig;
pub use validation::{ConfigError, ValidatedConfig};
