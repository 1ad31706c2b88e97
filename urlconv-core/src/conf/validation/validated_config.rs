use crate::conf::types::{ConfigSpec, RuntimeConfig};
use crate::conf::validation::report::ValidationReport;

#[derive(Debug)]
pub struct ValidatedConfig {
    pub spec: ConfigSpec,
    pub config: RuntimeConfig,

    /// Warnings only; a report with errors never gets this far.
    pub validation: ValidationReport,
}
