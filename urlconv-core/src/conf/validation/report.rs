use crate::conf::types::{Origin, Phase};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Display;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            println!("{}: {}: {}", issue.origin, severity, issue.message);

            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 || warnings > 0 {
            println!(
                "configuration validation found {} errors, {} warnings\n",
                errors, warnings
            );
        }

        let mut by_file = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(issue.origin.file())
                .or_insert(Vec::new())
                .push(issue);
        }

        for (file, issues) in by_file {
            println!("{}", file.display());

            for issue in issues {
                match issue.severity {
                    Severity::Error => {
                        println!("  {}: {}", "error".red().bold(), issue.message);
                    }
                    Severity::Warning => {
                        println!("  {}: {}", "warning".yellow().bold(), issue.message);
                    }
                }
                if let Some(help) = &issue.help {
                    println!("    {}: {}", "help".cyan(), help);
                }

                println!();
            }
        }
    }
}

/// url_encoding_convert Block Validation
impl ValidationReport {
    pub fn alloc_size_x_out_of_range(&mut self, value: usize, origin: &Origin) {
        self.error(
            format!("alloc_size_x out of range: {}", value),
            origin,
            Some("Use a multiplier between 4 and 16.".to_string()),
        )
    }

    pub fn invalid_alloc_size_x(&mut self, value: &str, origin: &Origin) {
        self.error(
            format!("invalid alloc_size_x: {}", value),
            origin,
            Some("Use a number or an x token between x4 and x16 (e.g. \"x8\").".to_string()),
        )
    }

    pub fn invalid_alloc_size(&mut self, value: &str, origin: &Origin) {
        self.error(
            format!("invalid alloc_size: {}", value),
            origin,
            Some("Use a byte count, optionally suffixed with k or m (e.g. \"4k\").".to_string()),
        )
    }

    pub fn unknown_encoding(&mut self, label: &str, origin: &Origin) {
        self.error(format!("unknown encoding: {}", label), origin, None)
    }

    pub fn target_encoding_not_writable(&mut self, label: &str, origin: &Origin) {
        self.error(
            format!("encoding cannot be used as a conversion target: {}", label),
            origin,
            Some("UTF-16 and the replacement encoding can only be decoded.".to_string()),
        )
    }

    pub fn same_source_and_target_warning(&mut self, label: &str, origin: &Origin) {
        self.warning(
            format!("source and target encoding are both {}", label),
            origin,
            Some("The conversion will never change a URI.".to_string()),
        )
    }

    pub fn enabled_without_document_root(&mut self, origin: &Origin) {
        self.error(
            "url_encoding_convert is enabled but no root or alias is configured".to_string(),
            origin,
            Some("Set `root` on the server or `root`/`alias` on the location.".to_string()),
        )
    }

    pub fn early_phase_in_location_warning(&mut self, server_phase: Phase, origin: &Origin) {
        self.warning(
            "phase = \"early\" in a location has no effect".to_string(),
            origin,
            Some(format!(
                "The early hook runs before routing with the server settings (server phase is {}).",
                server_phase
            )),
        )
    }

    pub fn both_phases_active_warning(&mut self, origin: &Origin) {
        self.warning(
            "server converts in the early phase and this location in the late phase".to_string(),
            origin,
            Some("A request is converted at most once; the late setting only applies to URIs the early hook left alone.".to_string()),
        )
    }

    pub fn location_overrides_ignored_in_early_phase_warning(&mut self, origin: &Origin) {
        self.warning(
            "location conversion settings have no effect while the server converts in the early phase".to_string(),
            origin,
            Some("The early hook runs before routing with the server settings; set phase = \"late\" here to convert with these settings.".to_string()),
        )
    }
}

/// Location Block Validation
impl ValidationReport {
    pub fn invalid_location_path(&mut self, path: &str, origin: &Origin) {
        self.error(
            format!("location path must start with '/': {}", path),
            origin,
            None,
        )
    }

    pub fn root_and_alias_both_set(&mut self, origin: &Origin) {
        self.error(
            "location sets both root and alias".to_string(),
            origin,
            Some("Keep one of them.".to_string()),
        )
    }

    pub fn document_root_does_not_exist_warning(&mut self, dir: Display, origin: &Origin) {
        self.warning(
            format!("document root does not exist: {}", dir),
            origin,
            None,
        )
    }

    pub fn document_root_is_not_a_dir(&mut self, dir: Display, origin: &Origin) {
        self.error(
            format!("document root is not a directory: {}", dir),
            origin,
            None,
        )
    }
}
