use crate::conf::validation::ValidationReport;
use crate::conf::{ConfigError, ValidatedConfig, load_config};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pretty,
    Plain,
    Json,
}

impl ReportFormat {
    pub fn from_flags(plain: bool, json: bool) -> Self {
        if json {
            ReportFormat::Json
        } else if plain {
            ReportFormat::Plain
        } else {
            ReportFormat::Pretty
        }
    }
}

pub fn check(path: PathBuf, format: ReportFormat) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            if cfg.validation.has_violations() {
                render_report(&cfg.validation, format)?;
            }
            if format != ReportFormat::Json {
                print_summary(&cfg);
            }
            Ok(())
        }
        Err(ConfigError::Validation { report }) => {
            render_report(&report, format)?;
            std::process::exit(1);
        }
        Err(err) => {
            print_config_error(err);
            std::process::exit(1);
        }
    }
}

fn print_summary(cfg: &ValidatedConfig) {
    println!("✔ Config loaded successfully");
    println!("✔ {} locations", cfg.config.locations.len());
    println!(
        "✔ {} scopes with url_encoding_convert enabled",
        cfg.config.enabled_scopes()
    );
    if !cfg.validation.warnings.is_empty() {
        println!("⚠ {} warnings", cfg.validation.warnings.len());
    }
}

fn render_report(report: &ValidationReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Pretty => report.render_pretty(),
        ReportFormat::Plain => report.render_plain(),
        ReportFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}

fn print_config_error(err: ConfigError) {
    let hint = config_error_hint(&err);
    eprintln!("{}", err);
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // IO / discovery
        //---------------------------------------------------------------------
        ConfigError::ReadFile { .. } => Some(
            "The config directory must contain an entrypoint file named `urlconv.hcl`.\n\
             \n\
             Example:\n\
             \n\
             server {\n\
             \x20 root = \"/var/www\"\n\
             \n\
             \x20 url_encoding_convert {\n\
             \x20   enable = true\n\
             \x20 }\n\
             }",
        ),

        ConfigError::Glob { .. } => Some(
            "Included location files are matched with a glob relative to the config directory.\n\
             \n\
             Example:\n\
             \n\
             include {\n\
             \x20 locations = \"locations/*.hcl\"\n\
             }",
        ),

        //---------------------------------------------------------------------
        // Structure
        //---------------------------------------------------------------------
        ConfigError::Parse { .. } => Some(
            "Only `server`, `location` and `include` blocks are recognized, and\n\
             url_encoding_convert accepts: enable, phase, alloc_size_x, alloc_size, from, to.\n\
             \n\
             `phase` must be \"early\" or \"late\".",
        ),

        ConfigError::DuplicateLocation { .. } => Some(
            "Each location prefix may be declared once across the entrypoint and all included files.\n\
             \n\
             Merge the duplicate blocks or change one of the prefixes.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        ConfigError::Validation { .. } => None,
    }
}
