mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Print issues without colors
        #[arg(short, long, default_value = "false", conflicts_with = "json")]
        plain: bool,

        /// Print issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,

        /// Which representation to print: `dsl` (as written) or `runtime` (resolved)
        #[arg(long, default_value = "runtime")]
        repr: RepresentationFormat,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain, json } => {
            check(path, ReportFormat::from_flags(plain, json))
        }
        ConfigCmd::Dump {
            path,
            json,
            yaml,
            repr,
        } => dump(path, json, yaml, repr),
    }
}
