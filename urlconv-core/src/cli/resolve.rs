use crate::conf::load_config;
use crate::cli::convert::encode_path;
use crate::device::HookOutcome;
use crate::gateway::{Gateway, GatewayResponse};
use anyhow::Context;
use clap::Args;
use http::Uri;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config: PathBuf,

    /// Request target, e.g. `/docs/%ED%95%9C%EA%B8%80.txt`
    pub uri: String,
}

pub fn resolve(args: &ResolveArgs) -> anyhow::Result<GatewayResponse> {
    let cfg = load_config(&args.config)?;
    let gateway = Gateway::from_config(Arc::new(cfg.config))?;

    let uri: Uri = args
        .uri
        .parse()
        .with_context(|| format!("invalid request target: {}", args.uri))?;

    Ok(gateway.handle(&uri)?)
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let resp = resolve(&args)?;

    println!("scope:  {}", resp.scope);
    println!("uri:    {}", encode_path(&resp.uri));
    println!("early:  {}", describe(resp.trace.early));
    println!("late:   {}", describe(resp.trace.late));
    match resp.served_path() {
        Some(path) => println!("served: {}", path.display()),
        None => println!("served: (not found)"),
    }

    Ok(())
}

fn describe(outcome: Option<HookOutcome>) -> &'static str {
    match outcome {
        None => "-",
        Some(HookOutcome::Declined) => "declined",
        Some(HookOutcome::Handled) => "handled",
        Some(HookOutcome::Error) => "error",
    }
}
