use crate::conf::types::{
    ConversionConfig, DEFAULT_BUFFER_SIZE_MULTIPLIER, DEFAULT_FROM_ENCODING, DEFAULT_TO_ENCODING,
    MAX_BUFFER_SIZE_MULTIPLIER, MIN_BUFFER_SIZE_MULTIPLIER, parse_size,
};
use crate::convert::{ConversionError, convert};
use anyhow::{Context, bail};
use clap::Args;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, percent_encode};

/// Bytes escaped when printing a converted path. Non-ASCII bytes are always escaped.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source encoding label
    #[arg(long, default_value = DEFAULT_FROM_ENCODING)]
    pub from: String,

    /// Target encoding label
    #[arg(long, default_value = DEFAULT_TO_ENCODING)]
    pub to: String,

    /// Output-capacity multiplier (4-16)
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE_MULTIPLIER)]
    pub alloc_size_x: usize,

    /// Absolute floor for the output capacity, e.g. `512` or `4k`
    #[arg(long, default_value = "0")]
    pub alloc_size: String,

    /// Request path; percent escapes are decoded first
    pub path: String,
}

/// Result of converting one request path from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub input_len: usize,
    pub capacity: usize,
    pub result: Result<Vec<u8>, ConversionError>,
}

impl ConvertArgs {
    fn conversion_config(&self) -> anyhow::Result<ConversionConfig> {
        let x = self.alloc_size_x;
        if !(MIN_BUFFER_SIZE_MULTIPLIER..=MAX_BUFFER_SIZE_MULTIPLIER).contains(&x) {
            bail!(
                "--alloc-size-x must be between {} and {}, got {}",
                MIN_BUFFER_SIZE_MULTIPLIER,
                MAX_BUFFER_SIZE_MULTIPLIER,
                x
            );
        }

        let minimum = parse_size(&self.alloc_size).context("--alloc-size")?;

        Ok(ConversionConfig {
            enabled: true,
            buffer_size_multiplier: x,
            minimum_buffer_size: minimum,
            source_encoding: self.from.clone(),
            target_encoding: self.to.clone(),
            ..ConversionConfig::default()
        })
    }
}

pub fn convert_path(args: &ConvertArgs) -> anyhow::Result<ConvertReport> {
    let cfg = args.conversion_config()?;
    let input: Vec<u8> = percent_decode_str(&args.path).collect();

    let capacity = cfg
        .output_capacity(input.len())
        .context("input too long to size an output buffer")?;

    let result = convert(&cfg.source_encoding, &cfg.target_encoding, &input, capacity)
        .map(|converted| converted.bytes);

    Ok(ConvertReport {
        input_len: input.len(),
        capacity,
        result,
    })
}

pub fn encode_path(bytes: &[u8]) -> String {
    percent_encode(bytes, PATH).to_string()
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let report = convert_path(&args)?;

    match report.result {
        Ok(bytes) => {
            println!("{}", encode_path(&bytes));
            Ok(())
        }
        Err(err) => bail!(
            "conversion {} -> {} failed ({} input bytes, capacity {}): {}",
            args.from,
            args.to,
            report.input_len,
            report.capacity,
            err
        ),
    }
}
