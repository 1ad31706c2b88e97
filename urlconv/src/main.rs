use clap::{Parser, Subcommand, ValueEnum};
use urlconv_core::cli;
use urlconv_core::logging::{self, LogMode, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "urlconv",
    version,
    about = "urlconv: request-path transcoding filter"
)]
struct Cli {
    /// Log output format (defaults to pretty on a terminal, JSON otherwise)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Conf {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },

    /// Convert a request path between encodings
    Convert(cli::convert::ConvertArgs),

    /// Run a request target through the filter pipeline
    Resolve(cli::resolve::ResolveArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

fn main() {
    let cli = Cli::parse();

    let mode = match cli.log_format {
        Some(LogFormat::Json) => LogMode::Raw,
        Some(LogFormat::Pretty) => LogMode::Pretty,
        None => logging::default_log_mode(),
    };
    init_logging(mode);

    let result = match cli.command {
        Command::Conf { cmd } => cli::conf::run(cmd),
        Command::Convert(args) => cli::convert::run(args),
        Command::Resolve(args) => cli::resolve::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
