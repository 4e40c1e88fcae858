//! Kubepug CLI - find deprecated Kubernetes APIs before upgrading

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod display;
mod error;
mod exit_codes;
mod input;
mod logging;

use display::OutputFormat;

#[derive(Parser)]
#[command(name = "kubepug")]
#[command(author = "Kubepug Contributors")]
#[command(version)]
#[command(
    about = "Shows the deprecated and deleted Kubernetes APIs your manifests use, against the swagger.json of a target release",
    long_about = None
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = Verbosity::Warn,
        env = "KUBEPUG_VERBOSITY"
    )]
    verbosity: Verbosity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Verbosity {
    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check manifests for deprecated and deleted APIs
    Check {
        /// swagger.json of the target Kubernetes release
        #[arg(long, env = "KUBEPUG_SWAGGER_FILE")]
        swagger_file: PathBuf,

        /// File or directory containing Kubernetes manifests
        #[arg(short = 'i', long, env = "KUBEPUG_INPUT_FILE")]
        input_file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Stdout, env = "KUBEPUG_FORMAT")]
        format: OutputFormat,

        /// Write results to this file instead of stdout
        #[arg(long, env = "KUBEPUG_FILENAME")]
        filename: Option<PathBuf>,

        /// Hide the API description (it often names the replacement API)
        #[arg(long, env = "KUBEPUG_NO_DESCRIPTION")]
        no_description: bool,

        /// Exit with an error if a deprecated API is in use
        #[arg(long, env = "KUBEPUG_ERROR_ON_DEPRECATED")]
        error_on_deprecated: bool,

        /// Exit with an error if a deleted API is in use
        #[arg(long, env = "KUBEPUG_ERROR_ON_DELETED")]
        error_on_deleted: bool,

        /// Fail when two swagger definitions declare the same resource type
        #[arg(long, env = "KUBEPUG_REJECT_DUPLICATES")]
        reject_duplicates: bool,
    },

    /// List the resource types declared by a swagger file
    Catalog {
        /// swagger.json of the target Kubernetes release
        #[arg(long, env = "KUBEPUG_SWAGGER_FILE")]
        swagger_file: PathBuf,

        /// Only list deprecated resource types
        #[arg(long, env = "KUBEPUG_DEPRECATED_ONLY")]
        deprecated: bool,

        /// Output as JSON
        #[arg(long, env = "KUBEPUG_JSON")]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::initialize_logging(cli.verbosity.as_str());

    let result = match cli.command {
        Commands::Check {
            swagger_file,
            input_file,
            format,
            filename,
            no_description,
            error_on_deprecated,
            error_on_deleted,
            reject_duplicates,
        } => commands::check::run(&commands::check::CheckOptions {
            swagger_file,
            input: input_file,
            format,
            filename,
            show_description: !no_description,
            error_on_deprecated,
            error_on_deleted,
            reject_duplicates,
        }),

        Commands::Catalog {
            swagger_file,
            deprecated,
            json,
        } => commands::catalog::run(&swagger_file, deprecated, json),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            let code = err.exit_code();
            tracing::debug!(code, "command failed");
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
