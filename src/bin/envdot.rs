// SPDX-License-Identifier: MIT OR Apache-2.0

//! `envdot`: inspect and convert configuration files from the command line.
//!
//! ```sh
//! envdot get config.yaml database.port --cast int
//! envdot dump config.toml --format json
//! envdot convert settings.ini .env
//! envdot --set port=9090 dump .env
//! ```
//!
//! Logging goes to stderr and is controlled by `ENVDOT_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use envdot::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load, query and convert dotenv, INI, JSON, YAML and TOML files.
#[derive(Parser, Debug)]
#[command(name = "envdot", version)]
struct Cli {
    /// Log at debug level regardless of ENVDOT_LOG.
    #[arg(long, global = true)]
    debug: bool,

    /// Override a key after loading (KEY=VALUE, repeatable). Values are inferred.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    overrides: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a single value.
    Get {
        /// Configuration file to load.
        file: PathBuf,
        /// Key to look up, in any spelling (`database.host`, `DATABASE_HOST`).
        key: String,
        /// Cast the value (int, float, bool, str, list, tuple).
        #[arg(long)]
        cast: Option<CastKind>,
    },
    /// Print the flattened namespace.
    Dump {
        /// Configuration file to load.
        file: PathBuf,
        /// Output format.
        #[arg(long, default_value = "dotenv")]
        format: Format,
    },
    /// Re-serialize a file in another format.
    Convert {
        /// File to read.
        input: PathBuf,
        /// File to write.
        output: PathBuf,
        /// Output format. Detected from the output name when omitted.
        #[arg(long)]
        format: Option<Format>,
    },
}

fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ENVDOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load(file: &Path, overrides: &[(String, String)]) -> Result<DotEnv> {
    let mut config = DotEnv::new();
    config.load_file(file)?;
    for (key, value) in overrides {
        config.set_raw(key, value);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Get { file, key, cast } => {
            let config = load(&file, &cli.overrides)?;
            match cast {
                Some(kind) => {
                    let value = config.get_as(&key, kind)?;
                    match value.as_items() {
                        Some(items) => items.iter().for_each(|item| println!("{}", item)),
                        None => println!("{}", value),
                    }
                }
                None => println!("{}", config.get(&key)?),
            }
        }
        Commands::Dump { file, format } => {
            let config = load(&file, &cli.overrides)?;
            print!("{}", config.render(format)?);
        }
        Commands::Convert {
            input,
            output,
            format,
        } => {
            let config = load(&input, &cli.overrides)?;
            match format {
                Some(format) => config.save_as(&output, format)?,
                None => config.save(&output)?,
            }
            tracing::debug!("Wrote {} keys to {}", config.len(), output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
