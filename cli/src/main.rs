//! `embedcmp`: embed a text file, keep a reference embedding, compare.

use clap::Parser;
use embedcmp_embeddings::FailureKind;
use tracing_subscriber::{EnvFilter, fmt};

mod args;
mod commands;
mod config;
mod output;

use args::Cli;

const EXIT_FAILURE: i32 = 1;
const EXIT_INIT_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.global.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let config = match config::resolve(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(EXIT_INIT_FAILURE);
        }
    };

    if let Err(e) = commands::run(cli.command, &config).await {
        eprintln!("error: {e}");
        let code = match e.kind() {
            FailureKind::Initialization => EXIT_INIT_FAILURE,
            FailureKind::Request | FailureKind::Precondition | FailureKind::Persistence => {
                EXIT_FAILURE
            }
        };
        std::process::exit(code);
    }
}
