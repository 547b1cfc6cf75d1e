use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use tasklist::cli;
use tasklist::cli::commands::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKLIST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();
    let exit_code = cli::run(cli_args);
    process::exit(exit_code);
}
