use clap::Parser;
use std::process::ExitCode;

use notekeeper::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    notekeeper::logging::init_logging(cli.verbose);

    match notekeeper::run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
