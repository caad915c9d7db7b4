use clap::Parser;
use portprobe::cli::{self, Args, Outcome};
use portprobe::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli::execute(&args).await {
        Ok(Outcome::Completed(report)) => {
            output::print_results(&report);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Interrupted) => {
            println!("\nExiting program.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
