//! Pickup Point Application CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    // A missing .env file is not an error; DATABASE_URL may come from the environment.
    let _env = dotenvy::dotenv();

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("pvz-app: {error}");
            ExitCode::FAILURE
        }
    }
}
