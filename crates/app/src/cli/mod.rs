//! Operator commands run against the pickup point database.

use clap::{Parser, Subcommand};
use thiserror::Error;

use pvz_app::domain::pickup_points::PickupPointsServiceError;

mod db;
mod pickup_point;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("failed to register pickup point: {0}")]
    Register(#[source] PickupPointsServiceError),
}

#[derive(Debug, Parser)]
#[command(name = "pvz-app", about = "Pickup point CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance.
    Db(db::DbCommand),

    /// Pickup point administration.
    PickupPoint(pickup_point::PickupPointCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Db(command) => command.run().await,
            Commands::PickupPoint(command) => command.run().await,
        }
    }
}
