use std::sync::Arc;

use clap::Args;
use pvz_app::{
    database::{self, Db},
    domain::{
        pickup_points::{PgPickupPointsService, PickupPointsService, records::City},
        workflow::WorkflowSettings,
    },
    metrics::NoopMetrics,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct RegisterPickupPointArgs {
    /// City to register the pickup point in (Москва, Санкт-Петербург or Казань)
    #[arg(long)]
    city: City,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RegisterPickupPointArgs) -> Result<(), CliError> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(CliError::Connect)?;

    let service = PgPickupPointsService::new(
        Arc::new(Db::new(pool)),
        Arc::new(NoopMetrics),
        WorkflowSettings::default(),
    );

    let pickup_point = service
        .register_pickup_point(args.city)
        .await
        .map_err(CliError::Register)?;

    println!("pickup_point_uuid: {}", pickup_point.uuid);
    println!("city: {}", pickup_point.city);
    println!("registered_at: {}", pickup_point.registered_at);

    Ok(())
}
