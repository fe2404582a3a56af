use clap::Args;
use pvz_app::database;

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), CliError> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(CliError::Connect)?;

    database::migrate(&pool).await.map_err(CliError::Migrate)?;

    println!("migrations applied");

    Ok(())
}
