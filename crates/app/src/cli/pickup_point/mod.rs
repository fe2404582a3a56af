use clap::{Args, Subcommand};

use super::CliError;

mod register;

#[derive(Debug, Args)]
pub(crate) struct PickupPointCommand {
    #[command(subcommand)]
    command: PickupPointSubcommand,
}

#[derive(Debug, Subcommand)]
enum PickupPointSubcommand {
    /// Register a pickup point and print its identifier.
    Register(register::RegisterPickupPointArgs),
}

impl PickupPointCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            PickupPointSubcommand::Register(args) => register::run(args).await,
        }
    }
}
