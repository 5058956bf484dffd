use clap::{Args, Subcommand};

mod cancel;
mod grant;

#[derive(Debug, Args)]
pub(crate) struct PremiumCommand {
    #[command(subcommand)]
    command: PremiumSubcommand,
}

#[derive(Debug, Subcommand)]
enum PremiumSubcommand {
    Grant(grant::GrantPremiumArgs),
    Cancel(cancel::CancelPremiumArgs),
}

pub(crate) async fn run(command: PremiumCommand) -> Result<(), String> {
    match command.command {
        PremiumSubcommand::Grant(args) => grant::run(args).await,
        PremiumSubcommand::Cancel(args) => cancel::run(args).await,
    }
}
