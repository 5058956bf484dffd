use clap::Args;
use tiffin_app::{
    database::{self, Db},
    domain::premium::{PgPremiumService, PremiumService, records::PremiumSubscriptionUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CancelPremiumArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Subscription UUID to cancel
    #[arg(long)]
    subscription_uuid: Uuid,
}

pub(crate) async fn run(args: CancelPremiumArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let plan = PgPremiumService::new(Db::new(pool))
        .cancel(PremiumSubscriptionUuid::from_uuid(args.subscription_uuid))
        .await
        .map_err(|error| format!("failed to cancel subscription: {error}"))?;

    println!("cancelled subscription {}", plan.uuid);

    Ok(())
}
