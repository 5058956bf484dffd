use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;
use tiffin_app::{
    database::{self, Db},
    domain::{
        owners::{Owner, RestaurantUuid, UserUuid},
        premium::{
            PgPremiumService, PremiumService,
            data::NewPremiumSubscription,
            records::{PremiumPerks, PremiumSubscriptionUuid},
        },
    },
};
use uuid::Uuid;

use crate::cli::parse_timestamp;

#[derive(Debug, Args)]
pub(crate) struct GrantPremiumArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User to subscribe
    #[arg(long)]
    user_uuid: Option<Uuid>,

    /// Restaurant to subscribe
    #[arg(long)]
    restaurant_uuid: Option<Uuid>,

    /// Plan display name
    #[arg(long, default_value = "Gold")]
    plan_name: String,

    /// First instant of the plan (RFC 3339); now when omitted
    #[arg(long)]
    start_date: Option<String>,

    /// Last instant of the plan (RFC 3339)
    #[arg(long)]
    end_date: String,

    /// Waive the standard delivery fee
    #[arg(long)]
    free_delivery: bool,

    /// Extra discount on the subtotal, in percent
    #[arg(long, default_value_t = Decimal::ZERO)]
    extra_discount_percent: Decimal,

    /// Cashback on the subtotal, in percent
    #[arg(long, default_value_t = Decimal::ZERO)]
    cashback_percent: Decimal,
}

pub(crate) async fn run(args: GrantPremiumArgs) -> Result<(), String> {
    let subscriber = match (args.user_uuid, args.restaurant_uuid) {
        (Some(user), None) => Owner::User(UserUuid::from_uuid(user)),
        (None, Some(restaurant)) => Owner::Restaurant(RestaurantUuid::from_uuid(restaurant)),
        _ => return Err("exactly one of user-uuid or restaurant-uuid is required".to_string()),
    };

    let start_date =
        parse_timestamp("start-date", args.start_date.as_deref())?.unwrap_or_else(Timestamp::now);
    let end_date = parse_timestamp("end-date", Some(args.end_date.as_str()))?
        .ok_or_else(|| "end-date is required".to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let plan = PgPremiumService::new(Db::new(pool))
        .subscribe(NewPremiumSubscription {
            uuid: PremiumSubscriptionUuid::new(),
            subscriber,
            plan_name: args.plan_name,
            start_date,
            end_date,
            perks: PremiumPerks {
                free_delivery: args.free_delivery,
                extra_discount_percent: args.extra_discount_percent,
                cashback_percent: args.cashback_percent,
            },
        })
        .await
        .map_err(|error| format!("failed to grant premium: {error}"))?;

    println!("subscription_uuid: {}", plan.uuid);
    println!("subscriber: {} {}", plan.subscriber.kind(), plan.subscriber.uuid());
    println!("plan_name: {}", plan.plan_name);
    println!("valid: {} .. {}", plan.start_date, plan.end_date);

    Ok(())
}
