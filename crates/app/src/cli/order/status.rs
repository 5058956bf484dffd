use clap::Args;
use tiffin_app::{
    database::{self, Db},
    domain::orders::{
        OrdersService, PgOrdersService,
        data::OrderStatusUpdate,
        records::{DeliveryDetails, OrderStatus, OrderUuid, PaymentStatus},
    },
};
use uuid::Uuid;

use crate::cli::parse_timestamp;

#[derive(Debug, Args)]
pub(crate) struct OrderStatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order to update
    #[arg(long)]
    order_uuid: Uuid,

    /// New order status, e.g. `accepted` or `out_for_delivery`
    #[arg(long)]
    status: Option<OrderStatus>,

    /// New payment status, e.g. `refunded`
    #[arg(long)]
    payment_status: Option<PaymentStatus>,

    /// Courier name
    #[arg(long)]
    agent_name: Option<String>,

    /// Courier phone number
    #[arg(long)]
    agent_phone: Option<String>,

    /// Estimated delivery time (RFC 3339)
    #[arg(long)]
    estimated_delivery_at: Option<String>,
}

pub(crate) async fn run(args: OrderStatusArgs) -> Result<(), String> {
    let estimated_delivery_at =
        parse_timestamp("estimated-delivery-at", args.estimated_delivery_at.as_deref())?;

    let delivery = (args.agent_name.is_some()
        || args.agent_phone.is_some()
        || estimated_delivery_at.is_some())
    .then(|| DeliveryDetails {
        agent_name: args.agent_name,
        agent_phone: args.agent_phone,
        estimated_delivery_at,
    });

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let order = PgOrdersService::new(Db::new(pool))
        .update_status(
            OrderUuid::from_uuid(args.order_uuid),
            OrderStatusUpdate {
                order_status: args.status,
                payment_status: args.payment_status,
                delivery,
            },
        )
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("order_status: {}", order.order_status);
    println!("payment_status: {}", order.payment_status);

    Ok(())
}
