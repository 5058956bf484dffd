//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    amounts::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    carts::records::CartUuid,
    menu::records::MenuItemUuid,
    orders::{
        data::NewOrder,
        records::{
            AddressSnapshot, DeliveryDetails, OrderAmounts, OrderLineRecord, OrderLineUuid,
            OrderRecord, OrderStatus, OrderUuid, PaymentReference, PaymentStatus, UnknownStatus,
        },
    },
    owners::{RestaurantUuid, UserUuid},
};

const LOCK_CART_SQL: &str = include_str!("sql/lock_cart.sql");
const DELETE_CART_SQL: &str = include_str!("sql/delete_cart.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_FOR_UPDATE_SQL: &str = include_str!("sql/get_order_for_update.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the (user, restaurant) cart row until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        restaurant: RestaurantUuid,
    ) -> Result<Option<CartUuid>, sqlx::Error> {
        let cart: Option<Uuid> = query_scalar(LOCK_CART_SQL)
            .bind(user.into_uuid())
            .bind(restaurant.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(cart.map(CartUuid::from_uuid))
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let amounts = &order.amounts;

        let mut created = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer.into_uuid())
            .bind(order.restaurant.into_uuid())
            .bind(&order.address.label)
            .bind(&order.address.address_line)
            .bind(order.address.landmark.as_deref())
            .bind(&order.address.city)
            .bind(&order.address.state)
            .bind(&order.address.pincode)
            .bind(amount_to_i64(amounts.subtotal, "subtotal")?)
            .bind(amount_to_i64(amounts.tax, "tax")?)
            .bind(amount_to_i64(amounts.delivery_fee, "delivery_fee")?)
            .bind(amount_to_i64(amounts.discount, "discount")?)
            .bind(amount_to_i64(amounts.cashback, "cashback")?)
            .bind(amount_to_i64(amounts.total_amount, "total_amount")?)
            .bind(&order.payment.gateway_order_id)
            .bind(&order.payment.gateway_payment_id)
            .bind(&order.payment.gateway_signature)
            .bind(order.offer_id.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        for (position, line) in order.lines.iter().enumerate() {
            let uuid = OrderLineUuid::new();

            query(CREATE_ORDER_ITEM_SQL)
                .bind(uuid.into_uuid())
                .bind(order.uuid.into_uuid())
                .bind(i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "position".to_string(),
                    source: Box::new(e),
                })?)
                .bind(line.menu_item.into_uuid())
                .bind(&line.name)
                .bind(amount_to_i64(line.price, "price")?)
                .bind(quantity_to_i32(line.quantity, "quantity")?)
                .bind(line.note.as_deref())
                .execute(&mut **tx)
                .await?;

            created.lines.push(OrderLineRecord {
                uuid,
                menu_item_uuid: line.menu_item,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                note: line.note.clone(),
            });
        }

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut order = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.attach_lines(tx, std::slice::from_mut(&mut order))
            .await?;

        Ok(order)
    }

    pub(crate) async fn get_order_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_FOR_UPDATE_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, &mut orders).await?;

        Ok(orders)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        order_status: OrderStatus,
        payment_status: PaymentStatus,
        delivery: &DeliveryDetails,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut updated = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(order_status.as_str())
            .bind(payment_status.as_str())
            .bind(delivery.agent_name.as_deref())
            .bind(delivery.agent_phone.as_deref())
            .bind(delivery.estimated_delivery_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await?;

        self.attach_lines(tx, std::slice::from_mut(&mut updated))
            .await?;

        Ok(updated)
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<Uuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for row in &rows {
            let order_uuid: Uuid = row.try_get("order_uuid")?;

            lines
                .entry(order_uuid)
                .or_default()
                .push(OrderLineRecord::from_row(row)?);
        }

        for order in orders.iter_mut() {
            order.lines = lines.remove(&order.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_quantity(row, "quantity")?,
            note: row.try_get("note")?,
        })
    }
}

fn try_get_status<T>(row: &PgRow, col: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = UnknownStatus>,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            order_status: try_get_status(row, "order_status")?,
            payment_status: try_get_status(row, "payment_status")?,
            delivery: DeliveryDetails {
                agent_name: row.try_get("delivery_agent_name")?,
                agent_phone: row.try_get("delivery_agent_phone")?,
                estimated_delivery_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("estimated_delivery_at")?
                    .map(SqlxTimestamp::to_jiff),
            },
            address: AddressSnapshot {
                label: row.try_get("address_label")?,
                address_line: row.try_get("address_line")?,
                landmark: row.try_get("landmark")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                pincode: row.try_get("pincode")?,
            },
            amounts: OrderAmounts {
                subtotal: try_get_amount(row, "subtotal")?,
                tax: try_get_amount(row, "tax")?,
                delivery_fee: try_get_amount(row, "delivery_fee")?,
                discount: try_get_amount(row, "discount")?,
                cashback: try_get_amount(row, "cashback")?,
                total_amount: try_get_amount(row, "total_amount")?,
            },
            payment: PaymentReference {
                gateway_order_id: row.try_get("gateway_order_id")?,
                gateway_payment_id: row.try_get("gateway_payment_id")?,
                gateway_signature: row.try_get("gateway_signature")?,
            },
            offer_id: row.try_get("offer_id")?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
