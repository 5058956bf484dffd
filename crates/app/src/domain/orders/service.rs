//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderStatusUpdate},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        owners::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .repository
            .lock_cart(&mut tx, order.customer, order.restaurant)
            .await?
            .ok_or(OrdersServiceError::AlreadyCheckedOut)?;

        let created = self.repository.create_order(&mut tx, &order).await?;

        self.repository.delete_cart(&mut tx, cart).await?;

        tx.commit().await?;

        info!(
            order = %created.uuid,
            cart = %cart,
            gateway_order_id = %created.payment.gateway_order_id,
            total_amount = created.amounts.total_amount,
            "order placed, cart retired"
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, customer, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order_for_update(&mut tx, order).await?;

        let order_status = update.order_status.unwrap_or(current.order_status);

        if !current.order_status.can_transition_to(order_status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.order_status.to_string(),
                to: order_status.to_string(),
            });
        }

        let payment_status = update.payment_status.unwrap_or(current.payment_status);

        if !current.payment_status.can_transition_to(payment_status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.payment_status.to_string(),
                to: payment_status.to_string(),
            });
        }

        let delivery = update.delivery.unwrap_or(current.delivery);

        let updated = self
            .repository
            .update_status(&mut tx, order, order_status, payment_status, &delivery)
            .await?;

        tx.commit().await?;

        info!(
            order = %updated.uuid,
            order_status = %updated.order_status,
            payment_status = %updated.payment_status,
            "order status updated"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Store the order and delete the customer's cart for its restaurant in one transaction.
    ///
    /// Fails with [`OrdersServiceError::AlreadyCheckedOut`] when that cart no longer exists or
    /// the gateway order id has already been used.
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve one of the customer's orders.
    async fn get_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The customer's orders, newest first.
    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order along its lifecycle or record delivery details.
    async fn update_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
