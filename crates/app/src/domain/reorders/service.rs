//! Reorder Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    carts::{CartsService, CartsServiceError, data::NewCartLine, records::CartRecord},
    menu::{MenuService, MenuServiceError},
    orders::{OrdersService, records::OrderUuid},
    owners::UserUuid,
    reorders::errors::ReorderError,
};

/// Builds a fresh cart from the still-orderable lines of a past order.
pub struct ReorderResolver {
    menu: Arc<dyn MenuService>,
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
}

impl ReorderResolver {
    #[must_use]
    pub fn new(
        menu: Arc<dyn MenuService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            menu,
            carts,
            orders,
        }
    }
}

#[async_trait]
impl ReorderService for ReorderResolver {
    #[tracing::instrument(
        name = "reorders.reorder_from",
        skip(self),
        fields(user_uuid = %user, order_uuid = %order),
        err
    )]
    async fn reorder_from(
        &self,
        user: UserUuid,
        order: OrderUuid,
        at: Timestamp,
    ) -> Result<CartRecord, ReorderError> {
        let order = self.orders.get_order(user, order).await?;
        let mut lines: Vec<NewCartLine> = Vec::with_capacity(order.lines.len());

        for line in &order.lines {
            if let Some(existing) = lines
                .iter_mut()
                .find(|kept| kept.menu_item == line.menu_item_uuid)
            {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                continue;
            }

            let orderable = match self.menu.get_menu_item(line.menu_item_uuid).await {
                Ok(item) => item.is_orderable_from(order.restaurant_uuid),
                Err(MenuServiceError::NotFound) => false,
                Err(error) => return Err(error.into()),
            };

            if !orderable {
                debug!(menu_item_uuid = %line.menu_item_uuid, "dropping line that can no longer be ordered");
                continue;
            }

            lines.push(NewCartLine {
                menu_item: line.menu_item_uuid,
                quantity: line.quantity,
                note: line.note.clone(),
            });
        }

        if lines.is_empty() {
            return Err(ReorderError::EmptyReorder);
        }

        let kept = lines.len();
        let cart = self
            .carts
            .replace_carts(user, order.restaurant_uuid, lines, at)
            .await
            .map_err(|error| match error {
                CartsServiceError::EmptyCart => ReorderError::EmptyReorder,
                other => other.into(),
            })?;

        info!(
            cart_uuid = %cart.uuid,
            kept,
            dropped = order.lines.len().saturating_sub(cart.lines.len()),
            "reordered"
        );

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait ReorderService: Send + Sync {
    /// Replace the user's carts with one holding the orderable lines of `order`.
    ///
    /// Lines whose item was deleted, is unavailable or moved to another restaurant are dropped.
    /// Fails with [`ReorderError::EmptyReorder`], leaving carts untouched, when nothing is left.
    async fn reorder_from(
        &self,
        user: UserUuid,
        order: OrderUuid,
        at: Timestamp,
    ) -> Result<CartRecord, ReorderError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::MockCartsService,
            menu::{MockMenuService, records::MenuItemRecord},
            orders::{
                MockOrdersService, OrdersServiceError,
                data::{NewOrder, NewOrderLine},
                records::{OrderAmounts, OrderRecord, PaymentReference},
            },
            owners::RestaurantUuid,
        },
        test::{fixtures, helpers::home_address},
    };

    use super::*;

    fn past_order(user: UserUuid, items: &[&MenuItemRecord]) -> OrderRecord {
        let restaurant = items
            .first()
            .map_or_else(RestaurantUuid::new, |item| item.restaurant_uuid);

        fixtures::placed(NewOrder {
            uuid: OrderUuid::new(),
            customer: user,
            restaurant,
            lines: items
                .iter()
                .map(|item| NewOrderLine {
                    menu_item: item.uuid,
                    name: item.name.clone(),
                    price: item.price,
                    quantity: 2,
                    note: Some("extra chutney".to_string()),
                })
                .collect(),
            address: home_address(),
            amounts: OrderAmounts::default(),
            payment: PaymentReference {
                gateway_order_id: "order_1".to_string(),
                gateway_payment_id: "pay_1".to_string(),
                gateway_signature: String::new(),
            },
            offer_id: None,
        })
    }

    fn menu_with(items: Vec<MenuItemRecord>) -> MockMenuService {
        let mut menu = MockMenuService::new();

        menu.expect_get_menu_item().returning(move |uuid| {
            items
                .iter()
                .find(|item| item.uuid == uuid)
                .cloned()
                .ok_or(MenuServiceError::NotFound)
        });

        menu
    }

    fn orders_with(order: OrderRecord) -> MockOrdersService {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .returning(move |_, _| Ok(order.clone()));

        orders
    }

    /// A carts mock that records the lines it was asked to store and echoes them back.
    fn carts_accepting(user: UserUuid, items: Vec<MenuItemRecord>) -> MockCartsService {
        let mut carts = MockCartsService::new();

        carts
            .expect_replace_carts()
            .times(1)
            .returning(move |_, _, lines, _| {
                let kept: Vec<(&MenuItemRecord, u32)> = lines
                    .iter()
                    .filter_map(|line| {
                        items
                            .iter()
                            .find(|item| item.uuid == line.menu_item)
                            .map(|item| (item, line.quantity))
                    })
                    .collect();

                Ok(fixtures::cart(user, &kept))
            });

        carts
    }

    #[tokio::test]
    async fn reorder_keeps_orderable_lines() -> TestResult {
        let user = UserUuid::new();
        let restaurant = RestaurantUuid::new();
        let dosa = fixtures::menu_item(restaurant, "Masala Dosa", 120_00);
        let vada = fixtures::menu_item(restaurant, "Medu Vada", 60_00);
        let order = past_order(user, &[&dosa, &vada]);

        let resolver = ReorderResolver::new(
            Arc::new(menu_with(vec![dosa.clone(), vada.clone()])),
            Arc::new(carts_accepting(user, vec![dosa.clone(), vada.clone()])),
            Arc::new(orders_with(order.clone())),
        );

        let cart = resolver
            .reorder_from(user, order.uuid, Timestamp::now())
            .await?;

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.restaurant_uuid, restaurant);
        assert_eq!(cart.subtotal, 360_00);

        Ok(())
    }

    #[tokio::test]
    async fn reorder_drops_unavailable_deleted_and_moved_items() -> TestResult {
        let user = UserUuid::new();
        let restaurant = RestaurantUuid::new();
        let dosa = fixtures::menu_item(restaurant, "Masala Dosa", 120_00);
        let vada = fixtures::menu_item(restaurant, "Medu Vada", 60_00);
        let idli = fixtures::menu_item(restaurant, "Idli", 40_00);
        let pongal = fixtures::menu_item(restaurant, "Pongal", 80_00);
        let order = past_order(user, &[&dosa, &vada, &idli, &pongal]);

        let sold_out_vada = MenuItemRecord {
            is_available: false,
            ..vada
        };
        let moved_pongal = MenuItemRecord {
            restaurant_uuid: RestaurantUuid::new(),
            ..pongal
        };

        let mut carts = MockCartsService::new();
        let kept = dosa.uuid;
        let in_cart = dosa.clone();

        carts
            .expect_replace_carts()
            .withf(move |_, given_restaurant, lines, _| {
                *given_restaurant == restaurant
                    && lines.len() == 1
                    && lines
                        .first()
                        .is_some_and(|line| line.menu_item == kept && line.quantity == 2)
            })
            .times(1)
            .returning(move |_, _, _, _| Ok(fixtures::cart(user, &[(&in_cart, 2)])));

        let resolver = ReorderResolver::new(
            Arc::new(menu_with(vec![dosa, sold_out_vada, moved_pongal])),
            Arc::new(carts),
            Arc::new(orders_with(order.clone())),
        );

        // idli is missing from the menu, so only the dosa survives.
        let cart = resolver
            .reorder_from(user, order.uuid, Timestamp::now())
            .await?;

        assert_eq!(cart.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn reorder_with_nothing_orderable_leaves_carts_alone() {
        let user = UserUuid::new();
        let restaurant = RestaurantUuid::new();
        let dosa = fixtures::menu_item(restaurant, "Masala Dosa", 120_00);
        let order = past_order(user, &[&dosa]);

        let resolver = ReorderResolver::new(
            Arc::new(menu_with(Vec::new())),
            Arc::new(MockCartsService::new()),
            Arc::new(orders_with(order.clone())),
        );

        let result = resolver
            .reorder_from(user, order.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(ReorderError::EmptyReorder)),
            "expected EmptyReorder, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reorder_emptied_by_withdrawn_item_is_empty_reorder() {
        let user = UserUuid::new();
        let restaurant = RestaurantUuid::new();
        let dosa = fixtures::menu_item(restaurant, "Masala Dosa", 120_00);
        let order = past_order(user, &[&dosa]);

        let mut carts = MockCartsService::new();

        carts
            .expect_replace_carts()
            .times(1)
            .returning(|_, _, _, _| Err(CartsServiceError::EmptyCart));

        let resolver = ReorderResolver::new(
            Arc::new(menu_with(vec![dosa])),
            Arc::new(carts),
            Arc::new(orders_with(order.clone())),
        );

        let result = resolver
            .reorder_from(user, order.uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(ReorderError::EmptyReorder)),
            "expected EmptyReorder, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reorder_of_unknown_order_is_not_found() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .returning(|_, _| Err(OrdersServiceError::NotFound));

        let resolver = ReorderResolver::new(
            Arc::new(MockMenuService::new()),
            Arc::new(MockCartsService::new()),
            Arc::new(orders),
        );

        let result = resolver
            .reorder_from(UserUuid::new(), OrderUuid::new(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(ReorderError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn repeated_lines_are_merged() -> TestResult {
        let user = UserUuid::new();
        let restaurant = RestaurantUuid::new();
        let dosa = fixtures::menu_item(restaurant, "Masala Dosa", 120_00);
        let order = past_order(user, &[&dosa, &dosa]);

        let mut menu = MockMenuService::new();
        let on_menu = dosa.clone();

        menu.expect_get_menu_item()
            .times(1)
            .returning(move |_| Ok(on_menu.clone()));

        let mut carts = MockCartsService::new();

        carts
            .expect_replace_carts()
            .withf(|_, _, lines, _| lines.len() == 1 && lines.iter().all(|line| line.quantity == 4))
            .times(1)
            .returning(move |_, _, _, _| Ok(fixtures::cart(user, &[(&dosa, 4)])));

        let resolver = ReorderResolver::new(
            Arc::new(menu),
            Arc::new(carts),
            Arc::new(orders_with(order.clone())),
        );

        let cart = resolver
            .reorder_from(user, order.uuid, Timestamp::now())
            .await?;

        assert_eq!(cart.subtotal, 480_00);

        Ok(())
    }
}
