//! Checkout Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::domain::{
    addresses::{AddressesService, AddressesServiceError, records::AddressUuid},
    carts::{CartsService, data::MAX_NOTE_CHARS},
    checkout::{
        data::{CheckoutItem, CheckoutRequest, CheckoutStage},
        errors::CheckoutError,
        totals::{claims_match, order_amounts},
    },
    menu::{MenuService, MenuServiceError, records::MenuItemRecord},
    orders::{
        OrdersService,
        data::{NewOrder, NewOrderLine},
        records::{AddressSnapshot, OrderRecord, OrderUuid},
    },
    owners::{Owner, RestaurantUuid, UserUuid},
    payments::{GatewayOrder, PaymentGateway, SignatureVerifier},
    premium::{PremiumService, PricedLine, compute_benefits, subtotal_of},
};

/// Checks a payment confirmation against trusted state and records the order.
pub struct CheckoutCoordinator {
    verifier: SignatureVerifier,
    gateway: Arc<dyn PaymentGateway>,
    menu: Arc<dyn MenuService>,
    addresses: Arc<dyn AddressesService>,
    premium: Arc<dyn PremiumService>,
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
}

impl CheckoutCoordinator {
    #[must_use]
    pub fn new(
        verifier: SignatureVerifier,
        gateway: Arc<dyn PaymentGateway>,
        menu: Arc<dyn MenuService>,
        addresses: Arc<dyn AddressesService>,
        premium: Arc<dyn PremiumService>,
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            verifier,
            gateway,
            menu,
            addresses,
            premium,
            carts,
            orders,
        }
    }

    fn validate(items: &[CheckoutItem]) -> Result<(), CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        for item in items {
            if item.quantity < 1 {
                return Err(CheckoutError::InvalidQuantity);
            }

            if item
                .note
                .as_deref()
                .is_some_and(|note| note.chars().count() > MAX_NOTE_CHARS)
            {
                return Err(CheckoutError::NoteTooLong);
            }
        }

        Ok(())
    }

    /// Build order lines from the menu, ignoring whatever the client believed the prices were.
    async fn reprice(
        &self,
        restaurant: RestaurantUuid,
        items: &[CheckoutItem],
    ) -> Result<Vec<NewOrderLine>, CheckoutError> {
        let mut menu_items: FxHashMap<_, MenuItemRecord> = FxHashMap::default();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let record = if let Some(record) = menu_items.get(&item.menu_item) {
                record.clone()
            } else {
                let record = match self.menu.get_menu_item(item.menu_item).await {
                    Ok(record) if record.restaurant_uuid == restaurant => record,
                    Ok(_) | Err(MenuServiceError::NotFound) => {
                        return Err(CheckoutError::MenuItemNotFound(item.menu_item));
                    }
                    Err(error) => return Err(CheckoutError::Menu(error)),
                };

                menu_items.insert(item.menu_item, record.clone());

                record
            };

            lines.push(NewOrderLine {
                menu_item: record.uuid,
                name: record.name,
                price: record.price,
                quantity: item.quantity,
                note: item.note.clone(),
            });
        }

        Ok(lines)
    }

    async fn resolve_address(
        &self,
        customer: UserUuid,
        address: AddressUuid,
    ) -> Result<AddressSnapshot, CheckoutError> {
        match self.addresses.get_address(address).await {
            Ok(record) if record.owner == Owner::User(customer) => {
                Ok(AddressSnapshot::from(&record))
            }
            Ok(_) | Err(AddressesServiceError::NotFound) => {
                Err(CheckoutError::AddressNotFound(address))
            }
            Err(error) => Err(CheckoutError::Addresses(error)),
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutCoordinator {
    #[tracing::instrument(
        name = "checkout.create_payment_order",
        skip(self),
        fields(user_uuid = %user, restaurant_uuid = %restaurant),
        err
    )]
    async fn create_payment_order(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        at: Timestamp,
    ) -> Result<GatewayOrder, CheckoutError> {
        let cart = self
            .carts
            .get_cart(user, restaurant, at)
            .await?
            .ok_or(CheckoutError::CartNotFound)?;

        let amounts = order_amounts(cart.subtotal, &cart.premium_summary)
            .ok_or(CheckoutError::AmountOverflow)?;

        let order = self
            .gateway
            .create_order(amounts.total_amount, &cart.uuid.to_string())
            .await?;

        info!(
            gateway_order_id = %order.id,
            amount = order.amount,
            "created gateway order"
        );

        Ok(order)
    }

    #[tracing::instrument(
        name = "checkout.checkout",
        skip(self, request),
        fields(
            user_uuid = %request.customer,
            restaurant_uuid = %request.restaurant,
            gateway_order_id = %request.payment.gateway_order_id,
        ),
        err
    )]
    async fn checkout(&self, request: CheckoutRequest) -> Result<OrderRecord, CheckoutError> {
        debug!(stage = %CheckoutStage::Received, "checkout stage");

        Self::validate(&request.items)?;

        if let Err(error) = self.verifier.verify(
            &request.payment.gateway_order_id,
            &request.payment.gateway_payment_id,
            &request.payment.gateway_signature,
        ) {
            warn!(
                target: "tiffin::payments",
                gateway_order_id = %request.payment.gateway_order_id,
                gateway_payment_id = %request.payment.gateway_payment_id,
                %error,
                "rejected payment signature"
            );

            return Err(error.into());
        }

        debug!(stage = %CheckoutStage::SignatureVerified, "checkout stage");

        let lines = self.reprice(request.restaurant, &request.items).await?;

        debug!(stage = %CheckoutStage::Repriced, lines = lines.len(), "checkout stage");

        let address = self
            .resolve_address(request.customer, request.address)
            .await?;

        debug!(stage = %CheckoutStage::AddressResolved, "checkout stage");

        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|line| PricedLine {
                price: line.price,
                quantity: line.quantity,
            })
            .collect();

        let subtotal = subtotal_of(&priced).ok_or(CheckoutError::AmountOverflow)?;

        let plan = self
            .premium
            .effective_plan(Owner::User(request.customer), request.at)
            .await?;

        let benefits = compute_benefits(&priced, plan.as_ref(), request.at);
        let amounts = order_amounts(subtotal, &benefits).ok_or(CheckoutError::AmountOverflow)?;

        if !claims_match(&request.claimed, &amounts) {
            warn!(
                claimed_total = request.claimed.total_amount,
                computed_total = amounts.total_amount,
                "submitted totals do not match"
            );

            return Err(CheckoutError::TotalsMismatch);
        }

        let order = self
            .orders
            .place_order(NewOrder {
                uuid: OrderUuid::new(),
                customer: request.customer,
                restaurant: request.restaurant,
                lines,
                address,
                amounts,
                payment: request.payment,
                offer_id: request.offer_id,
            })
            .await?;

        // Order insert and cart deletion share one transaction.
        for stage in CheckoutStage::COMMITTED {
            debug!(stage = %stage, order_uuid = %order.uuid, "checkout stage");
        }

        info!(
            order_uuid = %order.uuid,
            total_amount = order.amounts.total_amount,
            "checked out"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Create a gateway order for the server-computed total of the user's cart.
    async fn create_payment_order(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        at: Timestamp,
    ) -> Result<GatewayOrder, CheckoutError>;

    /// Verify a payment, re-price the submitted lines and record the order.
    ///
    /// The order and the retirement of the customer's cart are committed together.
    async fn checkout(&self, request: CheckoutRequest) -> Result<OrderRecord, CheckoutError>;
}
