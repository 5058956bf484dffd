//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use tiffin_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        addresses::MockAddressesService,
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartLineUuid, CartRecord, CartUuid},
        },
        checkout::MockCheckoutService,
        menu::{MockMenuService, records::MenuItemUuid},
        orders::{
            MockOrdersService,
            records::{
                AddressSnapshot, DeliveryDetails, OrderAmounts, OrderLineRecord, OrderLineUuid,
                OrderRecord, OrderStatus, OrderUuid, PaymentReference, PaymentStatus,
            },
        },
        owners::{RestaurantUuid, UserUuid},
        premium::{MockPremiumService, PremiumBenefits},
        reorders::MockReorderService,
    },
    health::MockHealthService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Services a handler test does not configure panic if they are called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: Option<MockAuthService>,
    pub(crate) carts: Option<MockCartsService>,
    pub(crate) checkout: Option<MockCheckoutService>,
    pub(crate) orders: Option<MockOrdersService>,
    pub(crate) reorders: Option<MockReorderService>,
    pub(crate) health: Option<MockHealthService>,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth.unwrap_or_else(strict_auth_mock)),
            menu: Arc::new(strict_menu_mock()),
            addresses: Arc::new(strict_addresses_mock()),
            premium: Arc::new(strict_premium_mock()),
            carts: Arc::new(self.carts.unwrap_or_else(strict_carts_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
            checkout: Arc::new(self.checkout.unwrap_or_else(strict_checkout_mock)),
            reorders: Arc::new(self.reorders.unwrap_or_else(strict_reorders_mock)),
            health: Arc::new(self.health.unwrap_or_else(strict_health_mock)),
        })
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_menu_mock() -> MockMenuService {
    let mut menu = MockMenuService::new();

    menu.expect_get_menu_item().never();
    menu.expect_create_menu_item().never();
    menu.expect_set_availability().never();
    menu.expect_delete_menu_item().never();

    menu
}

fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_get_address().never();
    addresses.expect_create_address().never();

    addresses
}

fn strict_premium_mock() -> MockPremiumService {
    let mut premium = MockPremiumService::new();

    premium.expect_subscribe().never();
    premium.expect_effective_plan().never();
    premium.expect_cancel().never();

    premium
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_upsert_item().never();
    carts.expect_get_cart().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_get_active_cart().never();
    carts.expect_replace_carts().never();

    carts
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();

    orders
}

pub(crate) fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_create_payment_order().never();
    checkout.expect_checkout().never();

    checkout
}

pub(crate) fn strict_reorders_mock() -> MockReorderService {
    let mut reorders = MockReorderService::new();

    reorders.expect_reorder_from().never();

    reorders
}

fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_database().never();

    health
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth: Some(auth),
        ..Mocks::default()
    }
    .into_state()
}

/// A service that behaves as if [`TEST_USER_UUID`] is signed in.
pub(crate) fn authenticated_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authenticated_service(
        Mocks {
            carts: Some(carts),
            ..Mocks::default()
        },
        route,
    )
}

pub(crate) fn make_cart(restaurant: RestaurantUuid, menu_item: MenuItemUuid) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user_uuid: TEST_USER_UUID,
        restaurant_uuid: restaurant,
        lines: vec![CartLineRecord {
            uuid: CartLineUuid::new(),
            menu_item_uuid: menu_item,
            name: "Masala Dosa".to_string(),
            price: 120_00,
            is_available: true,
            quantity: 2,
            note: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        subtotal: 240_00,
        premium_summary: PremiumBenefits::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, restaurant: RestaurantUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        customer_uuid: TEST_USER_UUID,
        restaurant_uuid: restaurant,
        order_status: OrderStatus::Placed,
        payment_status: PaymentStatus::Paid,
        delivery: DeliveryDetails::default(),
        address: AddressSnapshot {
            label: "Home".to_string(),
            address_line: "12 MG Road".to_string(),
            landmark: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        },
        amounts: OrderAmounts {
            subtotal: 240_00,
            tax: 12_00,
            delivery_fee: 40_00,
            discount: 0,
            cashback: 0,
            total_amount: 292_00,
        },
        payment: PaymentReference {
            gateway_order_id: "order_1".to_string(),
            gateway_payment_id: "pay_1".to_string(),
            gateway_signature: "0".repeat(64),
        },
        offer_id: None,
        lines: vec![OrderLineRecord {
            uuid: OrderLineUuid::new(),
            menu_item_uuid: MenuItemUuid::new(),
            name: "Masala Dosa".to_string(),
            price: 120_00,
            quantity: 2,
            note: None,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
