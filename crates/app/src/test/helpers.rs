//! Test Helpers

use crate::{
    domain::{
        carts::data::CartItemUpsert,
        checkout::totals::order_amounts,
        menu::{
            MenuService,
            data::NewMenuItem,
            records::{MenuItemRecord, MenuItemUuid},
        },
        orders::{
            data::{NewOrder, NewOrderLine},
            records::{AddressSnapshot, OrderUuid, PaymentReference},
        },
        owners::RestaurantUuid,
        premium::PremiumBenefits,
    },
    test::TestContext,
};

pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    name: &str,
    price: u64,
) -> MenuItemRecord {
    ctx.menu
        .create_menu_item(NewMenuItem {
            uuid: MenuItemUuid::new(),
            restaurant_uuid: restaurant,
            name: name.to_string(),
            price,
            is_available: true,
        })
        .await
        .expect("Failed to create test menu item")
}

/// Upsert of `quantity` × `item` into the context user's cart for the item's restaurant.
pub(crate) fn add_item(ctx: &TestContext, item: &MenuItemRecord, quantity: u32) -> CartItemUpsert {
    CartItemUpsert {
        user: ctx.user,
        restaurant: item.restaurant_uuid,
        menu_item: item.uuid,
        quantity,
        note: None,
        clear_other_carts: false,
        apply_premium: true,
    }
}

/// A paid order for `quantity` × `item`, priced without premium benefits.
pub(crate) fn new_order(
    ctx: &TestContext,
    item: &MenuItemRecord,
    quantity: u32,
    gateway_order_id: &str,
) -> NewOrder {
    let subtotal = item.price * u64::from(quantity);

    NewOrder {
        uuid: OrderUuid::new(),
        customer: ctx.user,
        restaurant: item.restaurant_uuid,
        lines: vec![NewOrderLine {
            menu_item: item.uuid,
            name: item.name.clone(),
            price: item.price,
            quantity,
            note: None,
        }],
        address: home_address(),
        amounts: order_amounts(subtotal, &PremiumBenefits::default())
            .expect("test order amounts should fit"),
        payment: PaymentReference {
            gateway_order_id: gateway_order_id.to_string(),
            gateway_payment_id: format!("pay_{gateway_order_id}"),
            gateway_signature: "0".repeat(64),
        },
        offer_id: None,
    }
}

pub(crate) fn home_address() -> AddressSnapshot {
    AddressSnapshot {
        label: "Home".to_string(),
        address_line: "12 MG Road".to_string(),
        landmark: Some("Near Metro".to_string()),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
    }
}
