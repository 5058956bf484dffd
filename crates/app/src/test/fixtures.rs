//! In-memory records for tests that run against mocked services.

use jiff::Timestamp;

use crate::domain::{
    addresses::records::{AddressRecord, AddressUuid},
    carts::records::{CartLineRecord, CartLineUuid, CartRecord, CartUuid},
    menu::records::{MenuItemRecord, MenuItemUuid},
    orders::{
        data::NewOrder,
        records::{
            DeliveryDetails, OrderLineRecord, OrderLineUuid, OrderRecord, OrderStatus,
            PaymentStatus,
        },
    },
    owners::{Owner, RestaurantUuid, UserUuid},
    premium::{PremiumBenefits, subtotal_of},
};

pub(crate) fn menu_item(restaurant: RestaurantUuid, name: &str, price: u64) -> MenuItemRecord {
    let now = Timestamp::now();

    MenuItemRecord {
        uuid: MenuItemUuid::new(),
        restaurant_uuid: restaurant,
        name: name.to_string(),
        price,
        is_available: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub(crate) fn address(owner: Owner) -> AddressRecord {
    let now = Timestamp::now();

    AddressRecord {
        uuid: AddressUuid::new(),
        owner,
        label: "Home".to_string(),
        address_line: "12 MG Road".to_string(),
        landmark: None,
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// A cart holding `(item, quantity)` lines, without premium benefits.
pub(crate) fn cart(user: UserUuid, lines: &[(&MenuItemRecord, u32)]) -> CartRecord {
    let now = Timestamp::now();
    let restaurant = lines
        .first()
        .map_or_else(RestaurantUuid::new, |(item, _)| item.restaurant_uuid);

    let lines: Vec<CartLineRecord> = lines
        .iter()
        .map(|(item, quantity)| CartLineRecord {
            uuid: CartLineUuid::new(),
            menu_item_uuid: item.uuid,
            name: item.name.clone(),
            price: item.price,
            is_available: item.is_available,
            quantity: *quantity,
            note: None,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let mut cart = CartRecord {
        uuid: CartUuid::new(),
        user_uuid: user,
        restaurant_uuid: restaurant,
        lines,
        subtotal: 0,
        premium_summary: PremiumBenefits::default(),
        created_at: now,
        updated_at: now,
    };

    cart.subtotal = subtotal_of(&cart.priced_lines()).unwrap_or_default();

    cart
}

/// The record the store would return after placing `order`.
pub(crate) fn placed(order: NewOrder) -> OrderRecord {
    let now = Timestamp::now();

    OrderRecord {
        uuid: order.uuid,
        customer_uuid: order.customer,
        restaurant_uuid: order.restaurant,
        order_status: OrderStatus::Placed,
        payment_status: PaymentStatus::Paid,
        delivery: DeliveryDetails::default(),
        address: order.address,
        amounts: order.amounts,
        payment: order.payment,
        offer_id: order.offer_id,
        lines: order
            .lines
            .into_iter()
            .map(|line| OrderLineRecord {
                uuid: OrderLineUuid::new(),
                menu_item_uuid: line.menu_item,
                name: line.name,
                price: line.price,
                quantity: line.quantity,
                note: line.note,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}
