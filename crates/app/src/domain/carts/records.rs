//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        menu::records::MenuItemUuid,
        owners::{RestaurantUuid, UserUuid},
        premium::{PremiumBenefits, PricedLine},
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// `subtotal` and `premium_summary` are derived when the cart is read and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub lines: Vec<CartLineRecord>,
    pub subtotal: u64,
    pub premium_summary: PremiumBenefits,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.lines.iter().map(CartLineRecord::priced).collect()
    }
}

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Cart Line Record
///
/// `name`, `price` and `is_available` come from the live menu at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub name: String,
    pub price: u64,
    pub is_available: bool,
    pub quantity: u32,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLineRecord {
    #[must_use]
    pub fn priced(&self) -> PricedLine {
        PricedLine {
            price: self.price,
            quantity: self.quantity,
        }
    }
}
