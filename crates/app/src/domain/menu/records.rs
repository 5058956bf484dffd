//! Menu Records

use jiff::Timestamp;

use crate::{domain::owners::RestaurantUuid, uuids::TypedUuid};

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub price: u64,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl MenuItemRecord {
    /// Whether the item can currently be put in a cart for `restaurant`.
    #[must_use]
    pub fn is_orderable_from(&self, restaurant: RestaurantUuid) -> bool {
        self.restaurant_uuid == restaurant && self.is_available && self.deleted_at.is_none()
    }
}
