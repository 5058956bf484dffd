//! Menu Data

use crate::domain::{menu::records::MenuItemUuid, owners::RestaurantUuid};

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub price: u64,
    pub is_available: bool,
}
