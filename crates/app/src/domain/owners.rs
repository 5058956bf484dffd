//! Users, restaurants, and polymorphic ownership.

use uuid::Uuid;

use crate::uuids::TypedUuid;

/// User Record
#[derive(Debug, Clone, Copy)]
pub struct UserRecord;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Restaurant Record
#[derive(Debug, Clone, Copy)]
pub struct RestaurantRecord;

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<RestaurantRecord>;

/// Something that can own an address or a premium subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    User(UserUuid),
    Restaurant(RestaurantUuid),
}

impl Owner {
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Restaurant(_) => "restaurant",
        }
    }

    #[must_use]
    pub const fn uuid(self) -> Uuid {
        match self {
            Self::User(uuid) => uuid.into_uuid(),
            Self::Restaurant(uuid) => uuid.into_uuid(),
        }
    }

    /// Rebuild an owner from its stored kind and uuid columns.
    #[must_use]
    pub fn from_parts(kind: &str, uuid: Uuid) -> Option<Self> {
        match kind {
            "user" => Some(Self::User(UserUuid::from_uuid(uuid))),
            "restaurant" => Some(Self::Restaurant(RestaurantUuid::from_uuid(uuid))),
            _ => None,
        }
    }
}

impl From<UserUuid> for Owner {
    fn from(value: UserUuid) -> Self {
        Self::User(value)
    }
}

impl From<RestaurantUuid> for Owner {
    fn from(value: RestaurantUuid) -> Self {
        Self::Restaurant(value)
    }
}
