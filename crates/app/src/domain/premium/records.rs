//! Premium Subscription Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::owners::Owner, uuids::TypedUuid};

/// Premium Subscription UUID
pub type PremiumSubscriptionUuid = TypedUuid<PremiumSubscriptionRecord>;

/// Perks granted by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PremiumPerks {
    pub free_delivery: bool,
    pub extra_discount_percent: Decimal,
    pub cashback_percent: Decimal,
}

impl PremiumPerks {
    /// Both percentages lie within `0..=100`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let range = Decimal::ZERO..=Decimal::ONE_HUNDRED;

        range.contains(&self.extra_discount_percent) && range.contains(&self.cashback_percent)
    }
}

/// Premium Subscription Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumSubscriptionRecord {
    pub uuid: PremiumSubscriptionUuid,
    pub subscriber: Owner,
    pub plan_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_active: bool,
    pub perks: PremiumPerks,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PremiumSubscriptionRecord {
    /// Active and `at` falls inside the validity window, both ends inclusive.
    #[must_use]
    pub fn is_effective_at(&self, at: Timestamp) -> bool {
        self.is_active && self.start_date <= at && at <= self.end_date
    }
}
