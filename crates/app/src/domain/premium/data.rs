//! Premium Subscription Data

use jiff::Timestamp;

use crate::domain::{
    owners::Owner,
    premium::records::{PremiumPerks, PremiumSubscriptionUuid},
};

/// New Premium Subscription Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPremiumSubscription {
    pub uuid: PremiumSubscriptionUuid,
    pub subscriber: Owner,
    pub plan_name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub perks: PremiumPerks,
}
