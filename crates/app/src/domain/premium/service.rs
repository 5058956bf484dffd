//! Premium subscriptions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        owners::Owner,
        premium::{
            data::NewPremiumSubscription,
            errors::PremiumServiceError,
            records::{PremiumSubscriptionRecord, PremiumSubscriptionUuid},
            repository::PgPremiumRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPremiumService {
    db: Db,
    repository: PgPremiumRepository,
}

impl PgPremiumService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPremiumRepository::new(),
        }
    }
}

#[async_trait]
impl PremiumService for PgPremiumService {
    async fn subscribe(
        &self,
        subscription: NewPremiumSubscription,
    ) -> Result<PremiumSubscriptionRecord, PremiumServiceError> {
        if !subscription.perks.is_valid() {
            return Err(PremiumServiceError::InvalidPerks);
        }

        if subscription.end_date < subscription.start_date {
            return Err(PremiumServiceError::InvalidWindow);
        }

        let mut tx = self
            .db
            .begin_owner_transaction(subscription.subscriber.uuid())
            .await?;

        let overlapping = self
            .repository
            .count_overlapping_subscriptions(
                &mut tx,
                subscription.subscriber,
                subscription.start_date,
                subscription.end_date,
            )
            .await?;

        if overlapping > 0 {
            return Err(PremiumServiceError::AlreadySubscribed);
        }

        let created = self
            .repository
            .create_subscription(&mut tx, &subscription)
            .await?;

        tx.commit().await?;

        info!(
            subscription = %created.uuid,
            subscriber_kind = created.subscriber.kind(),
            subscriber = %created.subscriber.uuid(),
            "premium subscription created"
        );

        Ok(created)
    }

    async fn effective_plan(
        &self,
        subscriber: Owner,
        at: Timestamp,
    ) -> Result<Option<PremiumSubscriptionRecord>, PremiumServiceError> {
        let mut tx = self.db.begin().await?;

        let plan = self
            .repository
            .find_effective_subscription(&mut tx, subscriber, at)
            .await?;

        tx.commit().await?;

        Ok(plan)
    }

    async fn cancel(
        &self,
        subscription: PremiumSubscriptionUuid,
    ) -> Result<PremiumSubscriptionRecord, PremiumServiceError> {
        let mut tx = self.db.begin().await?;

        let cancelled = self
            .repository
            .cancel_subscription(&mut tx, subscription)
            .await?;

        tx.commit().await?;

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
pub trait PremiumService: Send + Sync {
    /// Start a plan for a subscriber. Fails if another active plan overlaps its window.
    async fn subscribe(
        &self,
        subscription: NewPremiumSubscription,
    ) -> Result<PremiumSubscriptionRecord, PremiumServiceError>;

    /// The plan in effect for `subscriber` at `at`, if any.
    async fn effective_plan(
        &self,
        subscriber: Owner,
        at: Timestamp,
    ) -> Result<Option<PremiumSubscriptionRecord>, PremiumServiceError>;

    /// Deactivate a plan. Cancelling an inactive plan is a no-op.
    async fn cancel(
        &self,
        subscription: PremiumSubscriptionUuid,
    ) -> Result<PremiumSubscriptionRecord, PremiumServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{domain::premium::records::PremiumPerks, test::TestContext};

    use super::*;

    const DAY: SignedDuration = SignedDuration::from_hours(24);

    fn gold(subscriber: Owner, start_date: Timestamp, end_date: Timestamp) -> NewPremiumSubscription {
        NewPremiumSubscription {
            uuid: PremiumSubscriptionUuid::new(),
            subscriber,
            plan_name: "Gold".to_string(),
            start_date,
            end_date,
            perks: PremiumPerks {
                free_delivery: true,
                extra_discount_percent: Decimal::new(10, 0),
                cashback_percent: Decimal::new(25, 1),
            },
        }
    }

    #[tokio::test]
    async fn subscribe_then_effective_plan_returns_it() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let subscriber = Owner::User(ctx.user);

        let created = ctx
            .premium
            .subscribe(gold(subscriber, now - DAY, now + DAY))
            .await?;

        let plan = ctx.premium.effective_plan(subscriber, now).await?;

        assert_eq!(plan.as_ref().map(|plan| plan.uuid), Some(created.uuid));
        assert_eq!(created.perks.cashback_percent, Decimal::new(25, 1));
        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn effective_plan_ignores_expired_and_future_plans() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let subscriber = Owner::User(ctx.user);

        ctx.premium
            .subscribe(gold(subscriber, now - DAY * 10, now - DAY * 5))
            .await?;
        ctx.premium
            .subscribe(gold(subscriber, now + DAY * 5, now + DAY * 10))
            .await?;

        assert!(ctx.premium.effective_plan(subscriber, now).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_subscription_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let subscriber = Owner::User(ctx.user);

        ctx.premium
            .subscribe(gold(subscriber, now - DAY, now + DAY * 30))
            .await?;

        let result = ctx
            .premium
            .subscribe(gold(subscriber, now + DAY, now + DAY * 60))
            .await;

        assert!(
            matches!(result, Err(PremiumServiceError::AlreadySubscribed)),
            "expected AlreadySubscribed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_and_user_plans_are_independent() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        ctx.premium
            .subscribe(gold(Owner::User(ctx.user), now - DAY, now + DAY))
            .await?;
        ctx.premium
            .subscribe(gold(Owner::Restaurant(ctx.restaurant), now - DAY, now + DAY))
            .await?;

        assert!(
            ctx.premium
                .effective_plan(Owner::Restaurant(ctx.restaurant), now)
                .await?
                .is_some()
        );

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_perks_are_rejected() {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let mut subscription = gold(Owner::User(ctx.user), now, now + DAY);
        subscription.perks.extra_discount_percent = Decimal::new(120, 0);

        let result = ctx.premium.subscribe(subscription).await;

        assert!(
            matches!(result, Err(PremiumServiceError::InvalidPerks)),
            "expected InvalidPerks, got {result:?}"
        );
    }

    #[tokio::test]
    async fn negative_perks_are_rejected() {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let mut subscription = gold(Owner::User(ctx.user), now, now + DAY);
        subscription.perks.cashback_percent = Decimal::new(-1, 0);

        let result = ctx.premium.subscribe(subscription).await;

        assert!(
            matches!(result, Err(PremiumServiceError::InvalidPerks)),
            "expected InvalidPerks, got {result:?}"
        );
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let result = ctx
            .premium
            .subscribe(gold(Owner::User(ctx.user), now, now - DAY))
            .await;

        assert!(
            matches!(result, Err(PremiumServiceError::InvalidWindow)),
            "expected InvalidWindow, got {result:?}"
        );
    }

    #[tokio::test]
    async fn cancelled_plan_is_no_longer_effective() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let subscriber = Owner::User(ctx.user);

        let created = ctx
            .premium
            .subscribe(gold(subscriber, now - DAY, now + DAY))
            .await?;

        let cancelled = ctx.premium.cancel(created.uuid).await?;

        assert!(!cancelled.is_active);
        assert!(ctx.premium.effective_plan(subscriber, now).await?.is_none());

        // A replacement plan may now be started for the same window.
        ctx.premium
            .subscribe(gold(subscriber, now - DAY, now + DAY))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn cancel_unknown_subscription_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.premium.cancel(PremiumSubscriptionUuid::new()).await;

        assert!(
            matches!(result, Err(PremiumServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
