//! Premium Subscriptions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    owners::Owner,
    premium::{
        data::NewPremiumSubscription,
        records::{PremiumPerks, PremiumSubscriptionRecord, PremiumSubscriptionUuid},
    },
};

const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");
const FIND_EFFECTIVE_SUBSCRIPTION_SQL: &str = include_str!("sql/find_effective_subscription.sql");
const COUNT_OVERLAPPING_SUBSCRIPTIONS_SQL: &str =
    include_str!("sql/count_overlapping_subscriptions.sql");
const CANCEL_SUBSCRIPTION_SQL: &str = include_str!("sql/cancel_subscription.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPremiumRepository;

impl PgPremiumRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: &NewPremiumSubscription,
    ) -> Result<PremiumSubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, PremiumSubscriptionRecord>(CREATE_SUBSCRIPTION_SQL)
            .bind(subscription.uuid.into_uuid())
            .bind(subscription.subscriber.kind())
            .bind(subscription.subscriber.uuid())
            .bind(&subscription.plan_name)
            .bind(SqlxTimestamp::from(subscription.start_date))
            .bind(SqlxTimestamp::from(subscription.end_date))
            .bind(subscription.perks.free_delivery)
            .bind(subscription.perks.extra_discount_percent)
            .bind(subscription.perks.cashback_percent)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_effective_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscriber: Owner,
        at: Timestamp,
    ) -> Result<Option<PremiumSubscriptionRecord>, sqlx::Error> {
        query_as::<Postgres, PremiumSubscriptionRecord>(FIND_EFFECTIVE_SUBSCRIPTION_SQL)
            .bind(subscriber.kind())
            .bind(subscriber.uuid())
            .bind(SqlxTimestamp::from(at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_overlapping_subscriptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscriber: Owner,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_OVERLAPPING_SUBSCRIPTIONS_SQL)
            .bind(subscriber.kind())
            .bind(subscriber.uuid())
            .bind(SqlxTimestamp::from(start_date))
            .bind(SqlxTimestamp::from(end_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn cancel_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: PremiumSubscriptionUuid,
    ) -> Result<PremiumSubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, PremiumSubscriptionRecord>(CANCEL_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PremiumSubscriptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let subscriber_kind: String = row.try_get("subscriber_kind")?;

        let subscriber = Owner::from_parts(&subscriber_kind, row.try_get("subscriber_uuid")?)
            .ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "subscriber_kind".to_string(),
                source: format!("unknown subscriber kind: {subscriber_kind}").into(),
            })?;

        Ok(Self {
            uuid: PremiumSubscriptionUuid::from_uuid(row.try_get("uuid")?),
            subscriber,
            plan_name: row.try_get("plan_name")?,
            start_date: row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxTimestamp, _>("end_date")?.to_jiff(),
            is_active: row.try_get("is_active")?,
            perks: PremiumPerks {
                free_delivery: row.try_get("free_delivery")?,
                extra_discount_percent: row.try_get("extra_discount_percent")?,
                cashback_percent: row.try_get("cashback_percent")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
