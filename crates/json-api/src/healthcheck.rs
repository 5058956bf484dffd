//! Tiffin JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tiffin_app::health::DatabaseHealth;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when orders cannot be stored
    pub status: String,

    /// Whether the order database answered
    pub database: bool,

    /// Running build version
    pub version: String,
}

/// Healthcheck handler
///
/// Answers 503 while the database is unreachable so load balancers stop routing checkouts here.
/// The payment gateway is not contacted.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let database = state.app.health.database().await;

    let status = match database {
        DatabaseHealth::Reachable => "ok",
        DatabaseHealth::Unreachable => {
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            "degraded"
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        database: database == DatabaseHealth::Reachable,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use tiffin_app::health::MockHealthService;

    use crate::test_helpers::Mocks;

    use super::*;

    fn service(database: DatabaseHealth) -> Service {
        let mut health = MockHealthService::new();

        health
            .expect_database()
            .once()
            .return_once(move || database);

        let state = Mocks {
            health: Some(health),
            ..Mocks::default()
        }
        .into_state();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .push(Router::with_path("healthcheck").get(handler)),
        )
    }

    #[tokio::test]
    async fn healthcheck_reports_ok_and_version() -> TestResult {
        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service(DatabaseHealth::Reachable))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.status, "ok");
        assert!(response.database);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_database_is_503_degraded() -> TestResult {
        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service(DatabaseHealth::Unreachable))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(response.status, "degraded");
        assert!(!response.database);

        Ok(())
    }
}
