//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        addresses::{AddressesService, PgAddressesService},
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutCoordinator, CheckoutService},
        menu::{MenuService, PgMenuService},
        orders::{OrdersService, PgOrdersService},
        payments::{RazorpayClient, RazorpayConfig, SignatureVerifier},
        premium::{PgPremiumService, PremiumService},
        reorders::{ReorderResolver, ReorderService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub menu: Arc<dyn MenuService>,
    pub addresses: Arc<dyn AddressesService>,
    pub premium: Arc<dyn PremiumService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub reorders: Arc<dyn ReorderService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL and gateway credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        razorpay: RazorpayConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let menu: Arc<dyn MenuService> = Arc::new(PgMenuService::new(db.clone()));
        let addresses: Arc<dyn AddressesService> = Arc::new(PgAddressesService::new(db.clone()));
        let premium: Arc<dyn PremiumService> = Arc::new(PgPremiumService::new(db.clone()));
        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db));

        let verifier = SignatureVerifier::new(&razorpay.key_secret);

        let checkout = CheckoutCoordinator::new(
            verifier,
            Arc::new(RazorpayClient::new(razorpay)),
            Arc::clone(&menu),
            Arc::clone(&addresses),
            Arc::clone(&premium),
            Arc::clone(&carts),
            Arc::clone(&orders),
        );

        let reorders = ReorderResolver::new(Arc::clone(&menu), Arc::clone(&carts), Arc::clone(&orders));

        Ok(Self {
            health: Arc::new(PgHealthService::new(pool.clone())),
            auth: Arc::new(PgAuthService::new(pool)),
            checkout: Arc::new(checkout),
            reorders: Arc::new(reorders),
            menu,
            addresses,
            premium,
            carts,
            orders,
        })
    }
}
