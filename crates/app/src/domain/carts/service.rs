//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpsert, NewCartLine, validate_line},
            errors::CartsServiceError,
            records::CartRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        menu::{records::MenuItemUuid, repository::PgMenuRepository},
        owners::{Owner, RestaurantUuid, UserUuid},
        premium::{compute_benefits, repository::PgPremiumRepository, subtotal_of},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    menu_repository: PgMenuRepository,
    premium_repository: PgPremiumRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            menu_repository: PgMenuRepository::new(),
            premium_repository: PgPremiumRepository::new(),
        }
    }

    /// Load lines and derive the subtotal and, when asked, the premium summary.
    async fn hydrate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
        apply_premium: bool,
        at: Timestamp,
    ) -> Result<CartRecord, CartsServiceError> {
        cart.lines = self.items_repository.get_cart_lines(tx, cart.uuid).await?;

        let priced = cart.priced_lines();

        cart.subtotal = subtotal_of(&priced).ok_or(CartsServiceError::SubtotalOverflow)?;

        if apply_premium {
            let plan = self
                .premium_repository
                .find_effective_subscription(tx, Owner::User(cart.user_uuid), at)
                .await?;

            cart.premium_summary = compute_benefits(&priced, plan.as_ref(), at);
        }

        Ok(cart)
    }

    /// The item must be on `restaurant`'s menu and currently available.
    async fn check_orderable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        menu_item: MenuItemUuid,
    ) -> Result<(), CartsServiceError> {
        let item = self
            .menu_repository
            .find_menu_item(tx, menu_item)
            .await?
            .filter(|item| item.restaurant_uuid == restaurant)
            .ok_or(CartsServiceError::MenuItemNotFound(menu_item))?;

        if !item.is_available {
            return Err(CartsServiceError::MenuItemUnavailable(menu_item));
        }

        Ok(())
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn upsert_item(
        &self,
        upsert: CartItemUpsert,
        at: Timestamp,
    ) -> Result<CartRecord, CartsServiceError> {
        validate_line(upsert.quantity, upsert.note.as_deref())?;

        let mut tx = self
            .db
            .begin_owner_transaction(upsert.user.into_uuid())
            .await?;

        self.check_orderable(&mut tx, upsert.restaurant, upsert.menu_item)
            .await?;

        let other_carts = self
            .carts_repository
            .count_other_carts(&mut tx, upsert.user, upsert.restaurant)
            .await?;

        if other_carts > 0 {
            if !upsert.clear_other_carts {
                return Err(CartsServiceError::OtherRestaurantCart);
            }

            self.carts_repository
                .delete_other_carts(&mut tx, upsert.user, upsert.restaurant)
                .await?;
        }

        let cart = self
            .carts_repository
            .upsert_cart(&mut tx, upsert.user, upsert.restaurant)
            .await?;

        self.items_repository
            .upsert_cart_item(
                &mut tx,
                cart.uuid,
                upsert.menu_item,
                upsert.quantity,
                upsert.note.as_deref(),
            )
            .await?;

        let cart = self.hydrate(&mut tx, cart, upsert.apply_premium, at).await?;

        tx.commit().await?;

        info!(
            cart = %cart.uuid,
            menu_item = %upsert.menu_item,
            quantity = upsert.quantity,
            cleared_other_carts = other_carts > 0,
            "cart item upserted"
        );

        Ok(cart)
    }

    async fn get_cart(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = match self
            .carts_repository
            .get_cart(&mut tx, user, restaurant)
            .await?
        {
            Some(cart) => Some(self.hydrate(&mut tx, cart, true, at).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        menu_item: MenuItemUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin_owner_transaction(user.into_uuid()).await?;

        let cart = self
            .carts_repository
            .get_cart(&mut tx, user, restaurant)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let removed = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, menu_item)
            .await?;

        let cart = self.hydrate(&mut tx, cart, true, at).await?;

        if cart.lines.is_empty() {
            self.carts_repository
                .delete_cart(&mut tx, user, restaurant)
                .await?;

            tx.commit().await?;

            info!(cart = %cart.uuid, "last item removed, cart deleted");

            return Ok(None);
        }

        if removed > 0 {
            self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;
        }

        tx.commit().await?;

        Ok(Some(cart))
    }

    async fn clear_cart(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_owner_transaction(user.into_uuid()).await?;

        let rows_affected = self
            .carts_repository
            .delete_cart(&mut tx, user, restaurant)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_active_cart(
        &self,
        user: UserUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = match self.carts_repository.get_active_cart(&mut tx, user).await? {
            Some(cart) => Some(self.hydrate(&mut tx, cart, true, at).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(cart)
    }

    async fn replace_carts(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        lines: Vec<NewCartLine>,
        at: Timestamp,
    ) -> Result<CartRecord, CartsServiceError> {
        if lines.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        for line in &lines {
            validate_line(line.quantity, line.note.as_deref())?;
        }

        let mut tx = self.db.begin_owner_transaction(user.into_uuid()).await?;
        let mut orderable = Vec::with_capacity(lines.len());

        for line in lines {
            match self
                .check_orderable(&mut tx, restaurant, line.menu_item)
                .await
            {
                Ok(()) => orderable.push(line),
                Err(
                    CartsServiceError::MenuItemNotFound(menu_item)
                    | CartsServiceError::MenuItemUnavailable(menu_item),
                ) => {
                    debug!(menu_item_uuid = %menu_item, "dropping line that can no longer be ordered");
                }
                Err(error) => return Err(error),
            }
        }

        if orderable.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        let lines = orderable;

        self.carts_repository
            .delete_user_carts(&mut tx, user)
            .await?;

        let cart = self
            .carts_repository
            .upsert_cart(&mut tx, user, restaurant)
            .await?;

        for line in &lines {
            self.items_repository
                .upsert_cart_item(
                    &mut tx,
                    cart.uuid,
                    line.menu_item,
                    line.quantity,
                    line.note.as_deref(),
                )
                .await?;
        }

        let cart = self.hydrate(&mut tx, cart, true, at).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a menu item to the user's cart for a restaurant, or replace its quantity and note.
    async fn upsert_item(
        &self,
        upsert: CartItemUpsert,
        at: Timestamp,
    ) -> Result<CartRecord, CartsServiceError>;

    /// The user's cart for a restaurant with benefits evaluated at `at`.
    async fn get_cart(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError>;

    /// Remove a menu item. Returns `None` when that emptied (and so deleted) the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        menu_item: MenuItemUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError>;

    /// Delete the user's cart for a restaurant.
    async fn clear_cart(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
    ) -> Result<(), CartsServiceError>;

    /// The user's most recently updated non-empty cart.
    async fn get_active_cart(
        &self,
        user: UserUuid,
        at: Timestamp,
    ) -> Result<Option<CartRecord>, CartsServiceError>;

    /// Delete every cart of the user and start a new one for `restaurant` with `lines`.
    ///
    /// Lines that are no longer orderable from `restaurant` are dropped. Fails with
    /// [`CartsServiceError::EmptyCart`], leaving every cart in place, when none remain.
    async fn replace_carts(
        &self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        lines: Vec<NewCartLine>,
        at: Timestamp,
    ) -> Result<CartRecord, CartsServiceError>;
}
