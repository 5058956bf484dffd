//! Menu service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::menu::{
        data::NewMenuItem,
        errors::MenuServiceError,
        records::{MenuItemRecord, MenuItemUuid},
        repository::PgMenuRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMenuService {
    db: Db,
    repository: PgMenuRepository,
}

impl PgMenuService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuRepository::new(),
        }
    }
}

#[async_trait]
impl MenuService for PgMenuService {
    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .find_menu_item(&mut tx, item)
            .await?
            .ok_or(MenuServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_menu_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn set_availability(
        &self,
        item: MenuItemUuid,
        is_available: bool,
    ) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_availability(&mut tx, item, is_available)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(MenuServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Current name, price and availability of a menu item. Deleted items are not found.
    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError>;

    /// Adds an item to a restaurant's menu.
    async fn create_menu_item(&self, item: NewMenuItem)
    -> Result<MenuItemRecord, MenuServiceError>;

    /// Marks an item as (un)available without removing it.
    async fn set_availability(
        &self,
        item: MenuItemUuid,
        is_available: bool,
    ) -> Result<MenuItemRecord, MenuServiceError>;

    /// Soft-deletes a menu item.
    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::owners::RestaurantUuid, test::TestContext};

    use super::*;

    fn biryani(restaurant: RestaurantUuid) -> NewMenuItem {
        NewMenuItem {
            uuid: MenuItemUuid::new(),
            restaurant_uuid: restaurant,
            name: "Chicken Biryani".to_string(),
            price: 250_00,
            is_available: true,
        }
    }

    #[tokio::test]
    async fn create_menu_item_returns_stored_values() -> TestResult {
        let ctx = TestContext::new().await;
        let new_item = biryani(ctx.restaurant);

        let item = ctx.menu.create_menu_item(new_item.clone()).await?;

        assert_eq!(item.uuid, new_item.uuid);
        assert_eq!(item.restaurant_uuid, ctx.restaurant);
        assert_eq!(item.name, "Chicken Biryani");
        assert_eq!(item.price, 250_00);
        assert!(item.is_available);
        assert!(item.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_menu_item_returns_created_item() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.menu.create_menu_item(biryani(ctx.restaurant)).await?;

        let item = ctx.menu.get_menu_item(created.uuid).await?;

        assert_eq!(item, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_menu_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.menu.get_menu_item(MenuItemUuid::new()).await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_menu_item_for_unknown_restaurant_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu
            .create_menu_item(biryani(RestaurantUuid::new()))
            .await;

        assert!(
            matches!(result, Err(MenuServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_menu_item_with_empty_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu
            .create_menu_item(NewMenuItem {
                name: String::new(),
                ..biryani(ctx.restaurant)
            })
            .await;

        assert!(
            matches!(result, Err(MenuServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_availability_toggles_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.menu.create_menu_item(biryani(ctx.restaurant)).await?;

        let updated = ctx.menu.set_availability(created.uuid, false).await?;

        assert!(!updated.is_available);
        assert!(!updated.is_orderable_from(ctx.restaurant));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_menu_item_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.menu.create_menu_item(biryani(ctx.restaurant)).await?;

        ctx.menu.delete_menu_item(created.uuid).await?;

        let result = ctx.menu.get_menu_item(created.uuid).await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let result = ctx.menu.delete_menu_item(created.uuid).await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound on second deletion, got {result:?}"
        );

        Ok(())
    }
}
