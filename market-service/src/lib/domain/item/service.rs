use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::models::UserId;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::NewItem;
use crate::domain::item::models::UpdateItemCommand;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;

/// Domain service implementation for item operations.
pub struct ItemService<IR>
where
    IR: ItemRepository,
{
    repository: Arc<IR>,
}

impl<IR> ItemService<IR>
where
    IR: ItemRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> ItemServicePort for ItemService<IR>
where
    IR: ItemRepository,
{
    async fn find_all(&self) -> Result<Vec<Item>, ItemError> {
        self.repository.find_all().await
    }

    async fn find_by_id(&self, item_id: ItemId, user_id: UserId) -> Result<Item, ItemError> {
        self.repository
            .find_by_id(item_id, user_id)
            .await?
            .ok_or(ItemError::NotFound(item_id.to_string()))
    }

    async fn create(&self, command: CreateItemCommand, user_id: UserId) -> Result<Item, ItemError> {
        let item = NewItem {
            name: command.name,
            price: command.price,
            quantity: command.quantity,
            description: command.description,
            user_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(item).await?;

        tracing::info!(item_id = %created.id, user_id = %user_id, "Item created");
        Ok(created)
    }

    async fn update(
        &self,
        item_id: ItemId,
        user_id: UserId,
        command: UpdateItemCommand,
    ) -> Result<Item, ItemError> {
        let item = self.find_by_id(item_id, user_id).await?;

        self.repository.update(command.apply_to(item)).await
    }

    async fn delete(&self, item_id: ItemId, user_id: UserId) -> Result<(), ItemError> {
        self.repository.delete(item_id, user_id).await?;

        tracing::info!(item_id = %item_id, user_id = %user_id, "Item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::item::models::ItemName;
    use crate::domain::item::models::Price;

    mock! {
        pub TestItemRepository {}

        #[async_trait]
        impl ItemRepository for TestItemRepository {
            async fn find_all(&self) -> Result<Vec<Item>, ItemError>;
            async fn find_by_id(&self, id: ItemId, user_id: UserId) -> Result<Option<Item>, ItemError>;
            async fn create(&self, item: NewItem) -> Result<Item, ItemError>;
            async fn update(&self, item: Item) -> Result<Item, ItemError>;
            async fn delete(&self, id: ItemId, user_id: UserId) -> Result<(), ItemError>;
        }
    }

    fn item(id: i64, user_id: i64, name: &str) -> Item {
        Item {
            id: ItemId(id),
            name: ItemName::new(name.to_string()).unwrap(),
            price: Price::new(1000).unwrap(),
            quantity: 1,
            description: "description".to_string(),
            sold_out: false,
            user_id: UserId(user_id),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_all() {
        let mut repository = MockTestItemRepository::new();

        repository
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![item(1, 1, "item1"), item(2, 2, "item2")]));

        let service = ItemService::new(Arc::new(repository));

        let items = service.find_all().await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut repository = MockTestItemRepository::new();

        repository
            .expect_find_by_id()
            .withf(|id, user_id| *id == ItemId(9) && *user_id == UserId(1))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ItemService::new(Arc::new(repository));

        let result = service.find_by_id(ItemId(9), UserId(1)).await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_sets_owner_and_starts_in_stock() {
        let mut repository = MockTestItemRepository::new();

        repository
            .expect_create()
            .withf(|new_item| new_item.user_id == UserId(5) && new_item.name.as_str() == "Lamp")
            .times(1)
            .returning(|new_item| Ok(new_item.into_item(ItemId(1))));

        let service = ItemService::new(Arc::new(repository));

        let command = CreateItemCommand::new(
            ItemName::new("Lamp".to_string()).unwrap(),
            Price::new(2500).unwrap(),
            "brass".to_string(),
        );

        let created = service.create(command, UserId(5)).await.unwrap();
        assert_eq!(created.id, ItemId(1));
        assert_eq!(created.user_id, UserId(5));
        assert!(!created.sold_out);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let mut repository = MockTestItemRepository::new();
        let existing = item(3, 1, "Chair");

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|updated| {
                updated.name.as_str() == "Chair" && updated.price.value() == 500 && updated.sold_out
            })
            .times(1)
            .returning(Ok);

        let service = ItemService::new(Arc::new(repository));

        let command = UpdateItemCommand {
            price: Some(Price::new(500).unwrap()),
            sold_out: Some(true),
            ..UpdateItemCommand::default()
        };

        let updated = service.update(ItemId(3), UserId(1), command).await.unwrap();
        assert_eq!(updated.price.value(), 500);
        assert_eq!(updated.description, "description");
    }

    #[tokio::test]
    async fn test_update_not_found_skips_write() {
        let mut repository = MockTestItemRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repository.expect_update().times(0);

        let service = ItemService::new(Arc::new(repository));

        let result = service
            .update(ItemId(3), UserId(1), UpdateItemCommand::default())
            .await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut repository = MockTestItemRepository::new();

        repository
            .expect_delete()
            .times(1)
            .returning(|id, _| Err(ItemError::NotFound(id.to_string())));

        let service = ItemService::new(Arc::new(repository));

        let result = service.delete(ItemId(4), UserId(1)).await;
        assert_eq!(result, Err(ItemError::NotFound("4".to_string())));
    }
}
