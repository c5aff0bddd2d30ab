use async_trait::async_trait;

use crate::domain::auth::models::UserId;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::NewItem;
use crate::domain::item::models::UpdateItemCommand;

/// Port for item domain service operations.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// List every item.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self) -> Result<Vec<Item>, ItemError>;

    /// Retrieve an item owned by `user_id`.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, item_id: ItemId, user_id: UserId) -> Result<Item, ItemError>;

    /// List a new item on behalf of `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: CreateItemCommand, user_id: UserId) -> Result<Item, ItemError>;

    /// Update an item owned by `user_id` with the provided fields.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        item_id: ItemId,
        user_id: UserId,
        command: UpdateItemCommand,
    ) -> Result<Item, ItemError>;

    /// Delete an item owned by `user_id`.
    ///
    /// # Errors
    /// * `NotFound` - No such item for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, item_id: ItemId, user_id: UserId) -> Result<(), ItemError>;
}

/// Persistence operations for items.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Retrieve all items ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Item>, ItemError>;

    /// Retrieve an item by identifier and owner.
    ///
    /// # Returns
    /// Optional item (None if not found or owned by someone else)
    async fn find_by_id(&self, id: ItemId, user_id: UserId) -> Result<Option<Item>, ItemError>;

    /// Persist a new item; the repository assigns its identifier.
    async fn create(&self, item: NewItem) -> Result<Item, ItemError>;

    /// Replace a stored item.
    ///
    /// # Errors
    /// * `NotFound` - Item no longer exists for this owner
    async fn update(&self, item: Item) -> Result<Item, ItemError>;

    /// Remove an item.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist for this owner
    async fn delete(&self, id: ItemId, user_id: UserId) -> Result<(), ItemError>;
}
