use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::CredentialRecord;
use crate::domain::auth::models::NewCredential;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::NewItem;
use crate::domain::item::ports::ItemRepository;

/// Process-local credential store.
///
/// The duplicate-email check and the insert happen under one write guard, so
/// concurrent signups for the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<Vec<CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, credential: NewCredential) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        if records.iter().any(|record| record.email == credential.email) {
            return Err(StoreError::EmailAlreadyExists(credential.email));
        }

        // Records are never removed, so ids stay unique.
        let id = UserId(records.len() as i64 + 1);
        records.push(credential.into_record(id));

        tracing::debug!(user_id = %id, "Credential record stored in memory");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<CredentialRecord, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[derive(Debug)]
struct ItemTable {
    items: Vec<Item>,
    next_id: i64,
}

/// Process-local item repository.
#[derive(Debug)]
pub struct InMemoryItemRepository {
    table: RwLock<ItemTable>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seed the repository. New identifiers continue after the largest seeded one.
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id.0).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(ItemTable { items, next_id }),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, ItemError> {
        let mut items = self.table.read().await.items.clone();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn find_by_id(&self, id: ItemId, user_id: UserId) -> Result<Option<Item>, ItemError> {
        Ok(self
            .table
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id && item.user_id == user_id)
            .cloned())
    }

    async fn create(&self, item: NewItem) -> Result<Item, ItemError> {
        let mut table = self.table.write().await;

        let item = item.into_item(ItemId(table.next_id));
        table.next_id += 1;
        table.items.push(item.clone());

        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let mut table = self.table.write().await;

        let slot = table
            .items
            .iter_mut()
            .find(|stored| stored.id == item.id && stored.user_id == item.user_id)
            .ok_or_else(|| ItemError::NotFound(item.id.to_string()))?;
        *slot = item.clone();

        Ok(item)
    }

    async fn delete(&self, id: ItemId, user_id: UserId) -> Result<(), ItemError> {
        let mut table = self.table.write().await;

        let position = table
            .items
            .iter()
            .position(|item| item.id == id && item.user_id == user_id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
        table.items.remove(position);

        Ok(())
    }
}
