use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::auth::models::UserId;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::NewItem;
use crate::domain::item::models::Price;
use crate::domain::item::ports::ItemRepository;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    price: i32,
    quantity: i64,
    description: String,
    sold_out: bool,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: ItemId(row.id),
            name: ItemName::new(row.name)?,
            price: Price::new(i64::from(row.price))?,
            quantity: u32::try_from(row.quantity).map_err(|_| {
                ItemError::DatabaseError(format!("quantity out of range: {}", row.quantity))
            })?,
            description: row.description,
            sold_out: row.sold_out,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ItemError {
    ItemError::DatabaseError(e.to_string())
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, price, quantity, description, sold_out, user_id, created_at
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn find_by_id(&self, id: ItemId, user_id: UserId) -> Result<Option<Item>, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, price, quantity, description, sold_out, user_id, created_at
            FROM items
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Item::try_from).transpose()
    }

    async fn create(&self, item: NewItem) -> Result<Item, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, price, quantity, description, sold_out, user_id, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $6)
            RETURNING id, name, price, quantity, description, sold_out, user_id, created_at
            "#,
        )
        .bind(item.name.as_str())
        .bind(item.price.value() as i32)
        .bind(i64::from(item.quantity))
        .bind(&item.description)
        .bind(item.user_id.0)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Item::try_from(row)
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = $3, price = $4, quantity = $5, description = $6, sold_out = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item.id.0)
        .bind(item.user_id.0)
        .bind(item.name.as_str())
        .bind(item.price.value() as i32)
        .bind(i64::from(item.quantity))
        .bind(&item.description)
        .bind(item.sold_out)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(item.id.to_string()));
        }

        Ok(item)
    }

    async fn delete(&self, id: ItemId, user_id: UserId) -> Result<(), ItemError> {
        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
