use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::models::UserId;
use crate::domain::item::errors::ItemIdError;
use crate::domain::item::errors::ItemNameError;
use crate::domain::item::errors::PriceError;

/// Item listed for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub price: Price,
    pub quantity: u32,
    pub description: String,
    pub sold_out: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Item unique identifier type, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Parse an item ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a non-negative integer
    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        s.parse::<u64>()
            .ok()
            .and_then(|id| i64::try_from(id).ok())
            .map(ItemId)
            .ok_or_else(|| ItemIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Item name value type
///
/// Ensures the name has at least 2 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    const MIN_LENGTH: usize = 2;

    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    pub fn new(name: String) -> Result<Self, ItemNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(ItemNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Price value type, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(u32);

impl Price {
    const MIN: i64 = 1;
    const MAX: i64 = 99_999_999;

    /// # Errors
    /// * `OutOfRange` - Price outside 1..=99_999_999
    pub fn new(price: i64) -> Result<Self, PriceError> {
        if !(Self::MIN..=Self::MAX).contains(&price) {
            return Err(PriceError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: price,
            });
        }
        Ok(Self(price as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Item that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: ItemName,
    pub price: Price,
    pub quantity: u32,
    pub description: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewItem {
    /// Attach a repository-assigned identifier. New items are never sold out.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            description: self.description,
            sold_out: false,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// Command to list a new item
#[derive(Debug)]
pub struct CreateItemCommand {
    pub name: ItemName,
    pub price: Price,
    pub quantity: u32,
    pub description: String,
}

impl CreateItemCommand {
    pub fn new(name: ItemName, price: Price, description: String) -> Self {
        Self {
            name,
            price,
            quantity: 0,
            description,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Command to update an existing item.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateItemCommand {
    pub name: Option<ItemName>,
    pub price: Option<Price>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    pub sold_out: Option<bool>,
}

impl UpdateItemCommand {
    /// Merge the provided fields into `item`.
    pub fn apply_to(self, mut item: Item) -> Item {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(sold_out) = self.sold_out {
            item.sold_out = sold_out;
        }
        item
    }
}
