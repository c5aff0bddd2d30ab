use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ItemData;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::Price;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateItemRequest>,
) -> Result<ApiSuccess<ItemData>, ApiError> {
    let command = body.try_into_command()?;

    let item = state
        .item_service
        .create(command, user.user_id)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(item_id = %item.id, user_id = %user.user_id, "Item listed");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&item).into()))
}

/// HTTP request body for listing an item (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateItemRequest {
    name: String,
    price: i64,
    #[serde(default)]
    quantity: u32,
    #[serde(default)]
    description: String,
}

impl CreateItemRequest {
    fn try_into_command(self) -> Result<CreateItemCommand, ItemError> {
        let name = ItemName::new(self.name)?;
        let price = Price::new(self.price)?;
        Ok(CreateItemCommand::new(name, price, self.description).with_quantity(self.quantity))
    }
}
