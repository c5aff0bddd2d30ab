use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ItemData;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::Price;
use crate::domain::item::models::UpdateItemCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an item (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    #[serde(alias = "soldout")]
    pub sold_out: Option<bool>,
}

impl UpdateItemRequest {
    fn try_into_command(self) -> Result<UpdateItemCommand, ItemError> {
        let name = self.name.map(ItemName::new).transpose()?;
        let price = self.price.map(Price::new).transpose()?;

        Ok(UpdateItemCommand {
            name,
            price,
            quantity: self.quantity,
            description: self.description,
            sold_out: self.sold_out,
        })
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<ApiSuccess<ItemData>, ApiError> {
    let item_id = ItemId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = req.try_into_command()?;

    state
        .item_service
        .update(item_id, user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}
