use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::item::models::ItemId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(item_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let item_id = ItemId::from_string(&item_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .item_service
        .delete(item_id, user.user_id)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(item_id = %item_id, user_id = %user.user_id, "Item deleted");

    Ok(ApiSuccess::new(StatusCode::OK, ()))
}
