use crate::dtos::{CreateItemRequest, ItemResponse};
use crate::models::{Item, ItemId};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

fn parse_item_id(raw: &str) -> Result<ItemId, AppError> {
    raw.parse().map_err(|e| {
        tracing::warn!(item_id = %raw, "Rejected malformed item id");
        AppError::BadRequest(anyhow::Error::new(e))
    })
}

/// `<host>/stuff/<id>`, where host comes from the `Host` header (or the
/// request target's authority for HTTP/2).
fn item_location(headers: &HeaderMap, uri: &Uri, id: &ItemId) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default();
    format!("{}/stuff/{}", host, id)
}

#[tracing::instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = state.store.find_all().await?;

    tracing::debug!(count = items.len(), "Listed items");

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemResponse>, AppError> {
    let id = parse_item_id(&item_id)?;

    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found: {}", id)))?;

    Ok(Json(ItemResponse::from(item)))
}

#[tracing::instrument(skip(state, headers, uri, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected item payload: {}", e);
        AppError::BadRequest(anyhow::anyhow!("Invalid item payload: {}", e.body_text()))
    })?;

    // The id is always server-assigned
    let item = Item::new(request.title, request.body);

    state.store.insert(&item).await?;

    let location = item_location(&headers, &uri, &item.id);
    counter!("items_created_total").increment(1);
    tracing::info!(item_id = %item.id, "Item created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ItemResponse::from(item)),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_item_id(&item_id)?;

    let deleted = state.store.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Item not found: {}", id)));
    }

    counter!("items_deleted_total").increment(1);
    tracing::info!(item_id = %id, "Item deleted");

    Ok(StatusCode::OK)
}
