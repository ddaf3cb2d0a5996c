// ABOUTME: HTTP request handlers for item operations
// ABOUTME: CRUD plus slug lookup, per-collection listing, filters and likes

use atelier_catalog::{DbState, ItemCreateInput, ItemListFilter, ItemUpdateInput};
use atelier_storage::{PageParams, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::info;

use crate::response::{ApiError, ApiResponse};

/// List items filtered by availability, category and search term
pub async fn list_items(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<ItemListFilter>,
) -> impl IntoResponse {
    info!(
        "Listing items (available_only: {}, category: {:?}, search: {:?})",
        filter.available_only, filter.category, filter.search
    );

    match db.item_storage.list(&filter, page).await {
        Ok((items, total)) => {
            let response = PaginatedResponse::new(items, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// List the items of one collection
pub async fn list_items_by_collection(
    State(db): State<DbState>,
    Path(collection_id): Path<String>,
    Query(page): Query<PageParams>,
) -> impl IntoResponse {
    info!("Listing items for collection: {}", collection_id);

    match db.item_storage.list_by_collection(&collection_id, page).await {
        Ok((items, total)) => {
            let response = PaginatedResponse::new(items, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_item(
    State(db): State<DbState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting item: {}", item_id);

    match db.item_storage.get(&item_id).await {
        Ok(item) => (StatusCode::OK, ResponseJson(ApiResponse::success(item))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_item_by_slug(
    State(db): State<DbState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!("Getting item by slug: {}", slug);

    match db.item_storage.get_by_slug(&slug).await {
        Ok(Some(item)) => (StatusCode::OK, ResponseJson(ApiResponse::success(item))).into_response(),
        Ok(None) => ApiError::not_found("Item", slug).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new item
pub async fn create_item(
    State(db): State<DbState>,
    Json(input): Json<ItemCreateInput>,
) -> impl IntoResponse {
    info!("Creating item: {} (collection: {})", input.name, input.collection_id);

    match db.item_storage.create(input).await {
        Ok(item) => (StatusCode::CREATED, ResponseJson(ApiResponse::success(item))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_item(
    State(db): State<DbState>,
    Path(item_id): Path<String>,
    Json(input): Json<ItemUpdateInput>,
) -> impl IntoResponse {
    info!("Updating item: {}", item_id);

    match db.item_storage.update(&item_id, input).await {
        Ok(item) => (StatusCode::OK, ResponseJson(ApiResponse::success(item))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Add one like to an item
pub async fn like_item(
    State(db): State<DbState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    info!("Liking item: {}", item_id);

    match db.item_storage.like(&item_id).await {
        Ok(item) => (StatusCode::OK, ResponseJson(ApiResponse::success(item))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_item(
    State(db): State<DbState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting item: {}", item_id);

    match db.item_storage.delete(&item_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
