// ABOUTME: HTTP request handlers for collection operations
// ABOUTME: CRUD plus slug lookup, search and per-suite listing

use atelier_catalog::{CollectionCreateInput, CollectionListFilter, CollectionUpdateInput, DbState};
use atelier_storage::{PageParams, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::info;

use crate::response::{ApiError, ApiResponse};

/// List collections, optionally active only or matching a search term
pub async fn list_collections(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<CollectionListFilter>,
) -> impl IntoResponse {
    info!(
        "Listing collections (active_only: {}, search: {:?})",
        filter.active_only, filter.search
    );

    match db.collection_storage.list(&filter, page).await {
        Ok((collections, total)) => {
            let response = PaginatedResponse::new(collections, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// List the collections of one suite
pub async fn list_collections_by_suite(
    State(db): State<DbState>,
    Path(suite_id): Path<String>,
    Query(page): Query<PageParams>,
) -> impl IntoResponse {
    info!("Listing collections for suite: {}", suite_id);

    match db.collection_storage.list_by_suite(&suite_id, page).await {
        Ok((collections, total)) => {
            let response = PaginatedResponse::new(collections, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_collection(
    State(db): State<DbState>,
    Path(collection_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting collection: {}", collection_id);

    match db.collection_storage.get(&collection_id).await {
        Ok(collection) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(collection))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_collection_by_slug(
    State(db): State<DbState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!("Getting collection by slug: {}", slug);

    match db.collection_storage.get_by_slug(&slug).await {
        Ok(Some(collection)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(collection))).into_response()
        }
        Ok(None) => ApiError::not_found("Collection", slug).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new collection
pub async fn create_collection(
    State(db): State<DbState>,
    Json(input): Json<CollectionCreateInput>,
) -> impl IntoResponse {
    info!("Creating collection: {} (suite: {})", input.name, input.suite_id);

    match db.collection_storage.create(input).await {
        Ok(collection) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(collection))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_collection(
    State(db): State<DbState>,
    Path(collection_id): Path<String>,
    Json(input): Json<CollectionUpdateInput>,
) -> impl IntoResponse {
    info!("Updating collection: {}", collection_id);

    match db.collection_storage.update(&collection_id, input).await {
        Ok(collection) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(collection))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_collection(
    State(db): State<DbState>,
    Path(collection_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting collection: {}", collection_id);

    match db.collection_storage.delete(&collection_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
