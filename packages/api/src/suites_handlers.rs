// ABOUTME: HTTP request handlers for suite operations
// ABOUTME: CRUD plus name/slug lookups and the suites-with-collections listing

use atelier_catalog::{DbState, SuiteCreateInput, SuiteUpdateInput};
use atelier_storage::{PageParams, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::response::{ApiError, ApiResponse};

#[derive(Debug, Default, Deserialize)]
pub struct ListSuitesQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// List suites
pub async fn list_suites(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(params): Query<ListSuitesQuery>,
) -> impl IntoResponse {
    info!("Listing suites (active_only: {})", params.active_only);

    match db.suite_storage.list(params.active_only, page).await {
        Ok((suites, total)) => {
            let response = PaginatedResponse::new(suites, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// List suites with their collections
pub async fn list_suites_with_collections(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(params): Query<ListSuitesQuery>,
) -> impl IntoResponse {
    info!("Listing suites with collections");

    match db
        .suite_storage
        .list_with_collections(params.active_only, page)
        .await
    {
        Ok((suites, total)) => {
            let response = PaginatedResponse::new(suites, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a single suite by ID
pub async fn get_suite(
    State(db): State<DbState>,
    Path(suite_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting suite: {}", suite_id);

    match db.suite_storage.get(&suite_id).await {
        Ok(suite) => (StatusCode::OK, ResponseJson(ApiResponse::success(suite))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a suite by exact name
pub async fn get_suite_by_name(
    State(db): State<DbState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("Getting suite by name: {}", name);

    match db.suite_storage.get_by_name(&name).await {
        Ok(Some(suite)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(suite))).into_response()
        }
        Ok(None) => ApiError::not_found("Suite", name).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a suite by slug
pub async fn get_suite_by_slug(
    State(db): State<DbState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!("Getting suite by slug: {}", slug);

    match db.suite_storage.get_by_slug(&slug).await {
        Ok(Some(suite)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(suite))).into_response()
        }
        Ok(None) => ApiError::not_found("Suite", slug).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new suite
pub async fn create_suite(
    State(db): State<DbState>,
    Json(input): Json<SuiteCreateInput>,
) -> impl IntoResponse {
    info!("Creating suite: {}", input.name);

    match db.suite_storage.create(input).await {
        Ok(suite) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(suite))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Update a suite with the supplied fields only
pub async fn update_suite(
    State(db): State<DbState>,
    Path(suite_id): Path<String>,
    Json(input): Json<SuiteUpdateInput>,
) -> impl IntoResponse {
    info!("Updating suite: {}", suite_id);

    match db.suite_storage.update(&suite_id, input).await {
        Ok(suite) => (StatusCode::OK, ResponseJson(ApiResponse::success(suite))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete a suite and everything under it
pub async fn delete_suite(
    State(db): State<DbState>,
    Path(suite_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting suite: {}", suite_id);

    match db.suite_storage.delete(&suite_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
