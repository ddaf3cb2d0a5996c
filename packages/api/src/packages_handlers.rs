// ABOUTME: HTTP request handlers for package operations
// ABOUTME: CRUD plus slug lookup, flag filters and name search

use atelier_catalog::{DbState, PackageCreateInput, PackageListFilter, PackageUpdateInput};
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

#[derive(Debug, Deserialize)]
pub struct SearchPackagesQuery {
    pub name: String,
}

/// List packages by display order
pub async fn list_packages(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<PackageListFilter>,
) -> impl IntoResponse {
    info!(
        "Listing packages (active_only: {}, popular_only: {})",
        filter.active_only, filter.popular_only
    );

    match db.package_storage.list(&filter, page).await {
        Ok((packages, total)) => {
            let response = PaginatedResponse::new(packages, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Search packages by name
pub async fn search_packages(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(params): Query<SearchPackagesQuery>,
) -> impl IntoResponse {
    info!("Searching packages: {}", params.name);

    match db.package_storage.search_by_name(&params.name, page).await {
        Ok((packages, total)) => {
            let response = PaginatedResponse::new(packages, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_package(
    State(db): State<DbState>,
    Path(package_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting package: {}", package_id);

    match db.package_storage.get(&package_id).await {
        Ok(package) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(package))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_package_by_slug(
    State(db): State<DbState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!("Getting package by slug: {}", slug);

    match db.package_storage.get_by_slug(&slug).await {
        Ok(Some(package)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(package))).into_response()
        }
        Ok(None) => ApiError::not_found("Package", slug).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new package
pub async fn create_package(
    State(db): State<DbState>,
    Json(input): Json<PackageCreateInput>,
) -> impl IntoResponse {
    info!("Creating package: {}", input.name);

    match db.package_storage.create(input).await {
        Ok(package) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(package))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_package(
    State(db): State<DbState>,
    Path(package_id): Path<String>,
    Json(input): Json<PackageUpdateInput>,
) -> impl IntoResponse {
    info!("Updating package: {}", package_id);

    match db.package_storage.update(&package_id, input).await {
        Ok(package) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(package))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_package(
    State(db): State<DbState>,
    Path(package_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting package: {}", package_id);

    match db.package_storage.delete(&package_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
