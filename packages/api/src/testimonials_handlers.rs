// ABOUTME: HTTP request handlers for testimonial operations
// ABOUTME: CRUD plus client lookup, ordering, search, rating ranges and the count endpoint

use atelier_catalog::{DbState, TestimonialCreateInput, TestimonialListFilter, TestimonialUpdateInput};
use atelier_storage::{PageParams, PaginatedResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde_json::json;
use tracing::info;

use crate::response::{ApiError, ApiResponse};

/// List testimonials. `search` wins over `min_rating`/`max_rating`, which
/// win over `order_by`.
pub async fn list_testimonials(
    State(db): State<DbState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<TestimonialListFilter>,
) -> impl IntoResponse {
    info!("Listing testimonials ({:?})", filter);

    match db.testimonial_storage.query(&filter, page).await {
        Ok((testimonials, total)) => {
            let response = PaginatedResponse::new(testimonials, &page, total);
            (StatusCode::OK, ResponseJson(ApiResponse::success(response))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_testimonial(
    State(db): State<DbState>,
    Path(testimonial_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting testimonial: {}", testimonial_id);

    match db.testimonial_storage.get(&testimonial_id).await {
        Ok(testimonial) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(testimonial))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Case-insensitive lookup by client name
pub async fn get_testimonial_by_client(
    State(db): State<DbState>,
    Path(client_name): Path<String>,
) -> impl IntoResponse {
    info!("Getting testimonial for client: {}", client_name);

    match db.testimonial_storage.get_by_client_name(&client_name).await {
        Ok(Some(testimonial)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(testimonial))).into_response()
        }
        Ok(None) => ApiError::not_found("Testimonial", client_name).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Total number of testimonials
pub async fn count_testimonials(State(db): State<DbState>) -> impl IntoResponse {
    match db.testimonial_storage.count().await {
        Ok(total) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(json!({ "total": total }))),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_testimonial(
    State(db): State<DbState>,
    Json(input): Json<TestimonialCreateInput>,
) -> impl IntoResponse {
    info!("Creating testimonial for: {}", input.client_name);

    match db.testimonial_storage.create(input).await {
        Ok(testimonial) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(testimonial))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_testimonial(
    State(db): State<DbState>,
    Path(testimonial_id): Path<String>,
    Json(input): Json<TestimonialUpdateInput>,
) -> impl IntoResponse {
    info!("Updating testimonial: {}", testimonial_id);

    match db.testimonial_storage.update(&testimonial_id, input).await {
        Ok(testimonial) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(testimonial))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_testimonial(
    State(db): State<DbState>,
    Path(testimonial_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting testimonial: {}", testimonial_id);

    match db.testimonial_storage.delete(&testimonial_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
