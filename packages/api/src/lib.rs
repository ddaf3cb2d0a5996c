// ABOUTME: HTTP API layer for the Atelier catalog providing REST endpoints and routing
// ABOUTME: Integration layer over the catalog storages plus health and admin scaffolding

use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};

use atelier_catalog::DbState;

pub mod admin;
pub mod collections_handlers;
pub mod health;
pub mod items_handlers;
pub mod packages_handlers;
pub mod response;
pub mod suites_handlers;
pub mod testimonials_handlers;

pub use health::ServiceInfo;
pub use response::{ApiError, ApiResponse};

/// Creates the suites API router
pub fn create_suites_router() -> Router<DbState> {
    Router::new()
        .route("/", get(suites_handlers::list_suites))
        .route("/", post(suites_handlers::create_suite))
        .route(
            "/with-collections",
            get(suites_handlers::list_suites_with_collections),
        )
        .route("/name/{name}", get(suites_handlers::get_suite_by_name))
        .route("/slug/{slug}", get(suites_handlers::get_suite_by_slug))
        .route("/{suite_id}", get(suites_handlers::get_suite))
        .route("/{suite_id}", put(suites_handlers::update_suite))
        .route("/{suite_id}", delete(suites_handlers::delete_suite))
}

/// Creates the collections API router
pub fn create_collections_router() -> Router<DbState> {
    Router::new()
        .route("/", get(collections_handlers::list_collections))
        .route("/", post(collections_handlers::create_collection))
        .route(
            "/slug/{slug}",
            get(collections_handlers::get_collection_by_slug),
        )
        .route(
            "/suite/{suite_id}",
            get(collections_handlers::list_collections_by_suite),
        )
        .route(
            "/{collection_id}",
            get(collections_handlers::get_collection),
        )
        .route(
            "/{collection_id}",
            put(collections_handlers::update_collection),
        )
        .route(
            "/{collection_id}",
            delete(collections_handlers::delete_collection),
        )
}

/// Creates the items API router
pub fn create_items_router() -> Router<DbState> {
    Router::new()
        .route("/", get(items_handlers::list_items))
        .route("/", post(items_handlers::create_item))
        .route("/slug/{slug}", get(items_handlers::get_item_by_slug))
        .route(
            "/collection/{collection_id}",
            get(items_handlers::list_items_by_collection),
        )
        .route("/{item_id}", get(items_handlers::get_item))
        .route("/{item_id}", put(items_handlers::update_item))
        .route("/{item_id}", delete(items_handlers::delete_item))
        .route("/{item_id}/like", post(items_handlers::like_item))
}

/// Creates the packages API router
pub fn create_packages_router() -> Router<DbState> {
    Router::new()
        .route("/", get(packages_handlers::list_packages))
        .route("/", post(packages_handlers::create_package))
        .route("/search", get(packages_handlers::search_packages))
        .route("/slug/{slug}", get(packages_handlers::get_package_by_slug))
        .route("/{package_id}", get(packages_handlers::get_package))
        .route("/{package_id}", put(packages_handlers::update_package))
        .route("/{package_id}", delete(packages_handlers::delete_package))
}

/// Creates the testimonials API router
pub fn create_testimonials_router() -> Router<DbState> {
    Router::new()
        .route("/", get(testimonials_handlers::list_testimonials))
        .route("/", post(testimonials_handlers::create_testimonial))
        .route(
            "/client/{client_name}",
            get(testimonials_handlers::get_testimonial_by_client),
        )
        .route(
            "/stats/count",
            get(testimonials_handlers::count_testimonials),
        )
        .route(
            "/{testimonial_id}",
            get(testimonials_handlers::get_testimonial),
        )
        .route(
            "/{testimonial_id}",
            put(testimonials_handlers::update_testimonial),
        )
        .route(
            "/{testimonial_id}",
            delete(testimonials_handlers::delete_testimonial),
        )
}

/// Creates the admin scaffolding router (view descriptors and form posts)
pub fn create_admin_router() -> Router<DbState> {
    Router::new()
        .route("/views", get(admin::list_views))
        .route("/views/{identity}", get(admin::get_view))
        .route("/packages", post(admin::create_package_form))
        .route("/items", post(admin::create_item_form))
}

/// Entity routers nested under `prefix` (for example `/api/v1`)
pub fn create_api_router(prefix: &str) -> Router<DbState> {
    let prefix = prefix.trim_end_matches('/');

    Router::new()
        .nest(&format!("{}/suites", prefix), create_suites_router())
        .nest(&format!("{}/collections", prefix), create_collections_router())
        .nest(&format!("{}/items", prefix), create_items_router())
        .nest(&format!("{}/packages", prefix), create_packages_router())
        .nest(
            &format!("{}/testimonials", prefix),
            create_testimonials_router(),
        )
}

/// Full application router: entity API, admin scaffolding, health and banner
pub fn create_router(prefix: &str, service: ServiceInfo, db: DbState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/admin", create_admin_router())
        .merge(create_api_router(prefix))
        .layer(Extension(service))
        .with_state(db)
}
