//! Axum router construction.
//!
//! Builds the full application router with the announcement and image
//! routes, the OpenAPI document, middleware layers, and static file serving.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tb_core::config::STATIC_MOUNT;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::announcements::list_announcements,
        routes::announcements::get_announcement,
        routes::announcements::create_announcement,
        routes::announcements::update_announcement,
        routes::announcements::delete_announcement,
        routes::images::upload_image,
        routes::images::list_images,
        routes::images::delete_image,
    ),
    components(schemas(
        tb_core::Announcement,
        tb_core::AnnouncementDraft,
        routes::announcements::AnnouncementListResponse,
        routes::announcements::MessageResponse,
        routes::images::UploadResponse,
        routes::images::DeleteImageResponse,
    ))
)]
struct ApiDoc;

/// GET /api-docs/openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = ctx.config.server.static_dir.clone();
    let max_upload_bytes = ctx.config.server.max_upload_bytes;

    let announcement_routes = Router::new()
        .route(
            "/anuncios",
            get(routes::announcements::list_announcements)
                .post(routes::announcements::create_announcement),
        )
        .route(
            "/anuncios/{id}",
            get(routes::announcements::get_announcement)
                .put(routes::announcements::update_announcement)
                .delete(routes::announcements::delete_announcement),
        );

    // Existing front-ends call the collection paths with a trailing slash.
    let image_routes = Router::new()
        .route("/upload", post(routes::images::upload_image))
        .route("/upload/", post(routes::images::upload_image))
        .route("/images", get(routes::images::list_images))
        .route("/images/", get(routes::images::list_images))
        .route("/images/{name}", delete(routes::images::delete_image));

    tracing::info!("Serving static files from {:?} at {STATIC_MOUNT}", static_dir);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(announcement_routes)
        .merge(image_routes)
        .nest_service(STATIC_MOUNT, ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
