//! Announcement CRUD route handlers.
//!
//! A missing record on get, update or delete is an ordinary outcome and is
//! answered with `{"msg": "not found"}` and a 404, not with the generic error
//! body.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tb_core::pagination::DEFAULT_PAGE_SIZE;
use tb_core::{Announcement, AnnouncementDraft, AnnouncementId, PageRequest};

use crate::context::AppContext;
use crate::error::AppError;

/// Query parameters for listing announcements.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAnnouncementsParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Records per page.
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_page() -> usize {
    1
}

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// One page of announcements.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnnouncementListResponse {
    pub anuncios: Vec<Announcement>,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

/// Outcome message for update and delete.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(MessageResponse { msg: msg.into() })).into_response()
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "not found")
}

/// GET /anuncios
#[utoipa::path(
    get,
    path = "/anuncios",
    params(ListAnnouncementsParams),
    responses(
        (status = 200, description = "One page of announcements", body = AnnouncementListResponse),
        (status = 400, description = "page or size below 1")
    )
)]
pub async fn list_announcements(
    State(ctx): State<AppContext>,
    Query(params): Query<ListAnnouncementsParams>,
) -> Result<Json<AnnouncementListResponse>, AppError> {
    let request = PageRequest::new(params.page, params.size)?;
    let page = ctx.announcements.list(request)?;

    Ok(Json(AnnouncementListResponse {
        anuncios: page.items,
        total_pages: page.total_pages,
        page: page.page,
        size: page.size,
        total: page.total,
    }))
}

/// GET /anuncios/{id}
#[utoipa::path(
    get,
    path = "/anuncios/{id}",
    params(("id" = i64, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement", body = Announcement),
        (status = 404, description = "Announcement not found", body = MessageResponse)
    )
)]
pub async fn get_announcement(
    State(ctx): State<AppContext>,
    Path(id): Path<AnnouncementId>,
) -> Result<Response, AppError> {
    Ok(match ctx.announcements.get(id)? {
        Some(announcement) => Json(announcement).into_response(),
        None => not_found(),
    })
}

/// POST /anuncios
#[utoipa::path(
    post,
    path = "/anuncios",
    request_body = AnnouncementDraft,
    responses(
        (status = 200, description = "Created announcement with its assigned id", body = Announcement)
    )
)]
pub async fn create_announcement(
    State(ctx): State<AppContext>,
    Json(draft): Json<AnnouncementDraft>,
) -> Result<Json<Announcement>, AppError> {
    let created = ctx.announcements.create(draft)?;
    Ok(Json(created))
}

/// PUT /anuncios/{id}
#[utoipa::path(
    put,
    path = "/anuncios/{id}",
    params(("id" = i64, Path, description = "Announcement ID")),
    request_body = AnnouncementDraft,
    responses(
        (status = 200, description = "Announcement updated", body = MessageResponse),
        (status = 404, description = "Announcement not found", body = MessageResponse)
    )
)]
pub async fn update_announcement(
    State(ctx): State<AppContext>,
    Path(id): Path<AnnouncementId>,
    Json(draft): Json<AnnouncementDraft>,
) -> Result<Response, AppError> {
    Ok(match ctx.announcements.update(id, draft)? {
        Some(_) => message(StatusCode::OK, "updated"),
        None => not_found(),
    })
}

/// DELETE /anuncios/{id}
#[utoipa::path(
    delete,
    path = "/anuncios/{id}",
    params(("id" = i64, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted", body = MessageResponse),
        (status = 404, description = "Announcement not found", body = MessageResponse)
    )
)]
pub async fn delete_announcement(
    State(ctx): State<AppContext>,
    Path(id): Path<AnnouncementId>,
) -> Result<Response, AppError> {
    Ok(match ctx.announcements.delete(id)? {
        Some(_) => message(StatusCode::OK, "deleted"),
        None => not_found(),
    })
}
