//! Image upload, listing and deletion route handlers.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Upload response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub filename: String,
}

/// Delete response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteImageResponse {
    pub detail: String,
}

/// POST /upload/
///
/// Stores the first file part of the form, preferring one named `file`.
#[utoipa::path(
    post,
    path = "/upload/",
    responses(
        (status = 200, description = "Stored file name", body = UploadResponse),
        (status = 400, description = "Missing file part or unsafe file name")
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {e}");
        tb_core::Error::Validation(format!("failed to read multipart body: {e}"))
    })? {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let preferred = field.name() == Some(FILE_FIELD);
        if upload.is_some() && !preferred {
            continue;
        }

        let data = field.bytes().await.map_err(|e| {
            tb_core::Error::Validation(format!("failed to read upload '{filename}': {e}"))
        })?;
        upload = Some((filename, data.to_vec()));

        if preferred {
            break;
        }
    }

    let (filename, data) = upload.ok_or_else(|| {
        tb_core::Error::Validation(format!("multipart form has no '{FILE_FIELD}' file part"))
    })?;

    let filename = ctx.images.save(&filename, &data)?;
    Ok(Json(UploadResponse { filename }))
}

/// GET /images/
#[utoipa::path(
    get,
    path = "/images/",
    responses(
        (status = 200, description = "Public URL of every stored image", body = Vec<String>)
    )
)]
pub async fn list_images(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(ctx.images.list_urls()?))
}

/// DELETE /images/{name}
#[utoipa::path(
    delete,
    path = "/images/{name}",
    params(("name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Image deleted", body = DeleteImageResponse),
        (status = 400, description = "Unsafe file name"),
        (status = 404, description = "Image not found")
    )
)]
pub async fn delete_image(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<DeleteImageResponse>, AppError> {
    ctx.images.delete(&name)?;
    Ok(Json(DeleteImageResponse {
        detail: "deleted".into(),
    }))
}
