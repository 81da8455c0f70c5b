use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::ClientIp;
use crate::features::uploads::dtos::{
    PhotoPart, UploadMetadata, UploadPhotoDto, UploadResponseDto,
};
use crate::features::uploads::services::IntakeService;
use crate::shared::constants::PHOTO_FIELD;

/// Upload a photo
///
/// Accepts multipart/form-data with:
/// - `photo`: The photo file (required)
/// - `timestamp`, `latitude`, `longitude`, `user_agent`, `hari`, `jam`,
///   `material`, `keterangan`: optional text fields, stored verbatim
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(
        content = UploadPhotoDto,
        content_type = "multipart/form-data",
        description = "Photo plus optional location, time and notes fields",
    ),
    responses(
        (status = 200, description = "Photo stored and logged", body = UploadResponseDto),
        (status = 400, description = "Missing photo, empty filename or file type not allowed", body = String, content_type = "text/plain"),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Photo or audit row could not be written", body = String, content_type = "text/plain")
    )
)]
pub async fn upload_photo(
    State(service): State<Arc<IntakeService>>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponseDto>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut photo: Option<PhotoPart> = None;
    let mut metadata = UploadMetadata::default();

    // Read every part first; nothing touches the disk until validation passes
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == PHOTO_FIELD {
            // A part without a filename parameter is a plain text field, not a file
            let Some(file_name) = field.file_name().map(str::to_string) else {
                debug!("Ignoring '{}' part without filename", PHOTO_FIELD);
                continue;
            };
            if photo.is_some() {
                debug!("Ignoring additional '{}' part", PHOTO_FIELD);
                continue;
            }

            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;

            photo = Some(PhotoPart {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        if !metadata.set_field(&field_name, text) {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    if metadata.user_agent.is_none() {
        metadata.user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    let filename = service.intake(photo, metadata, ip).await?;

    Ok(Json(UploadResponseDto::ok(filename)))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    debug!("Failed to read multipart data: {}", e);
    AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
}
