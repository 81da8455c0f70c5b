use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::STATUS_OK;

/// Upload form for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoDto {
    /// The photo to store (png, jpg or jpeg by default)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: String,
    /// Client-side capture time; the server time (WIB) is used when empty.
    /// `timestamp_wib` is accepted as an alias.
    #[schema(example = "2024-08-17 10:00:00")]
    pub timestamp: Option<String>,
    #[schema(example = "-6.2088")]
    pub latitude: Option<String>,
    #[schema(example = "106.8456")]
    pub longitude: Option<String>,
    /// Overrides the User-Agent header
    pub user_agent: Option<String>,
    /// Day label
    #[schema(example = "Senin")]
    pub hari: Option<String>,
    /// Time label
    #[schema(example = "10:00")]
    pub jam: Option<String>,
    pub material: Option<String>,
    /// Free-text notes
    pub keterangan: Option<String>,
}

/// Response for an accepted upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    #[schema(example = "ok")]
    pub status: String,
    /// Name of the stored photo under the upload root
    #[schema(example = "2024-08-17_10-00-00_test.jpg")]
    pub filename: String,
}

impl UploadResponseDto {
    pub fn ok(filename: String) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            filename,
        }
    }
}

/// The `photo` file part as received
#[derive(Debug, Clone)]
pub struct PhotoPart {
    /// Client-supplied filename, possibly empty
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Optional text fields of an upload, `None` when the field was not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadMetadata {
    pub timestamp: Option<String>,
    pub user_agent: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub hari: Option<String>,
    pub jam: Option<String>,
    pub material: Option<String>,
    pub keterangan: Option<String>,
}

impl UploadMetadata {
    /// Store a text field by name. Returns `false` for unknown fields.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "timestamp" | "timestamp_wib" => &mut self.timestamp,
            "user_agent" => &mut self.user_agent,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            "hari" => &mut self.hari,
            "jam" => &mut self.jam,
            "material" => &mut self.material,
            "keterangan" => &mut self.keterangan,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}
