/// Multipart field carrying the uploaded photo
pub const PHOTO_FIELD: &str = "photo";

/// URL prefix under which stored photos are served
pub const CAPTURED_IMAGES_PATH: &str = "/captured_images";

/// Success marker in the upload response body
pub const STATUS_OK: &str = "ok";
