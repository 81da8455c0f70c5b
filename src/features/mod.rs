pub mod landing;
pub mod uploads;
