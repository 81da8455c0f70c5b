//! Photo upload intake.
//!
//! Stores an uploaded photo under the upload root and appends one row per
//! accepted upload to the CSV audit log.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/upload` | Store a photo and log its metadata |
//! | GET | `/captured_images/{filename}` | Stream a stored photo (optional) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::IntakeService;
