pub mod landing_handler;

pub use landing_handler::*;
