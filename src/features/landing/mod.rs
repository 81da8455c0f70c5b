//! Landing page serving the photo capture form.

pub mod handlers;
pub mod routes;

pub use routes::routes;
