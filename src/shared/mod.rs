pub mod constants;
pub mod filename;
pub mod templates;
pub mod test_helpers;
pub mod time;
