#[cfg(test)]
use crate::core::config::{parse_extensions, IntakeConfig};

#[cfg(test)]
use std::path::Path;

/// Intake config rooted at `dir` with the default png/jpg/jpeg allow-list
#[cfg(test)]
pub fn intake_config(
    dir: &Path,
    enforce_extensions: bool,
    max_upload_size: usize,
) -> IntakeConfig {
    IntakeConfig {
        upload_dir: dir.join("captured_images"),
        log_path: dir.join("pog.csv"),
        allowed_extensions: parse_extensions("png,jpg,jpeg"),
        enforce_extensions,
        max_upload_size,
    }
}
