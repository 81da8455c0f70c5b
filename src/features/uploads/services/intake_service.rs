use chrono::{DateTime, FixedOffset};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::core::config::IntakeConfig;
use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{PhotoPart, UploadMetadata};
use crate::features::uploads::models::UploadRecord;
use crate::features::uploads::services::AuditLog;
use crate::shared::filename::{extension_of, sanitize_filename};
use crate::shared::time::{filename_prefix, now_wib};

/// Service turning one validated upload into a stored photo plus one audit row
pub struct IntakeService {
    config: IntakeConfig,
    audit_log: AuditLog,
}

impl IntakeService {
    pub fn new(config: IntakeConfig) -> Self {
        let audit_log = AuditLog::new(config.log_path.clone());
        Self { config, audit_log }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Startup preparation: create the upload root and the audit log header.
    ///
    /// Safe to call repeatedly; existing photos and log rows are never touched.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.config.upload_dir)?;
        self.audit_log.ensure_header()?;

        info!(
            "Upload root {} and audit log {} ready",
            self.config.upload_dir.display(),
            self.audit_log.path().display()
        );
        Ok(())
    }

    /// Check an upload before any side effect happens.
    ///
    /// Order matters: missing part, then empty filename, then extension.
    pub fn validate(&self, photo: Option<PhotoPart>) -> Result<PhotoPart> {
        let photo = photo.ok_or(AppError::MissingFile)?;

        if photo.file_name.is_empty() {
            return Err(AppError::EmptyFilename);
        }

        if self.config.enforce_extensions {
            let extension = extension_of(&photo.file_name).unwrap_or_default();
            if !self.config.is_extension_allowed(&extension) {
                return Err(AppError::DisallowedType(extension));
            }
        }

        Ok(photo)
    }

    /// `{WIB timestamp}_{sanitized original name}`, e.g. `2024-08-17_10-00-00_test.jpg`.
    ///
    /// Two uploads with the same name in the same second map to the same file;
    /// the later one overwrites the earlier.
    pub fn derive_filename(original: &str, received_at: &DateTime<FixedOffset>) -> String {
        format!(
            "{}_{}",
            filename_prefix(received_at),
            sanitize_filename(original)
        )
    }

    /// Validate, store the photo, then append the audit row.
    ///
    /// Returns the stored filename. If the append fails after the photo was
    /// written, the photo stays on disk and the error is reported as internal.
    pub async fn intake(
        &self,
        photo: Option<PhotoPart>,
        metadata: UploadMetadata,
        ip: Option<String>,
    ) -> Result<String> {
        let photo = self.validate(photo)?;

        let received_at = now_wib();
        let filename = Self::derive_filename(&photo.file_name, &received_at);
        let record = UploadRecord::new(filename.clone(), &received_at, ip, metadata);

        debug!(
            "Storing upload '{}' ({} bytes, {}) as {}",
            photo.file_name,
            photo.data.len(),
            photo.content_type.as_deref().unwrap_or("unknown type"),
            filename
        );

        let target = self.config.upload_dir.join(&filename);
        let audit_log = self.audit_log.clone();
        let size = photo.data.len();

        tokio::task::spawn_blocking(move || Self::persist(&target, &photo, &audit_log, &record))
            .await
            .map_err(|e| AppError::Internal(format!("Intake task failed: {}", e)))??;

        info!("Upload stored: filename={}, size={}", filename, size);

        Ok(filename)
    }

    fn persist(
        target: &Path,
        photo: &PhotoPart,
        audit_log: &AuditLog,
        record: &UploadRecord,
    ) -> Result<()> {
        fs::write(target, &photo.data)?;

        if let Err(e) = audit_log.append(record) {
            error!(
                "Photo {} stored but audit row was not written: {}",
                target.display(),
                e
            );
            return Err(e);
        }

        Ok(())
    }
}
