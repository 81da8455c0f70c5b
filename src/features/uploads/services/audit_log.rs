use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::error::Result;
use crate::features::uploads::models::UploadRecord;

/// Append-only CSV audit log, one row per accepted upload.
///
/// The header row is written exactly once, at startup, by the exclusive
/// create of the file. Rows are appended with a fresh append-mode handle per
/// call; there is no cross-request lock, and `append` never creates the file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log with its header row if it does not exist yet.
    ///
    /// Returns `true` when the header was written by this call. An existing log
    /// is left untouched; a header that differs from [`UploadRecord::COLUMNS`]
    /// only produces a warning.
    pub fn ensure_header(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => {
                Self::write_header(file)?;
                info!("Created audit log {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if fs::metadata(&self.path)?.len() == 0 {
                    // Left empty by a crash between create and header write
                    let file = OpenOptions::new().append(true).open(&self.path)?;
                    Self::write_header(file)?;
                    return Ok(true);
                }
                self.check_header()?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append one row to a log prepared by [`AuditLog::ensure_header`].
    ///
    /// A log removed while the service runs is reported as a storage error;
    /// it comes back with its header on the next startup.
    pub fn append(&self, record: &UploadRecord) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .inspect_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    warn!("Audit log {} is missing", self.path.display());
                }
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    fn write_header(file: File) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(UploadRecord::COLUMNS)?;
        writer.flush()?;
        Ok(())
    }

    fn check_header(&self) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut header = csv::StringRecord::new();
        if reader.read_record(&mut header)? && header != UploadRecord::COLUMNS[..] {
            warn!(
                "Audit log {} has header {:?}, expected {:?}; rows will not line up",
                self.path.display(),
                header.iter().collect::<Vec<_>>(),
                UploadRecord::COLUMNS
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use tempfile::TempDir;

    fn record(filename: &str, keterangan: &str) -> UploadRecord {
        UploadRecord {
            timestamp: "2024-08-17 10:00:00".to_string(),
            filename: filename.to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            ip: "127.0.0.1".to_string(),
            latitude: "1.23".to_string(),
            longitude: "4.56".to_string(),
            hari: String::new(),
            jam: String::new(),
            material: String::new(),
            keterangan: keterangan.to_string(),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_ensure_header_creates_once() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("pog.csv"));

        assert!(log.ensure_header().unwrap());
        assert!(!log.ensure_header().unwrap());

        assert_eq!(
            read_lines(log.path()),
            vec!["timestamp,filename,user_agent,ip,latitude,longitude,hari,jam,material,keterangan"]
        );
    }

    #[test]
    fn test_ensure_header_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("logs/nested/log.csv"));

        assert!(log.ensure_header().unwrap());
        assert!(log.path().exists());
    }

    #[test]
    fn test_ensure_header_preserves_existing_rows() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("pog.csv"));
        log.ensure_header().unwrap();
        log.append(&record("a.jpg", "")).unwrap();
        let before = fs::read(log.path()).unwrap();

        assert!(!log.ensure_header().unwrap());

        assert_eq!(fs::read(log.path()).unwrap(), before);
    }

    #[test]
    fn test_ensure_header_fills_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pog.csv");
        fs::write(&path, "").unwrap();
        let log = AuditLog::new(&path);

        assert!(log.ensure_header().unwrap());
        assert_eq!(read_lines(&path).len(), 1);
    }

    #[test]
    fn test_append_keeps_header_and_field_count() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("pog.csv"));
        log.ensure_header().unwrap();

        log.append(&record("a.jpg", "")).unwrap();
        log.append(&record("b.jpg", "retak, \"parah\"")).unwrap();

        let mut reader = csv::Reader::from_path(log.path()).unwrap();
        let header = reader.headers().unwrap().clone();
        assert_eq!(header, UploadRecord::COLUMNS[..]);

        let rows: Vec<UploadRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], record("a.jpg", ""));
        assert_eq!(rows[1].keterangan, "retak, \"parah\"");
    }

    #[test]
    fn test_append_row_format() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("pog.csv"));
        log.ensure_header().unwrap();

        log.append(&record("a.jpg", "")).unwrap();

        assert_eq!(
            read_lines(log.path())[1],
            "2024-08-17 10:00:00,a.jpg,Mozilla/5.0 (X11; Linux x86_64),127.0.0.1,1.23,4.56,,,,"
        );
    }

    #[test]
    fn test_append_to_missing_log_fails_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("pog.csv"));
        log.ensure_header().unwrap();
        fs::remove_file(log.path()).unwrap();

        let result = log.append(&record("a.jpg", ""));

        assert!(matches!(result, Err(AppError::Storage(e)) if e.kind() == ErrorKind::NotFound));
        assert!(!log.path().exists());

        assert!(log.ensure_header().unwrap());
        log.append(&record("b.jpg", "")).unwrap();
        let lines = read_lines(log.path());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("timestamp,filename"));
    }

    #[test]
    fn test_mismatched_header_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pog.csv");
        let legacy = "Timestamp WIB,Latitude,Longitude,UserAgent,Filename\n";
        fs::write(&path, legacy).unwrap();
        let log = AuditLog::new(&path);

        assert!(!log.ensure_header().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), legacy);
    }
}
