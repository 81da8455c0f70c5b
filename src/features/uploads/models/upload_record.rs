use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::features::uploads::dtos::UploadMetadata;
use crate::shared::time::format_wib;

/// One audit log row per accepted upload.
///
/// Field order is the column order of the log file and must match [`UploadRecord::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub timestamp: String,
    pub filename: String,
    pub user_agent: String,
    pub ip: String,
    pub latitude: String,
    pub longitude: String,
    pub hari: String,
    pub jam: String,
    pub material: String,
    pub keterangan: String,
}

impl UploadRecord {
    /// Header row, written once when the log file is created
    pub const COLUMNS: [&'static str; 10] = [
        "timestamp",
        "filename",
        "user_agent",
        "ip",
        "latitude",
        "longitude",
        "hari",
        "jam",
        "material",
        "keterangan",
    ];

    /// Build the row for a stored photo. Client-supplied values are kept verbatim;
    /// a missing or empty client timestamp falls back to `received_at`.
    pub fn new(
        filename: String,
        received_at: &DateTime<FixedOffset>,
        ip: Option<String>,
        metadata: UploadMetadata,
    ) -> Self {
        let timestamp = metadata
            .timestamp
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format_wib(received_at));

        Self {
            timestamp,
            filename,
            user_agent: metadata.user_agent.unwrap_or_default(),
            ip: ip.unwrap_or_default(),
            latitude: metadata.latitude.unwrap_or_default(),
            longitude: metadata.longitude.unwrap_or_default(),
            hari: metadata.hari.unwrap_or_default(),
            jam: metadata.jam.unwrap_or_default(),
            material: metadata.material.unwrap_or_default(),
            keterangan: metadata.keterangan.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::time::wib;
    use chrono::TimeZone;

    fn received_at() -> DateTime<FixedOffset> {
        wib().with_ymd_and_hms(2024, 8, 17, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_to_empty_strings() {
        let record = UploadRecord::new(
            "2024-08-17_10-00-00_test.jpg".to_string(),
            &received_at(),
            None,
            UploadMetadata::default(),
        );

        assert_eq!(record.timestamp, "2024-08-17 10:00:00");
        assert_eq!(record.filename, "2024-08-17_10-00-00_test.jpg");
        assert!(record.user_agent.is_empty());
        assert!(record.ip.is_empty());
        assert!(record.latitude.is_empty());
        assert!(record.keterangan.is_empty());
    }

    #[test]
    fn test_client_values_kept_verbatim() {
        let metadata = UploadMetadata {
            timestamp: Some("kemarin sore".to_string()),
            latitude: Some("not-a-number".to_string()),
            longitude: Some("106.8456".to_string()),
            keterangan: Some("retak, perlu dicek".to_string()),
            ..Default::default()
        };

        let record = UploadRecord::new(
            "x.jpg".to_string(),
            &received_at(),
            Some("10.0.0.2".to_string()),
            metadata,
        );

        assert_eq!(record.timestamp, "kemarin sore");
        assert_eq!(record.latitude, "not-a-number");
        assert_eq!(record.longitude, "106.8456");
        assert_eq!(record.ip, "10.0.0.2");
        assert_eq!(record.keterangan, "retak, perlu dicek");
    }

    #[test]
    fn test_empty_client_timestamp_falls_back() {
        let metadata = UploadMetadata {
            timestamp: Some(String::new()),
            ..Default::default()
        };

        let record = UploadRecord::new("x.jpg".to_string(), &received_at(), None, metadata);

        assert_eq!(record.timestamp, "2024-08-17 10:00:00");
    }
}
