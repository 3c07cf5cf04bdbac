use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Entry written to the metadata store for every successful upload pair.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadMetadata {
    pub uuid: Uuid,
    pub gallery: String,
    pub original_key: String,
    pub thumbnail_key: String,
    pub original_url: String,
    pub thumbnail_url: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
}
