use async_trait::async_trait;
use chrono::SecondsFormat;
use redis::AsyncCommands;
use tracing::info;

use crate::{
    application::{error::ApplicationError, repositories::metadata_repository::MetadataRepository},
    domain::models::metadata::UploadMetadata,
};

/// Stores one redis hash per upload at `{table_name}:{uuid}`.
pub struct RedisMetadataRepository {
    client: redis::aio::ConnectionManager,
    table_name: String,
}

impl RedisMetadataRepository {
    pub fn new(client: redis::aio::ConnectionManager, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn get_redis_key(&self, metadata: &UploadMetadata) -> String {
        format!("{}:{}", self.table_name, metadata.uuid)
    }
}

fn metadata_fields(metadata: &UploadMetadata) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("uuid", metadata.uuid.to_string()),
        ("gallery", metadata.gallery.clone()),
        ("original_key", metadata.original_key.clone()),
        ("thumbnail_key", metadata.thumbnail_key.clone()),
        ("original_url", metadata.original_url.clone()),
        ("thumbnail_url", metadata.thumbnail_url.clone()),
        (
            "uploaded_at",
            metadata.uploaded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ];
    if let Some(expiration_date) = metadata.expiration_date {
        fields.push((
            "expiration_date",
            expiration_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }
    fields
}

#[async_trait]
impl MetadataRepository for RedisMetadataRepository {
    async fn create_metadata(&self, metadata: &UploadMetadata) -> Result<(), ApplicationError> {
        let key = self.get_redis_key(metadata);
        let fields = metadata_fields(metadata);
        let mut conn = self.client.clone();

        conn.hset_multiple::<_, _, _, ()>(&key, fields.as_slice())
            .await
            .map_err(|e| {
                ApplicationError::DatabaseError(format!("Failed to store metadata: {}", e))
            })?;

        info!("Stored upload metadata at '{}'", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn sample(expiration: bool) -> UploadMetadata {
        let uploaded_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        UploadMetadata {
            uuid: Uuid::nil(),
            gallery: "g".to_string(),
            original_key: "uploads/original/g/x.png".to_string(),
            thumbnail_key: "uploads/thumbnail/g/x.png".to_string(),
            original_url: "https://b.s3.amazonaws.com/uploads/original/g/x.png".to_string(),
            thumbnail_url: "https://b.s3.amazonaws.com/uploads/thumbnail/g/x.png".to_string(),
            expiration_date: expiration
                .then(|| Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap()),
            uploaded_at,
        }
    }

    #[test]
    fn fields_cover_every_column() {
        let fields = metadata_fields(&sample(true));
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "uuid",
                "gallery",
                "original_key",
                "thumbnail_key",
                "original_url",
                "thumbnail_url",
                "uploaded_at",
                "expiration_date",
            ]
        );
        assert!(fields.contains(&("uploaded_at", "2026-03-01T12:00:00Z".to_string())));
        assert!(fields.contains(&("expiration_date", "2026-03-31T12:00:00Z".to_string())));
    }

    #[test]
    fn missing_expiration_is_omitted() {
        let fields = metadata_fields(&sample(false));
        assert!(fields.iter().all(|(name, _)| *name != "expiration_date"));
        assert_eq!(
            fields[0],
            ("uuid", "00000000-0000-0000-0000-000000000000".to_string())
        );
    }
}
