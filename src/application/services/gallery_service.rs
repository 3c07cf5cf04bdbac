use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError, repositories::metadata_repository::MetadataRepository,
        services::StorageService,
    },
    domain::{
        config::settings::PublicUrls,
        models::{
            file::FileData,
            metadata::UploadMetadata,
            upload::{
                file_prefix, gallery_prefix, object_key, validate_segment, UploadedPair, Variant,
            },
        },
    },
};

/// Upper bound of keys per multi-object delete call.
const DELETE_BATCH_SIZE: usize = 1000;

#[derive(Debug)]
pub struct UploadRequest {
    pub gallery: String,
    pub original: FileData,
    pub thumbnail: FileData,
    pub expiring_days: Option<i64>,
}

/// Gallery use cases on top of an object store and an optional metadata store.
pub struct GalleryService {
    storage: Arc<dyn StorageService>,
    metadata_repository: Option<Arc<dyn MetadataRepository>>,
    public_urls: PublicUrls,
}

impl GalleryService {
    pub fn new(
        storage: Arc<dyn StorageService>,
        metadata_repository: Option<Arc<dyn MetadataRepository>>,
        public_urls: PublicUrls,
    ) -> Self {
        Self {
            storage,
            metadata_repository,
            public_urls,
        }
    }

    pub fn bucket_name(&self) -> &str {
        self.storage.bucket_name()
    }

    pub fn has_metadata_store(&self) -> bool {
        self.metadata_repository.is_some()
    }

    /// Stores an original/thumbnail pair under one generated id.
    ///
    /// Either both objects (and the metadata entry, when a metadata store is
    /// configured) are written, or whatever was already written is removed
    /// again before the error is returned.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadedPair, ApplicationError> {
        validate("gallery", &request.gallery)?;

        let uploaded_at = Utc::now();
        let expiration_date = expiration_date(uploaded_at, request.expiring_days)?;

        let id = Uuid::new_v4();
        let original_key = object_key(
            Variant::Original,
            &request.gallery,
            &id,
            &request.original.extension(),
        );
        let thumbnail_key = object_key(
            Variant::Thumbnail,
            &request.gallery,
            &id,
            &request.thumbnail.extension(),
        );

        info!(
            "Uploading pair {} to gallery '{}' ({} + {} bytes)",
            id,
            request.gallery,
            request.original.size(),
            request.thumbnail.size()
        );

        self.store(&original_key, request.original).await?;

        if let Err(e) = self.store(&thumbnail_key, request.thumbnail).await {
            self.rollback(vec![original_key]).await;
            return Err(e);
        }

        let pair = UploadedPair {
            id,
            original_url: self.public_urls.bucket_url(&original_key),
            thumbnail_url: self.public_urls.bucket_url(&thumbnail_key),
            original_key,
            thumbnail_key,
        };

        if let Some(repository) = &self.metadata_repository {
            let metadata = UploadMetadata {
                uuid: id,
                gallery: request.gallery,
                original_key: pair.original_key.clone(),
                thumbnail_key: pair.thumbnail_key.clone(),
                original_url: pair.original_url.clone(),
                thumbnail_url: pair.thumbnail_url.clone(),
                expiration_date,
                uploaded_at,
            };

            if let Err(e) = repository.create_metadata(&metadata).await {
                error!("Failed to record metadata for {}: {:?}", id, e);
                self.rollback(vec![pair.original_key.clone(), pair.thumbnail_key.clone()])
                    .await;
                return Err(e);
            }
        }

        Ok(pair)
    }

    /// CDN URLs of every thumbnail in the gallery, in key order.
    pub async fn list_thumbnails(&self, gallery: &str) -> Result<Vec<String>, ApplicationError> {
        validate("gallery", gallery)?;

        let keys = self
            .collect_keys(&gallery_prefix(Variant::Thumbnail, gallery))
            .await?;

        Ok(keys
            .iter()
            .map(|key| self.public_urls.cdn_url(key))
            .collect())
    }

    /// Deletes both variants of `file_name` (the id without extension).
    pub async fn delete_file(
        &self,
        gallery: &str,
        file_name: &str,
    ) -> Result<Vec<String>, ApplicationError> {
        validate("gallery", gallery)?;
        validate("file name", file_name)?;

        let mut keys = Vec::new();
        for variant in Variant::ALL {
            keys.extend(
                self.collect_keys(&file_prefix(variant, gallery, file_name))
                    .await?,
            );
        }

        let deleted = self.delete_keys(&keys).await?;
        info!(
            "Deleted {} object(s) named '{}' from gallery '{}'",
            deleted.len(),
            file_name,
            gallery
        );
        Ok(deleted)
    }

    /// Deletes every object under both variant prefixes of the gallery.
    pub async fn delete_gallery(&self, gallery: &str) -> Result<Vec<String>, ApplicationError> {
        validate("gallery", gallery)?;

        let mut keys = Vec::new();
        for variant in Variant::ALL {
            keys.extend(self.collect_keys(&gallery_prefix(variant, gallery)).await?);
        }

        let deleted = self.delete_keys(&keys).await?;
        info!(
            "Deleted gallery '{}' ({} object(s))",
            gallery,
            deleted.len()
        );
        Ok(deleted)
    }

    async fn store(&self, key: &str, file: FileData) -> Result<(), ApplicationError> {
        self.storage
            .put_object(key, file.content, file.mime_type.as_deref())
            .await
            .map_err(|e| {
                error!("Failed to store object {}: {:?}", key, e);
                e
            })
    }

    async fn collect_keys(&self, prefix: &str) -> Result<Vec<String>, ApplicationError> {
        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let page = self
                .storage
                .list_objects(prefix, continuation_token)
                .await?;
            keys.extend(page.keys);

            match page.next_continuation_token {
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        Ok(keys)
    }

    async fn delete_keys(&self, keys: &[String]) -> Result<Vec<String>, ApplicationError> {
        let mut deleted = Vec::with_capacity(keys.len());
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            deleted.extend(self.storage.delete_objects(batch).await?);
        }
        Ok(deleted)
    }

    async fn rollback(&self, keys: Vec<String>) {
        match self.delete_keys(&keys).await {
            Ok(deleted) => warn!("Rolled back partial upload: {:?}", deleted),
            Err(e) => warn!("Failed to roll back partial upload {:?}: {:?}", keys, e),
        }
    }
}

fn validate(field: &str, value: &str) -> Result<(), ApplicationError> {
    validate_segment(field, value).map_err(ApplicationError::BadRequest)
}

fn expiration_date(
    uploaded_at: DateTime<Utc>,
    expiring_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, ApplicationError> {
    let Some(days) = expiring_days else {
        return Ok(None);
    };

    if days < 0 {
        return Err(ApplicationError::BadRequest(
            "'expiringDay' must not be negative".to_string(),
        ));
    }

    Duration::try_days(days)
        .and_then(|offset| uploaded_at.checked_add_signed(offset))
        .map(Some)
        .ok_or_else(|| ApplicationError::BadRequest("'expiringDay' is out of range".to_string()))
}
