//! In-memory doubles for the storage and metadata seams.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    application::{
        error::ApplicationError,
        repositories::metadata_repository::MetadataRepository,
        services::{GalleryService, ObjectPage, StorageService},
    },
    domain::{config::settings::PublicUrls, models::metadata::UploadMetadata},
};

pub const BUCKET: &str = "test-bucket";
pub const BUCKET_URL: &str = "https://test-bucket.s3.amazonaws.com";
pub const CDN: &str = "https://cdn.test";

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content: Bytes,
    pub content_type: Option<String>,
}

/// Lexicographically ordered key space with S3-like paging. Continuation
/// tokens are the last key of the previous page.
pub struct InMemoryStorage {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    page_size: usize,
    failing_prefix: Mutex<Option<String>>,
    delete_calls: AtomicUsize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size,
            failing_prefix: Mutex::new(None),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, key: &str, content: &'static [u8]) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                content: Bytes::from_static(content),
                content_type: None,
            },
        );
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Makes every subsequent put under `prefix` fail.
    pub fn fail_puts_under(&self, prefix: &str) {
        *self.failing_prefix.lock().unwrap() = Some(prefix.to_string());
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), ApplicationError> {
        if let Some(prefix) = self.failing_prefix.lock().unwrap().as_deref() {
            if key.starts_with(prefix) {
                return Err(ApplicationError::InternalError(format!(
                    "Storage error: put rejected for {}",
                    key
                )));
            }
        }
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                content,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn list_objects(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, ApplicationError> {
        let objects = self.objects.lock().unwrap();
        let mut matching = objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .filter(|k| {
                continuation_token
                    .as_deref()
                    .map_or(true, |token| k.as_str() > token)
            });

        let keys: Vec<String> = matching.by_ref().take(self.page_size).cloned().collect();
        let next_continuation_token = if matching.next().is_some() {
            keys.last().cloned()
        } else {
            None
        };

        Ok(ObjectPage {
            keys,
            next_continuation_token,
        })
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<Vec<String>, ApplicationError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut objects = self.objects.lock().unwrap();
        Ok(keys
            .iter()
            .filter(|k| objects.remove(k.as_str()).is_some())
            .cloned()
            .collect())
    }

    fn bucket_name(&self) -> &str {
        BUCKET
    }
}

#[derive(Default)]
pub struct InMemoryMetadataRepository {
    entries: Mutex<Vec<UploadMetadata>>,
    failing: AtomicBool,
}

impl InMemoryMetadataRepository {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: AtomicBool::new(true),
        }
    }

    pub fn entries(&self) -> Vec<UploadMetadata> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataRepository for InMemoryMetadataRepository {
    async fn create_metadata(&self, metadata: &UploadMetadata) -> Result<(), ApplicationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError(
                "metadata store unavailable".to_string(),
            ));
        }
        self.entries.lock().unwrap().push(metadata.clone());
        Ok(())
    }
}

pub fn public_urls() -> PublicUrls {
    PublicUrls::new(BUCKET_URL, CDN)
}

pub fn gallery_service(storage: Arc<InMemoryStorage>) -> GalleryService {
    GalleryService::new(storage, None, public_urls())
}

pub fn gallery_service_with_metadata(
    storage: Arc<InMemoryStorage>,
    metadata: Arc<InMemoryMetadataRepository>,
) -> GalleryService {
    GalleryService::new(
        storage,
        Some(metadata as Arc<dyn MetadataRepository>),
        public_urls(),
    )
}
