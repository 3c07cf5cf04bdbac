mod error;
mod s3_storage;

pub use s3_storage::S3StorageService;

use std::sync::Arc;

use crate::{application::services::StorageService, domain::config::settings::S3Settings};

pub fn create_storage_service(settings: &S3Settings) -> Arc<dyn StorageService> {
    tracing::info!(
        "Using S3 bucket '{}' in region {}{}",
        settings.bucket_name,
        settings.region,
        settings
            .endpoint_url
            .as_deref()
            .map(|url| format!(" via {}", url))
            .unwrap_or_default()
    );
    Arc::new(S3StorageService::new(settings))
}
