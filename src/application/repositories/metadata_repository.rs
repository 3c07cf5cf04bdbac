use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::metadata::UploadMetadata};

#[async_trait]
pub trait MetadataRepository: Send + Sync {
    async fn create_metadata(&self, metadata: &UploadMetadata) -> Result<(), ApplicationError>;
}
