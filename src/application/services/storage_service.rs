use async_trait::async_trait;
use bytes::Bytes;

use crate::application::error::ApplicationError;

/// One page of a prefix listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    /// Present when more keys remain under the same prefix.
    pub next_continuation_token: Option<String>,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), ApplicationError>;

    async fn list_objects(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, ApplicationError>;

    /// Removes the given keys and returns those the store reported as deleted.
    async fn delete_objects(&self, keys: &[String]) -> Result<Vec<String>, ApplicationError>;

    fn bucket_name(&self) -> &str;
}
