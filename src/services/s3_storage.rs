use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    types::{Delete, ObjectIdentifier},
    Client,
};
use bytes::Bytes;
use tracing::{debug, error};

use crate::{
    application::{
        error::ApplicationError,
        services::{ObjectPage, StorageService},
    },
    domain::config::settings::S3Settings,
    services::error::StorageError,
};

const CREDENTIALS_PROVIDER: &str = "gallery-gateway-env";

pub struct S3StorageService {
    client: Client,
    bucket_name: String,
}

impl S3StorageService {
    pub fn new(settings: &S3Settings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials);

        // S3-compatible stores (MinIO, LocalStack) need path-style addressing.
        if let Some(endpoint_url) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket_name: settings.bucket_name.clone(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put_object(
        &self,
        key: &str,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), ApplicationError> {
        let size = content.len();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(content))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(StorageError::from)?;

        debug!("Stored s3://{}/{} ({} bytes)", self.bucket_name, key, size);
        Ok(())
    }

    async fn list_objects(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, ApplicationError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .prefix(prefix)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(StorageError::from)?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        let next_continuation_token = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            keys,
            next_continuation_token,
        })
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<Vec<String>, ApplicationError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(false)
            .build()
            .map_err(StorageError::from)?;

        let output = self
            .client
            .delete_objects()
            .bucket(&self.bucket_name)
            .delete(delete)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !output.errors().is_empty() {
            for failure in output.errors() {
                error!(
                    "Failed to delete {}: {} {}",
                    failure.key().unwrap_or("<unknown>"),
                    failure.code().unwrap_or("Unknown"),
                    failure.message().unwrap_or_default()
                );
            }
            return Err(StorageError::ProviderError(format!(
                "{} of {} object(s) could not be deleted",
                output.errors().len(),
                keys.len()
            ))
            .into());
        }

        Ok(output
            .deleted()
            .iter()
            .filter_map(|deleted| deleted.key().map(str::to_string))
            .collect())
    }

    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}
