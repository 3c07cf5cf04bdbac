use std::fmt;

use aws_sdk_s3::error::{BuildError, ProvideErrorMetadata, SdkError};
use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(msg)
            | StorageError::Unauthorized(msg)
            | StorageError::NetworkError(msg)
            | StorageError::InvalidCredentials(msg)
            | StorageError::ProviderError(msg)
            | StorageError::InternalError(msg) => {
                ApplicationError::InternalError(format!("Storage error: {}", msg))
            }
        }
    }
}

impl<E, R> From<SdkError<E, R>> for StorageError
where
    E: ProvideErrorMetadata + fmt::Debug,
    R: fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        match &error {
            SdkError::TimeoutError(_) => StorageError::NetworkError("Request timeout".to_string()),
            SdkError::DispatchFailure(failure) => {
                StorageError::NetworkError(format!("Connection failed: {:?}", failure))
            }
            SdkError::ServiceError(context) => {
                let err = context.err();
                let code = err.code().unwrap_or("Unknown");
                let message = err.message().unwrap_or_default().to_string();
                classify_service_error(code, message)
            }
            _ => StorageError::InternalError(format!("{:?}", error)),
        }
    }
}

impl From<BuildError> for StorageError {
    fn from(error: BuildError) -> Self {
        StorageError::InternalError(error.to_string())
    }
}

fn classify_service_error(code: &str, message: String) -> StorageError {
    match code {
        "NoSuchKey" | "NoSuchBucket" | "NotFound" => {
            StorageError::NotFound(format!("{}: {}", code, message))
        }
        "AccessDenied" | "AllAccessDisabled" | "ExpiredToken" => {
            StorageError::Unauthorized(format!("{}: {}", code, message))
        }
        "InvalidAccessKeyId" | "SignatureDoesNotMatch" => {
            StorageError::InvalidCredentials(format!("{}: {}", code, message))
        }
        _ => StorageError::ProviderError(format!("{}: {}", code, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_codes_are_classified() {
        assert!(matches!(
            classify_service_error("NoSuchBucket", String::new()),
            StorageError::NotFound(_)
        ));
        assert!(matches!(
            classify_service_error("AccessDenied", String::new()),
            StorageError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_service_error("SignatureDoesNotMatch", String::new()),
            StorageError::InvalidCredentials(_)
        ));
        assert!(matches!(
            classify_service_error("SlowDown", "Reduce your request rate".to_string()),
            StorageError::ProviderError(msg) if msg == "SlowDown: Reduce your request rate"
        ));
    }

    #[test]
    fn provider_failures_surface_as_internal_errors() {
        let err: ApplicationError = StorageError::ProviderError("boom".to_string()).into();
        assert!(matches!(err, ApplicationError::InternalError(msg) if msg == "Storage error: boom"));

        let err: ApplicationError =
            StorageError::NotFound("NoSuchBucket: missing".to_string()).into();
        assert!(matches!(
            err,
            ApplicationError::InternalError(msg) if msg == "Storage error: NoSuchBucket: missing"
        ));
    }
}
