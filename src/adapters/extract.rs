use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        FromRequest, FromRequestParts, Multipart, Query, Request,
    },
    http::{header, request::Parts, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::application::error::ApplicationError;

/// Form body accepted either urlencoded or as `multipart/form-data` text
/// fields, which is what browser `FormData` submissions send.
#[derive(Debug)]
pub struct FormData<T>(pub T);

impl<S, T> FromRequest<S> for FormData<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApplicationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return ApplicationError::PayloadTooLarge;
                }
                warn!("Invalid form body: {}", e);
                ApplicationError::BadRequest(e.body_text())
            })?;
            return Ok(FormData(value));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(multipart_rejection)?;

        let mut fields = Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid request format"))?
        {
            let name = field.name().unwrap_or("").to_string();
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, "Invalid request data"))?;
            fields.insert(name, Value::String(value));
        }

        serde_json::from_value(Value::Object(fields))
            .map(FormData)
            .map_err(|e| ApplicationError::BadRequest(format!("Invalid form fields: {}", e)))
    }
}

/// Query string extractor whose rejection is an [`ApplicationError`].
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!("Invalid query string: {}", e);
                ApplicationError::BadRequest(e.body_text())
            })?;
        Ok(QueryParams(value))
    }
}

pub fn multipart_rejection(rejection: MultipartRejection) -> ApplicationError {
    warn!("Invalid multipart body: {}", rejection);
    ApplicationError::BadRequest("Expected a multipart/form-data body".to_string())
}

/// Maps a failure while reading multipart fields; a body over the configured
/// limit becomes [`ApplicationError::PayloadTooLarge`].
pub fn multipart_error(error: MultipartError, message: &str) -> ApplicationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", error);
    ApplicationError::BadRequest(message.to_string())
}
