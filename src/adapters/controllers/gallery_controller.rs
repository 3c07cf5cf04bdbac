use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::gallery_dto::{
            DeleteFileRequest, DeleteFilesResponse, DeleteGalleryRequest, DeleteGalleryResponse,
            ShowGalleryQuery, UploadResponse,
        },
        extract::{multipart_error, multipart_rejection, FormData, QueryParams},
    },
    application::{
        error::ApplicationError,
        services::{GalleryService, UploadRequest},
    },
    domain::models::file::FileData,
};

const INDEX_PAGE: &str = include_str!("../../../static/index.html");

pub struct GalleryController;

impl GalleryController {
    /// GET /
    pub async fn index() -> Html<&'static str> {
        Html(INDEX_PAGE)
    }

    /// POST /upload
    /// Multipart: originalFile, thumbnailFile, gallery, optional expiringDay
    pub async fn upload(
        State(gallery_service): State<Arc<GalleryService>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadResponse>, ApplicationError> {
        let mut multipart = multipart.map_err(multipart_rejection)?;
        let mut original: Option<FileData> = None;
        let mut thumbnail: Option<FileData> = None;
        let mut gallery: Option<String> = None;
        let mut expiring_days: Option<i64> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid request format"))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "originalFile" | "thumbnailFile" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let mime_type = field.content_type().map(str::to_string);
                    let content: Bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, "Invalid file data"))?;

                    let file = FileData::new(content, filename, mime_type);
                    if name == "originalFile" {
                        original = Some(file);
                    } else {
                        thumbnail = Some(file);
                    }
                }
                "gallery" => {
                    gallery = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| multipart_error(e, "Invalid request data"))?,
                    );
                }
                "expiringDay" => {
                    let raw = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, "Invalid request data"))?;
                    let raw = raw.trim();
                    if !raw.is_empty() {
                        expiring_days = Some(raw.parse::<i64>().map_err(|_| {
                            ApplicationError::BadRequest(format!(
                                "'expiringDay' must be an integer, got '{}'",
                                raw
                            ))
                        })?);
                    }
                }
                _ => {}
            }
        }

        let request = UploadRequest {
            original: original.ok_or_else(|| missing("originalFile"))?,
            thumbnail: thumbnail.ok_or_else(|| missing("thumbnailFile"))?,
            gallery: gallery.ok_or_else(|| missing("gallery"))?,
            expiring_days,
        };

        let pair = gallery_service.upload(request).await?;
        info!(
            "Uploaded pair {} as {} and {}",
            pair.id, pair.original_key, pair.thumbnail_key
        );

        Ok(Json(UploadResponse::from(pair)))
    }

    /// GET /show?gallery=...
    pub async fn show(
        State(gallery_service): State<Arc<GalleryService>>,
        QueryParams(query): QueryParams<ShowGalleryQuery>,
    ) -> Result<Json<Vec<String>>, ApplicationError> {
        let urls = gallery_service.list_thumbnails(&query.gallery).await?;
        Ok(Json(urls))
    }

    /// DELETE /delete
    pub async fn delete_file(
        State(gallery_service): State<Arc<GalleryService>>,
        FormData(body): FormData<DeleteFileRequest>,
    ) -> Result<Json<DeleteFilesResponse>, ApplicationError> {
        let deleted = gallery_service
            .delete_file(&body.gallery_name, &body.file_name)
            .await?;
        Ok(Json(DeleteFilesResponse::from(deleted)))
    }

    /// DELETE /delete-gallery
    pub async fn delete_gallery(
        State(gallery_service): State<Arc<GalleryService>>,
        FormData(body): FormData<DeleteGalleryRequest>,
    ) -> Result<Json<DeleteGalleryResponse>, ApplicationError> {
        let deleted = gallery_service.delete_gallery(&body.gallery_name).await?;
        Ok(Json(DeleteGalleryResponse::new(&body.gallery_name, deleted)))
    }
}

fn missing(field: &str) -> ApplicationError {
    warn!("Missing required '{}' field in upload", field);
    ApplicationError::BadRequest(format!("Missing required field '{}'", field))
}
