use serde::{Deserialize, Serialize};

use crate::domain::models::upload::UploadedPair;

#[derive(Debug, Deserialize)]
pub struct ShowGalleryQuery {
    pub gallery: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFileRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "galleryName")]
    pub gallery_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteGalleryRequest {
    #[serde(rename = "galleryName")]
    pub gallery_name: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub original_url: String,
    pub thumbnail_url: String,
}

impl From<UploadedPair> for UploadResponse {
    fn from(pair: UploadedPair) -> Self {
        Self {
            original_url: pair.original_url,
            thumbnail_url: pair.thumbnail_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteFilesResponse {
    pub deleted_files: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for DeleteFilesResponse {
    fn from(deleted_files: Vec<String>) -> Self {
        Self {
            count: deleted_files.len(),
            deleted_files,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteGalleryResponse {
    pub message: String,
    pub deleted_files: Vec<String>,
    pub count: usize,
}

impl DeleteGalleryResponse {
    pub fn new(gallery: &str, deleted_files: Vec<String>) -> Self {
        Self {
            message: format!("Gallery '{}' deleted", gallery),
            count: deleted_files.len(),
            deleted_files,
        }
    }
}
