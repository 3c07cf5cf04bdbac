pub mod gallery_service;
pub mod storage_service;

pub use gallery_service::{GalleryService, UploadRequest};
pub use storage_service::{ObjectPage, StorageService};
