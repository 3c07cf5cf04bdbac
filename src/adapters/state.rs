use axum::extract::FromRef;
use std::sync::Arc;

use crate::application::services::GalleryService;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub gallery_service: Arc<GalleryService>,
}
