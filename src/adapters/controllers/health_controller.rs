use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use sysinfo::System;
use tracing::debug;

use crate::application::services::GalleryService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub bucket: String,
    #[serde(rename = "metadataStore")]
    pub metadata_store: bool,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(
        State(gallery_service): State<Arc<GalleryService>>,
    ) -> Json<HealthResponse> {
        debug!("Health check requested");

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            bucket: gallery_service.bucket_name().to_string(),
            metadata_store: gallery_service.has_metadata_store(),
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
