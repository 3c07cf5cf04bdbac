mod adapters;
mod application;
mod domain;
mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use adapters::{
    repositories::RedisMetadataRepository,
    router::{build_router, cors_layer},
    state::AppState,
};
use application::{repositories::metadata_repository::MetadataRepository, services::GalleryService};
use domain::config::settings::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Initialize AWS SDK crypto provider (required for aws-sdk-s3)
    // This must be called before any AWS SDK operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let settings = Settings::from_env().expect("ERROR: Invalid configuration");

    tracing::info!(
        "Starting gallery-gateway for bucket '{}'",
        settings.s3.bucket_name
    );

    let storage_service = services::create_storage_service(&settings.s3);

    let metadata_repository = match &settings.metadata {
        Some(metadata) => {
            tracing::info!("Connecting to metadata store...");
            let redis_client = redis::Client::open(metadata.redis_url.as_str())
                .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
            let redis_conn_manager = redis::aio::ConnectionManager::new(redis_client)
                .await
                .expect(
                    "ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity.",
                );
            tracing::info!(
                "Metadata store connected, writing to '{}'",
                metadata.table_name
            );
            Some(Arc::new(RedisMetadataRepository::new(
                redis_conn_manager,
                metadata.table_name.clone(),
            )) as Arc<dyn MetadataRepository>)
        }
        None => {
            tracing::info!("REDIS_URL not set, upload metadata will not be recorded");
            None
        }
    };

    let app_state = AppState {
        gallery_service: Arc::new(GalleryService::new(
            storage_service,
            metadata_repository,
            settings.public_urls.clone(),
        )),
    };

    let router = build_router(
        app_state,
        cors_layer(&settings.cors_allowed_origins),
        settings.max_upload_bytes,
    );

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", settings.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
