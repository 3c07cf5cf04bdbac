use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://127.0.0.1:5500";
const DEFAULT_METADATA_TABLE: &str = "image_metadata";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataSettings {
    pub redis_url: String,
    pub table_name: String,
}

/// Base URLs used to turn object keys into links handed back to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicUrls {
    pub bucket_base_url: String,
    pub cdn_domain: String,
}

impl PublicUrls {
    pub fn new(bucket_base_url: impl Into<String>, cdn_domain: impl Into<String>) -> Self {
        Self {
            bucket_base_url: bucket_base_url.into().trim_end_matches('/').to_string(),
            cdn_domain: cdn_domain.into().trim_end_matches('/').to_string(),
        }
    }

    /// Direct bucket URL, returned from uploads.
    pub fn bucket_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_base_url, key)
    }

    /// Content-delivery URL, returned from listings.
    pub fn cdn_url(&self, key: &str) -> String {
        format!("{}/{}", self.cdn_domain, key)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub s3: S3Settings,
    pub public_urls: PublicUrls,
    pub metadata: Option<MetadataSettings>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let port = match optional("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match optional("MAX_UPLOAD_BYTES") {
            Some(value) => value.parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: "MAX_UPLOAD_BYTES",
                value,
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let cors_allowed_origins = optional("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let s3 = S3Settings {
            region: required("AWS_REGION")?,
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            bucket_name: required("S3_BUCKET_NAME")?,
            endpoint_url: optional("AWS_ENDPOINT_URL"),
        };

        let bucket_base_url = optional("S3_PUBLIC_URL")
            .unwrap_or_else(|| format!("https://{}.s3.amazonaws.com", s3.bucket_name));
        let public_urls = PublicUrls::new(bucket_base_url, required("CDN_DOMAIN")?);

        let metadata = optional("REDIS_URL").map(|redis_url| MetadataSettings {
            redis_url,
            table_name: optional("METADATA_TABLE")
                .unwrap_or_else(|| DEFAULT_METADATA_TABLE.to_string()),
        });

        Ok(Self {
            port,
            cors_allowed_origins,
            max_upload_bytes,
            s3,
            public_urls,
            metadata,
        })
    }
}
