mod redis_metadata_repository;

pub use redis_metadata_repository::RedisMetadataRepository;
