use super::RequestsLoggingLevel;
use crate::config::{AppConfig, DEFAULT_MAX_UPLOAD_SIZE_MB, DEFAULT_PORT, DEFAULT_STORAGE_PATH};
use std::path::PathBuf;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub storage_path: PathBuf,
    pub frontend_dir_path: Option<String>,
    pub max_page_limit: Option<usize>,
    pub max_upload_size_mb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: DEFAULT_PORT,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            frontend_dir_path: None,
            max_page_limit: None,
            max_upload_size_mb: DEFAULT_MAX_UPLOAD_SIZE_MB,
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        ServerConfig {
            requests_logging_level: config.logging_level.clone(),
            port: config.port,
            storage_path: config.storage_path.clone(),
            frontend_dir_path: config.frontend_dir_path.clone(),
            max_page_limit: config.max_page_limit,
            max_upload_size_mb: config.max_upload_size_mb,
        }
    }
}
