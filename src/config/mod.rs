mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_PATH: &str = "audio_files";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_METRICS_PORT: u16 = 9091;
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 50;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub storage_path: PathBuf,
    pub segments_file: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub max_page_limit: Option<usize>,
    pub max_upload_size_mb: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            segments_file: None,
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            logging_level: RequestsLoggingLevel::Path,
            frontend_dir_path: None,
            max_page_limit: None,
            max_upload_size_mb: DEFAULT_MAX_UPLOAD_SIZE_MB,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the audio files referenced by segments.
    pub storage_path: PathBuf,
    /// JSON file with the segment collection. The demo fixture is used when unset.
    pub segments_file: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    /// Upper bound for the `limit` pagination parameter. Unbounded when unset.
    pub max_page_limit: Option<usize>,
    /// Advertised by the root endpoint only, there is no upload path.
    pub max_upload_size_mb: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let storage_path = file
            .storage_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.storage_path.clone());
        if storage_path.exists() && !storage_path.is_dir() {
            bail!("storage_path is not a directory: {:?}", storage_path);
        }

        let segments_file = file
            .segments_file
            .map(PathBuf::from)
            .or_else(|| cli.segments_file.clone());
        if let Some(segments_file) = segments_file.as_ref() {
            if !segments_file.is_file() {
                bail!("Segments file does not exist: {:?}", segments_file);
            }
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port {
            bail!("port and metrics_port must differ, both are {}", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let max_page_limit = file.max_page_limit.or(cli.max_page_limit);
        if max_page_limit == Some(0) {
            bail!("max_page_limit must be greater than zero");
        }

        let max_upload_size_mb = file.max_upload_size_mb.unwrap_or(cli.max_upload_size_mb);

        Ok(Self {
            storage_path,
            segments_file,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            max_page_limit,
            max_upload_size_mb,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
