use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use emotion_annotation_server::config::{
    self, AppConfig, FileConfig, DEFAULT_MAX_UPLOAD_SIZE_MB, DEFAULT_METRICS_PORT, DEFAULT_PORT,
    DEFAULT_STORAGE_PATH,
};
use emotion_annotation_server::segment_store::{InMemorySegmentStore, SegmentStore};
use emotion_annotation_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the segments' audio files. Created if missing.
    /// Kept as given, relative paths resolve against the working directory.
    #[clap(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: PathBuf,

    /// JSON file with the segment collection. The built-in demo fixture is used if omitted.
    #[clap(long, value_parser = parse_path)]
    pub segments_file: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    /// When set, the API moves under /api.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Upper bound for the `limit` pagination parameter. Unbounded if omitted.
    #[clap(long)]
    pub max_page_limit: Option<usize>,

    /// Maximum upload size advertised by the root endpoint, in megabytes.
    #[clap(long, default_value_t = DEFAULT_MAX_UPLOAD_SIZE_MB)]
    pub max_upload_size_mb: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            storage_path: args.storage_path.clone(),
            segments_file: args.segments_file.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            max_page_limit: args.max_page_limit,
            max_upload_size_mb: args.max_upload_size_mb,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize tracing")?;

    let file_config = match cli_args.config.as_ref() {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&config::CliConfig::from(&cli_args), file_config)?;

    std::fs::create_dir_all(&app_config.storage_path).with_context(|| {
        format!(
            "Failed to create storage directory {:?}",
            app_config.storage_path
        )
    })?;
    info!("Audio storage directory: {:?}", app_config.storage_path);

    let segment_store = match app_config.segments_file.as_ref() {
        Some(path) => InMemorySegmentStore::load(path)?,
        None => {
            info!("No segments file configured, using the demo fixture");
            InMemorySegmentStore::with_demo_fixture()
        }
    };
    info!("Serving {} segments", segment_store.get_segments_count());

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::set_segments_count(segment_store.get_segments_count());

    if let Some(max) = app_config.max_page_limit {
        info!("Page size capped at {} segments", max);
    }

    run_server(
        ServerConfig::from(&app_config),
        Arc::new(segment_store),
        app_config.metrics_port,
    )
    .await
}
