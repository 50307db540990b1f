pub mod config;
pub mod error;
mod http_layers;
pub mod metrics;
mod segment_file;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use http_layers::*;
pub use server::{make_app, run_server};
