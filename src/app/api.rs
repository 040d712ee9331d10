//! API facade for the application.
//!
//! Wires configuration and adapters to the command implementations.

use std::path::{Path, PathBuf};

use crate::adapters::{FilesystemProjectStore, HttpGeneratorClient};
use crate::app::commands::fetch::{self, FetchOptions};
use crate::app::commands::render;
use crate::app::config::{ClientConfig, ServerConfig, ServerOverrides};
use crate::app::server;

pub use crate::domain::AppError;
pub use crate::ports::{ArtifactKind, StoredProject};

/// Run the HTTP server until Ctrl-C.
///
/// Builds its own multi-threaded runtime; the other commands are synchronous.
pub fn serve(config_path: Option<&Path>, overrides: ServerOverrides) -> Result<(), AppError> {
    let config = ServerConfig::load(config_path, overrides)?;
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(server::serve(config))
}

/// Request an artifact for `<company_dir>/.env` from a woopy server.
pub fn fetch(
    company_dir: impl Into<PathBuf>,
    client_config: &ClientConfig,
    kind: ArtifactKind,
    force: bool,
) -> Result<PathBuf, AppError> {
    let client =
        HttpGeneratorClient::new(client_config.server_url.clone(), client_config.timeout)?;
    let options = FetchOptions { company_dir: company_dir.into(), kind, force };
    fetch::execute(&client, &options)
}

/// Generate a project offline and write it under `out`, or the configured home.
pub fn render(env_file: &Path, out: Option<PathBuf>) -> Result<StoredProject, AppError> {
    let root = match out {
        Some(dir) => dir,
        None => ServerConfig::load(None, ServerOverrides::default())?.home,
    };
    let store = FilesystemProjectStore::new(root);
    render::execute(&store, env_file)
}
