//! woopy: assemble docker-compose projects, credentials reports and setup documents
//! for self-hosted WordPress/WooCommerce sites.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{ArtifactKind, StoredProject, fetch, render, serve};
pub use app::commands::generate::{Artifacts, artifacts, bundle};
pub use app::config::{ClientConfig, ServerConfig, ServerOverrides};
pub use app::documents::DocumentRenderer;
pub use app::server::{AppState, router};
pub use domain::{AppError, CredentialGenerator, CredentialsReport, GeneratedBundle, Project};
