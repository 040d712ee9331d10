//! `woopy render`: offline generation straight into a project directory.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::RngCore;
use tracing::info;

use crate::app::commands::generate;
use crate::app::documents::DocumentRenderer;
use crate::domain::{AppError, CredentialGenerator};
use crate::ports::{ProjectStore, StoredProject};

/// Generate the project described by `env_file` and save it through `store`.
pub fn execute<S: ProjectStore + ?Sized>(
    store: &S,
    env_file: &Path,
) -> Result<StoredProject, AppError> {
    let renderer = DocumentRenderer::new()?;
    execute_with(store, env_file, &mut CredentialGenerator::new(), &renderer, Utc::now())
}

pub fn execute_with<S, R>(
    store: &S,
    env_file: &Path,
    generator: &mut CredentialGenerator<R>,
    renderer: &DocumentRenderer,
    generated_at: DateTime<Utc>,
) -> Result<StoredProject, AppError>
where
    S: ProjectStore + ?Sized,
    R: RngCore,
{
    if !env_file.is_file() {
        return Err(AppError::InputNotFound(env_file.display().to_string()));
    }
    let env_text = fs::read_to_string(env_file)?;

    let bundle = generate::bundle(&env_text, generator, renderer, generated_at)?;
    let stored = store.save(&bundle)?;

    info!(project = %stored.slug, path = %stored.path.display(), "project rendered");
    Ok(stored)
}
