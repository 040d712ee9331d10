//! `woopy gen`: request artifacts for a company directory from a running server.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::AppError;
use crate::ports::{ArtifactKind, GeneratorClient};

const ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Directory holding the company's `.env`; the artifact is written next to it.
    pub company_dir: PathBuf,
    pub kind: ArtifactKind,
    pub force: bool,
}

/// Post `<company>/.env` to the generator and write the response into the same directory.
///
/// Returns the path of the written file.
pub fn execute<C: GeneratorClient + ?Sized>(
    client: &C,
    options: &FetchOptions,
) -> Result<PathBuf, AppError> {
    let env_path = options.company_dir.join(ENV_FILE);
    if !env_path.is_file() {
        return Err(AppError::InputNotFound(env_path.display().to_string()));
    }

    let output = options.company_dir.join(options.kind.file_name());
    ensure_writable(&output, options.force)?;

    let env_text = fs::read_to_string(&env_path)?;
    let body = client.generate(&env_text, options.kind)?;
    fs::write(&output, &body)?;

    info!(path = %output.display(), bytes = body.len(), "artifact written");
    Ok(output)
}

fn ensure_writable(path: &Path, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        return Err(AppError::OutputExists(path.display().to_string()));
    }
    Ok(())
}
