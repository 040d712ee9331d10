use std::path::PathBuf;

use crate::domain::{AppError, GeneratedBundle};

/// Location of a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProject {
    pub slug: String,
    pub path: PathBuf,
}

/// Persistence for generated project bundles.
///
/// Implementations must be all-or-nothing: after a failed `save` no partial
/// project is visible.
pub trait ProjectStore: Send + Sync {
    /// Store every file of `bundle` under its project slug.
    ///
    /// Fails with `AppError::ProjectExists` if the slug is already taken.
    fn save(&self, bundle: &GeneratedBundle) -> Result<StoredProject, AppError>;
}
