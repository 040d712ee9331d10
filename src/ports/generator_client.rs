use crate::domain::AppError;

/// Artifact requested from a generator server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `docker-compose.yml` only.
    Manifest,
    /// Zip archive with the manifest and every document.
    Bundle,
    /// Plain-text credentials report.
    Report,
}

impl ArtifactKind {
    pub fn path(&self) -> &'static str {
        match self {
            ArtifactKind::Manifest => "/dc",
            ArtifactKind::Bundle => "/",
            ArtifactKind::Report => "/report",
        }
    }

    /// Default file name for the artifact on disk.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Manifest => "docker-compose.yml",
            ArtifactKind::Bundle => "project.zip",
            ArtifactKind::Report => "credentials.txt",
        }
    }
}

/// Remote generator endpoint.
pub trait GeneratorClient {
    /// Send `.env` text and return the raw artifact bytes.
    fn generate(&self, env_text: &str, kind: ArtifactKind) -> Result<Vec<u8>, AppError>;
}
