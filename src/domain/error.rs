use std::io;

use thiserror::Error;

/// Library-wide error type for woopy operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A request body line could not be read as `KEY=VALUE`.
    #[error("Malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A required environment key is absent or empty.
    #[error("Missing required key '{0}'")]
    MissingField(String),

    /// A required key is present but its value is unusable.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidField { key: String, reason: String },

    /// Unknown `SITE_PROFILE` value.
    #[error("Invalid profile '{0}': must be one of full, core")]
    InvalidProfile(String),

    /// The rendered manifest references something it does not declare.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// A project directory with the same name is already present.
    #[error("Project '{0}' already exists")]
    ProjectExists(String),

    /// Output file exists and overwriting was not requested.
    #[error("File {0} already exists. Use --force to overwrite it.")]
    OutputExists(String),

    /// Input file required by a command is absent.
    #[error("File {0} does not exist")]
    InputNotFound(String),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template registration or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Zip archive could not be written.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Generator server rejected or failed a request.
    #[error("Generator API error{}: {message}", status_suffix(.status))]
    GeneratorApi { message: String, status: Option<u16> },

    /// Internal invariant failure.
    #[error("Internal error: {0}")]
    InternalError(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({})", code)).unwrap_or_default()
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether the error was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedInput { .. }
                | AppError::MissingField(_)
                | AppError::InvalidField { .. }
                | AppError::InvalidProfile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_client_errors() {
        assert!(AppError::MissingField("SITE_TITLE".into()).is_client_error());
        assert!(AppError::InvalidProfile("tiny".into()).is_client_error());
        assert!(
            AppError::MalformedInput { line: 2, reason: "missing '='".into() }.is_client_error()
        );
        assert!(!AppError::ProjectExists("acme".into()).is_client_error());
        assert!(!AppError::Io(io::Error::other("disk")).is_client_error());
    }

    #[test]
    fn generator_api_message_includes_status() {
        let err = AppError::GeneratorApi { message: "boom".into(), status: Some(502) };
        assert_eq!(err.to_string(), "Generator API error (502): boom");

        let err = AppError::GeneratorApi { message: "refused".into(), status: None };
        assert_eq!(err.to_string(), "Generator API error: refused");
    }
}
