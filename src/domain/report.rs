//! Plain-text credentials report.

use std::fmt;

use serde::Serialize;

/// First line of every rendered report.
pub const SENSITIVE_WARNING: &str =
    "WARNING: This file contains sensitive information. Do not commit or share it.";

/// One labelled value shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub label: String,
    pub value: String,
    /// Generated secret that must also appear in the manifest.
    pub secret: bool,
}

impl Credential {
    pub fn info(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into(), secret: false }
    }

    pub fn secret(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into(), secret: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub service_name: String,
    pub entries: Vec<Credential>,
}

/// Human-readable summary of every generated service and its credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsReport {
    pub project: String,
    pub title: String,
    pub host: String,
    pub sections: Vec<ReportSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_digest: Option<String>,
}

impl CredentialsReport {
    /// Every secret value, in report order.
    pub fn secrets(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .filter(|entry| entry.secret)
            .map(|entry| entry.value.as_str())
    }

    pub fn with_manifest_digest(mut self, digest: String) -> Self {
        self.manifest_digest = Some(digest);
        self
    }
}

impl fmt::Display for CredentialsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SENSITIVE_WARNING)?;
        writeln!(f)?;
        writeln!(f, "{} ({})", self.title, self.host)?;
        writeln!(f, "Project: {}", self.project)?;
        if let Some(digest) = &self.manifest_digest {
            writeln!(f, "Manifest SHA-256: {}", digest)?;
        }

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            writeln!(f, "{}", "-".repeat(section.title.len()))?;
            for entry in &section.entries {
                writeln!(f, "{}: {}", entry.label, entry.value)?;
            }
        }
        Ok(())
    }
}
