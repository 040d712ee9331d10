//! Request-to-artifact pipeline shared by the server and `woopy render`.

use chrono::{DateTime, Utc};
use rand::RngCore;
use tracing::info;

use crate::app::documents::DocumentRenderer;
use crate::domain::bundle::sha256_hex;
use crate::domain::{
    AppError, BundleFile, CredentialGenerator, CredentialsReport, EnvInput, GeneratedBundle,
    Project, SiteSpec,
};

pub const MANIFEST_FILE: &str = "docker-compose.yml";
pub const REPORT_FILE: &str = "credentials.txt";

/// Manifest and report of one project, before any documents are rendered.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub project: Project,
    pub manifest: String,
    pub report: CredentialsReport,
}

/// Parse the `.env` body and build the project graph.
pub fn build_project<R: RngCore>(
    env_text: &str,
    generator: &mut CredentialGenerator<R>,
) -> Result<Project, AppError> {
    let env = EnvInput::parse(env_text)?;
    let site = SiteSpec::from_env(&env)?;
    Ok(Project::build(site, generator))
}

/// Render the manifest and its matching credentials report.
pub fn artifacts<R: RngCore>(
    env_text: &str,
    generator: &mut CredentialGenerator<R>,
) -> Result<Artifacts, AppError> {
    let project = build_project(env_text, generator)?;
    let manifest = project.manifest()?.to_yaml()?;
    let report = project.credentials_report().with_manifest_digest(sha256_hex(&manifest));

    info!(project = %project.slug(), services = project.services().len(), "project assembled");
    Ok(Artifacts { project, manifest, report })
}

/// Full project bundle: manifest, credentials report and documents.
pub fn bundle<R: RngCore>(
    env_text: &str,
    generator: &mut CredentialGenerator<R>,
    renderer: &DocumentRenderer,
    generated_at: DateTime<Utc>,
) -> Result<GeneratedBundle, AppError> {
    let Artifacts { project, manifest, report } = artifacts(env_text, generator)?;

    let mut bundle = GeneratedBundle::new(project.slug());
    bundle.push(BundleFile::new(MANIFEST_FILE, manifest));
    bundle.push(BundleFile::new(REPORT_FILE, report.to_string()));
    for file in renderer.render_all(&project, generated_at)? {
        bundle.push(file);
    }

    Ok(bundle)
}
