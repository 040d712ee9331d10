//! Ancillary project documents rendered from the embedded templates.

use chrono::{DateTime, Datelike, Utc};
use minijinja::{Environment, Value, context};

use crate::adapters::assets::{
    build_template_environment, document_templates, render_template_by_name,
};
use crate::domain::{AppError, BundleFile, Project};

/// Output path, source template, and mode of one document.
struct DocumentEntry {
    path: &'static str,
    template: &'static str,
    executable: bool,
    /// Only emitted for projects that include the WordPress setup scripts.
    setup_script: bool,
}

impl DocumentEntry {
    const fn text(path: &'static str, template: &'static str) -> Self {
        Self { path, template, executable: false, setup_script: false }
    }

    const fn script(path: &'static str, template: &'static str) -> Self {
        Self { path, template, executable: true, setup_script: false }
    }

    const fn setup_script(path: &'static str, template: &'static str) -> Self {
        Self { path, template, executable: true, setup_script: true }
    }
}

const DOCUMENTS: &[DocumentEntry] = &[
    DocumentEntry::text("README.md", "README.md.j2"),
    DocumentEntry::script("prerequisites.sh", "prerequisites.sh.j2"),
    DocumentEntry::text("LICENSE", "LICENSE.j2"),
    DocumentEntry::text(".gitignore", "gitignore.j2"),
    DocumentEntry::text(".dockerignore", "dockerignore.j2"),
    DocumentEntry::text("CHANGELOG.md", "CHANGELOG.md.j2"),
    DocumentEntry::text("ROADMAP.md", "ROADMAP.md.j2"),
    DocumentEntry::text("CONTRIBUTING.md", "CONTRIBUTING.md.j2"),
    DocumentEntry::text("CODE_OF_CONDUCT.md", "CODE_OF_CONDUCT.md.j2"),
    DocumentEntry::text("SECURITY.md", "SECURITY.md.j2"),
    DocumentEntry::setup_script("woo.sh", "woo.sh.j2"),
    DocumentEntry::setup_script("cert.sh", "cert.sh.j2"),
];

/// Renders every ancillary document for a project.
pub struct DocumentRenderer {
    env: Environment<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self, AppError> {
        let env = build_template_environment(&document_templates())?;
        Ok(Self { env })
    }

    /// Render all documents that apply to the project's profile.
    ///
    /// `generated_at` is the only input besides the project, so equal inputs
    /// give byte-identical documents.
    pub fn render_all(
        &self,
        project: &Project,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<BundleFile>, AppError> {
        let ctx = context! {
            project => Value::from_serialize(project.context()),
            version => env!("CARGO_PKG_VERSION"),
            generated_at => generated_at.format("%Y-%m-%d").to_string(),
            year => generated_at.year(),
        };
        let setup_scripts = project.profile().includes_extras();

        DOCUMENTS
            .iter()
            .filter(|doc| setup_scripts || !doc.setup_script)
            .map(|doc| -> Result<BundleFile, AppError> {
                let content = render_template_by_name(&self.env, doc.template, &ctx)?;
                Ok(if doc.executable {
                    BundleFile::executable(doc.path, content)
                } else {
                    BundleFile::new(doc.path, content)
                })
            })
            .collect()
    }
}
