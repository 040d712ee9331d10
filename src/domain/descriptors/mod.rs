//! One record per infrastructure service.
//!
//! Descriptors are built once per project from the site identity and the
//! snapshots of the descriptors they depend on. Each one renders into the
//! shared [`ServiceBlock`] model; nothing here performs I/O.

mod admin;
mod application;
mod cache;
mod certbot;
mod code;
mod database;
mod graphviz;
mod mail;
mod management;
mod monitoring;
mod proxy;
mod vault;
mod website;
mod wpcli;

pub use admin::Admin;
pub use application::Application;
pub use cache::{Cache, CacheLink};
pub use certbot::Certbot;
pub use code::Code;
pub use database::{Database, DatabaseLink};
pub use graphviz::GraphViz;
pub use mail::{Mail, MailLink};
pub use management::Management;
pub use monitoring::Monitoring;
pub use proxy::Proxy;
pub use vault::Vault;
pub use website::{Website, WebsiteLink};
pub use wpcli::WpCli;

use rand::RngCore;

use crate::domain::compose::{ServiceBlock, render_fragment};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::report::Credential;
use crate::domain::site::SiteSpec;
use crate::domain::AppError;

/// Behavior shared by every service descriptor.
pub trait Service {
    /// Short role name, also the last segment of the service name.
    fn role(&self) -> &'static str;

    /// Heading used in the credentials report.
    fn display_name(&self) -> &'static str;

    fn service_name(&self) -> &str;

    /// Port the service listens on inside the network.
    fn port(&self) -> u16;

    /// The compose entry for this service. Pure given the descriptor fields.
    fn block(&self) -> ServiceBlock;

    /// Values listed in the credentials report after hostname and port.
    fn credentials(&self) -> Vec<Credential> {
        Vec::new()
    }

    /// The service as a standalone `name: {...}` YAML fragment.
    fn render(&self) -> Result<String, AppError> {
        render_fragment(&self.block())
    }
}

/// Names shared by all descriptors of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub title: String,
    /// External host name of the site.
    pub host: String,
    /// Slugified title plus the random project suffix, e.g. `acme-1a2b3c4d`.
    pub slug: String,
    pub network: String,
}

impl ProjectIdentity {
    pub fn new<R: RngCore>(site: &SiteSpec, generator: &mut CredentialGenerator<R>) -> Self {
        let slug = generator.generate_service_name(&site.slug());
        Self::with_slug(site, slug)
    }

    /// Identity with an explicit project slug.
    pub fn with_slug(site: &SiteSpec, slug: String) -> Self {
        Self {
            title: site.title.clone(),
            host: site.host.clone(),
            network: format!("{}-network", slug),
            slug,
        }
    }

    pub fn service_name(&self, role: &str) -> String {
        format!("{}-{}", self.slug, role)
    }

    pub fn volume_name(&self, role: &str) -> String {
        format!("{}-vol", self.service_name(role))
    }

    pub fn subdomain(&self, prefix: &str) -> String {
        format!("{}.{}", prefix, self.host)
    }
}
