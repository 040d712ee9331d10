//! Descriptor graph of one generation request.

use rand::RngCore;
use serde::Serialize;

use crate::domain::compose::ComposeManifest;
use crate::domain::credentials::CredentialGenerator;
use crate::domain::descriptors::{
    Admin, Application, Cache, Certbot, Code, Database, GraphViz, Mail, Management, Monitoring,
    ProjectIdentity, Proxy, Service, Vault, Website, WpCli,
};
use crate::domain::report::{Credential, CredentialsReport, ReportSection};
use crate::domain::site::{Profile, SiteSpec};
use crate::domain::AppError;

/// Services included only in the full profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extras {
    pub wpcli: WpCli,
    pub certbot: Certbot,
    pub graphviz: GraphViz,
    pub application: Application,
}

/// Every descriptor of one project, built dependencies first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub site: SiteSpec,
    pub identity: ProjectIdentity,
    pub database: Database,
    pub mail: Mail,
    pub cache: Cache,
    pub website: Website,
    pub admin: Admin,
    pub proxy: Proxy,
    pub monitoring: Monitoring,
    pub management: Management,
    pub vault: Vault,
    pub code: Code,
    pub extras: Option<Extras>,
}

impl Project {
    pub fn build<R: RngCore>(site: SiteSpec, generator: &mut CredentialGenerator<R>) -> Self {
        let identity = ProjectIdentity::new(&site, generator);
        Self::build_with_identity(site, identity, generator)
    }

    /// Build with a fixed identity, e.g. to reproduce a project slug.
    pub fn build_with_identity<R: RngCore>(
        site: SiteSpec,
        identity: ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        let database = Database::new(&identity, generator);
        let mail = Mail::new(&identity, generator);
        let cache = Cache::new(&identity, generator);
        let website =
            Website::new(&identity, generator, database.link(), mail.link(), cache.link())
                .with_setup_scripts(site.profile.includes_extras());
        let admin = Admin::new(&identity, database.link());
        let proxy = Proxy::new(&identity, &website.link());
        let monitoring = Monitoring::new(&identity);
        let management = Management::new(&identity, generator);
        let vault = Vault::new(&identity, generator);
        let code = Code::new(&identity, generator);

        let extras = site.profile.includes_extras().then(|| Extras {
            wpcli: WpCli::new(&identity, website.link(), database.link()),
            certbot: Certbot::new(&identity),
            graphviz: GraphViz::new(&identity),
            application: Application::new(&identity, &website.link()),
        });

        Self {
            site,
            identity,
            database,
            mail,
            cache,
            website,
            admin,
            proxy,
            monitoring,
            management,
            vault,
            code,
            extras,
        }
    }

    pub fn slug(&self) -> &str {
        &self.identity.slug
    }

    pub fn profile(&self) -> Profile {
        self.site.profile
    }

    /// Services in manifest order.
    pub fn services(&self) -> Vec<&dyn Service> {
        let mut services: Vec<&dyn Service> = vec![
            &self.database,
            &self.cache,
            &self.mail,
            &self.website,
            &self.admin,
            &self.proxy,
            &self.monitoring,
            &self.management,
            &self.vault,
            &self.code,
        ];
        if let Some(extras) = &self.extras {
            services.push(&extras.wpcli);
            services.push(&extras.certbot);
            services.push(&extras.graphviz);
            services.push(&extras.application);
        }
        services
    }

    /// Validated compose manifest for every service.
    pub fn manifest(&self) -> Result<ComposeManifest, AppError> {
        let blocks = self.services().iter().map(|service| service.block()).collect();
        let manifest = ComposeManifest::from_services(&self.identity.network, blocks);
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn credentials_report(&self) -> CredentialsReport {
        let sections = self
            .services()
            .iter()
            .map(|service| {
                let mut entries = vec![Credential::info("Hostname", service.service_name())];
                entries.push(Credential::info("Port", service.port().to_string()));
                entries.extend(service.credentials());
                ReportSection {
                    title: service.display_name().to_string(),
                    service_name: service.service_name().to_string(),
                    entries,
                }
            })
            .collect();

        CredentialsReport {
            project: self.identity.slug.clone(),
            title: self.identity.title.clone(),
            host: self.identity.host.clone(),
            sections,
            manifest_digest: None,
        }
    }

    /// Values exposed to document templates. Contains no secrets.
    pub fn context(&self) -> ProjectContext {
        ProjectContext {
            title: self.identity.title.clone(),
            slug: self.identity.slug.clone(),
            host: self.identity.host.clone(),
            network: self.identity.network.clone(),
            profile: self.site.profile.as_str(),
            setup_scripts: self.site.profile.includes_extras(),
            admin_email: self.website.admin_email.clone(),
            services: self
                .services()
                .iter()
                .map(|service| ServiceSummary {
                    role: service.role(),
                    name: service.display_name(),
                    service_name: service.service_name().to_string(),
                    port: service.port(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    pub title: String,
    pub slug: String,
    pub host: String,
    pub network: String,
    pub profile: &'static str,
    pub setup_scripts: bool,
    pub admin_email: String,
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub role: &'static str,
    pub name: &'static str,
    pub service_name: String,
    pub port: u16,
}
