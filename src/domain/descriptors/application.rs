use super::{ProjectIdentity, Service, WebsiteLink};
use crate::domain::compose::{Command, RestartPolicy, ServiceBlock};
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "application";
const IMAGE: &str = "docker.io/yilmazchef/woopy-app:latest";
const APP_DIR: &str = "/app";
const VERSION: &str = "1.0.0";
const LICENSE: &str = "Apache-2.0";

/// Native companion app container. Carries metadata only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
    pub formal_name: String,
    /// Reverse-DNS identifier derived from the site host.
    pub bundle: String,
    pub version: String,
    pub license: String,
    pub site_url: String,
    pub author_email: String,
}

impl Application {
    pub fn new(identity: &ProjectIdentity, website: &WebsiteLink) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("Application"),
            formal_name: identity.title.clone(),
            bundle: reverse_dns(&identity.host),
            version: VERSION.to_string(),
            license: LICENSE.to_string(),
            site_url: website.site_url.clone(),
            author_email: website.admin_email.clone(),
        }
    }
}

fn reverse_dns(host: &str) -> String {
    host.rsplit('.').collect::<Vec<_>>().join(".")
}

impl Service for Application {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Application"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::args(["/bin/bash", "-c", "/app/entrypoint.sh"]))
            .env("APP_NAME", &self.formal_name)
            .env("APP_BUNDLE", &self.bundle)
            .env("APP_VERSION", &self.version)
            .env("APP_SITE_URL", format!("https://{}", self.site_url))
            .volume(&self.volume, APP_DIR)
            .restart(RestartPolicy::Always)
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("Formal Name", &self.formal_name),
            Credential::info("Bundle", &self.bundle),
            Credential::info("Version", &self.version),
            Credential::info("License", &self.license),
            Credential::info("Author Email", &self.author_email),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_reverses_host_labels() {
        assert_eq!(reverse_dns("acme.example.com"), "com.example.acme");
        assert_eq!(reverse_dns("localhost"), "localhost");
    }
}
