use super::{ProjectIdentity, Service, WebsiteLink};
use crate::domain::compose::{Command, Route, ServiceBlock};
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "proxy";
const IMAGE: &str = "traefik:2.9";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ACME_DIR: &str = "/etc/traefik/acme";

/// Traefik reverse proxy terminating TLS for every routed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub public_host: String,
    /// Dashboard port.
    pub port: u16,
    pub acme_email: String,
    pub website: String,
}

impl Proxy {
    pub fn new(identity: &ProjectIdentity, website: &WebsiteLink) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            public_host: identity.subdomain(ROLE),
            port: default_port("Traefik"),
            acme_email: website.admin_email.clone(),
            website: website.service_name.clone(),
        }
    }

    fn arguments(&self) -> Vec<String> {
        vec![
            "--log.level=WARN".to_string(),
            "--accesslog=true".to_string(),
            "--api.dashboard=true".to_string(),
            "--ping=true".to_string(),
            "--entrypoints.web.address=:80".to_string(),
            "--entrypoints.web.http.redirections.entrypoint.to=websecure".to_string(),
            "--entrypoints.websecure.address=:443".to_string(),
            "--providers.docker=true".to_string(),
            format!("--providers.docker.endpoint=unix://{}", DOCKER_SOCKET),
            "--providers.docker.exposedbydefault=false".to_string(),
            format!("--providers.docker.network={}", self.network),
            "--certificatesresolvers.letsencrypt.acme.tlschallenge=true".to_string(),
            format!("--certificatesresolvers.letsencrypt.acme.email={}", self.acme_email),
            format!("--certificatesresolvers.letsencrypt.acme.storage={}/acme.json", ACME_DIR),
            "--global.sendanonymoususage=false".to_string(),
        ]
    }
}

impl Service for Proxy {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Proxy"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::Args(self.arguments()))
            .bind(DOCKER_SOCKET, DOCKER_SOCKET, true)
            .volume(&self.volume, ACME_DIR)
            .port(80, 80)
            .port(443, 443)
            .port(self.port, self.port)
            .depends_on(&self.website)
            .route(Route::internal(&self.public_host, "api@internal"))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("Dashboard", format!("https://{}", self.public_host)),
            Credential::info("ACME Email", &self.acme_email),
        ]
    }
}
